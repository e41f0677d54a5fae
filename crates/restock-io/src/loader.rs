//! 商品資料載入
//!
//! 讀取 CSV，檢查必要欄位與缺值，解析為 [`ProductRecord`] 後再做數值驗證。

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use restock_core::{validate_products, ProductRecord, RestockError};

use crate::Result;

/// 必要欄位
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "product",
    "category",
    "demand",
    "unit_cost",
    "storage_cost",
    "on_hand",
    "min_stock",
    "max_stock",
    "lead_time",
    "shelf_life",
    "shrinkage_rate",
    "sale_price",
];

/// 從檔案載入商品資料
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    tracing::info!("載入商品資料: {}", path.display());

    let file = std::fs::File::open(path)?;
    let products = read_products(file)?;

    tracing::info!(
        "商品 {} 筆，總需求 {:.2}，總現有庫存 {:.2}",
        products.len(),
        products.iter().map(|p| p.demand).sum::<f64>(),
        products.iter().map(|p| p.on_hand).sum::<f64>()
    );
    Ok(products)
}

/// 從任意來源讀取商品資料
pub fn read_products<R: Read>(source: R) -> Result<Vec<ProductRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = column_index(&headers)?;

    let mut products = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 1;

        // 任何欄位缺值都拒絕，包含非必要欄位
        for (value, column) in record.iter().zip(headers.iter()) {
            if value.is_empty() {
                return Err(RestockError::MissingValue {
                    row,
                    column: column.to_string(),
                }
                .into());
            }
        }

        let field = RowReader {
            record: &record,
            columns: &columns,
            row,
        };
        products.push(ProductRecord {
            name: field.text("product"),
            category: field.text("category"),
            demand: field.number("demand")?,
            on_hand: field.number("on_hand")?,
            min_stock: field.number("min_stock")?,
            max_stock: field.number("max_stock")?,
            unit_cost: field.number("unit_cost")?,
            storage_cost: field.number("storage_cost")?,
            shrinkage_rate: field.number("shrinkage_rate")?,
            lead_time_days: field.number("lead_time")?,
            shelf_life_days: field.number("shelf_life")?,
            sale_price: field.number("sale_price")?,
        });
    }

    validate_products(&products)?;
    Ok(products)
}

/// 建立欄位名稱到索引的對照，缺少必要欄位時回報全部缺漏
fn column_index(headers: &StringRecord) -> Result<HashMap<&'static str, usize>> {
    let mut columns = HashMap::new();
    let mut missing = Vec::new();

    for name in REQUIRED_COLUMNS {
        match headers.iter().position(|h| h == name) {
            Some(idx) => {
                columns.insert(name, idx);
            }
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(RestockError::MissingColumns(missing).into());
    }
    Ok(columns)
}

struct RowReader<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<&'static str, usize>,
    row: usize,
}

impl RowReader<'_> {
    fn raw(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&idx| self.record.get(idx))
            .unwrap_or("")
    }

    fn text(&self, column: &str) -> String {
        self.raw(column).to_string()
    }

    fn number(&self, column: &str) -> Result<f64> {
        let raw = self.raw(column);
        if raw.is_empty() {
            return Err(RestockError::MissingValue {
                row: self.row,
                column: column.to_string(),
            }
            .into());
        }
        raw.parse::<f64>().map_err(|_| {
            RestockError::InvalidValue {
                row: self.row,
                field: column.to_string(),
                value: raw.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReportError;
    use std::io::Write;

    const HEADER: &str = "product,category,demand,unit_cost,storage_cost,on_hand,min_stock,max_stock,lead_time,shelf_life,shrinkage_rate,sale_price";

    fn csv_of(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_read_valid_products() {
        let data = csv_of(&[
            "Rice,Grocery,120,2.5,0.1,20,30,300,3,180,0.01,4.0",
            "Milk,Dairy,80,1.2,0.05,10,20,150,1,7,0.05,2.0",
        ]);

        let products = read_products(data.as_bytes()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Rice");
        assert_eq!(products[0].category, "Grocery");
        assert_eq!(products[0].demand, 120.0);
        assert_eq!(products[0].unit_cost, 2.5);
        assert_eq!(products[1].shrinkage_rate, 0.05);
        assert_eq!(products[1].shelf_life_days, 7.0);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let data = "demand,product,category,unit_cost,storage_cost,on_hand,min_stock,max_stock,lead_time,shelf_life,shrinkage_rate,sale_price,notes\n\
                    50,Tea,Drinks,3,0.2,5,10,100,2,365,0,6,promo";

        let products = read_products(data.as_bytes()).unwrap();

        assert_eq!(products[0].name, "Tea");
        assert_eq!(products[0].demand, 50.0);
    }

    #[test]
    fn test_missing_columns_listed() {
        let data = "product,category,demand\nRice,Grocery,10";

        let err = read_products(data.as_bytes()).unwrap_err();

        match err {
            ReportError::Restock(RestockError::MissingColumns(missing)) => {
                assert!(missing.contains(&"unit_cost".to_string()));
                assert!(missing.contains(&"sale_price".to_string()));
                assert!(!missing.contains(&"demand".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_cell_is_missing_value() {
        let data = csv_of(&[
            "Rice,Grocery,120,2.5,0.1,20,30,300,3,180,0.01,4.0",
            "Milk,Dairy,80,,0.05,10,20,150,1,7,0.05,2.0",
        ]);

        let err = read_products(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            ReportError::Restock(RestockError::MissingValue { row: 2, ref column }) if column == "unit_cost"
        ));
    }

    #[test]
    fn test_unparsable_number() {
        let data = csv_of(&["Rice,Grocery,lots,2.5,0.1,20,30,300,3,180,0.01,4.0"]);

        let err = read_products(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            ReportError::Restock(RestockError::InvalidValue { row: 1, ref field, .. }) if field == "demand"
        ));
    }

    #[test]
    fn test_negative_value_rejected_by_validation() {
        let data = csv_of(&["Rice,Grocery,-5,2.5,0.1,20,30,300,3,180,0.01,4.0"]);

        let err = read_products(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            ReportError::Restock(RestockError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let err = read_products(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::Restock(RestockError::EmptyDataset)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            csv_of(&["Soap,Household,40,3,0.2,5,10,100,5,720,0,5"])
        )
        .unwrap();

        let products = load_products(file.path()).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].max_stock, 100.0);
    }

    #[test]
    fn test_missing_file() {
        let err = load_products("/nonexistent/restock/data.csv").unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
