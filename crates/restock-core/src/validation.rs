//! 資料集驗證
//!
//! 在任何求解開始前執行。最低庫存大於最高庫存不在此拒絕，
//! 由精確求解器以不可行回報。

use crate::{ProductRecord, RestockError, Result};

/// 驗證商品資料集
///
/// 規則：
/// 1. 資料集非空
/// 2. 名稱非空
/// 3. 所有數值欄位為非負有限值
/// 4. 損耗率介於 [0, 1)
pub fn validate_products(products: &[ProductRecord]) -> Result<()> {
    if products.is_empty() {
        return Err(RestockError::EmptyDataset);
    }

    for (idx, product) in products.iter().enumerate() {
        // 行號從 1 開始，對應資料列
        let row = idx + 1;

        if product.name.trim().is_empty() {
            return Err(RestockError::MissingValue {
                row,
                column: "product".to_string(),
            });
        }

        let fields = [
            ("demand", product.demand),
            ("on_hand", product.on_hand),
            ("min_stock", product.min_stock),
            ("unit_cost", product.unit_cost),
            ("storage_cost", product.storage_cost),
            ("lead_time", product.lead_time_days),
            ("shelf_life", product.shelf_life_days),
            ("sale_price", product.sale_price),
        ];
        for (field, value) in fields {
            check_non_negative(row, field, value, true)?;
        }
        // 最高庫存允許 +∞（無上限）
        check_non_negative(row, "max_stock", product.max_stock, false)?;

        if !(0.0..1.0).contains(&product.shrinkage_rate) {
            return Err(RestockError::InvalidValue {
                row,
                field: "shrinkage_rate".to_string(),
                value: product.shrinkage_rate.to_string(),
            });
        }
    }

    Ok(())
}

fn check_non_negative(row: usize, field: &str, value: f64, require_finite: bool) -> Result<()> {
    let invalid = value.is_nan() || value < 0.0 || (require_finite && value.is_infinite());
    if invalid {
        return Err(RestockError::InvalidValue {
            row,
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_product() -> ProductRecord {
        ProductRecord::new("TEA", 40.0, 5.0)
            .with_stock_bounds(10.0, 80.0)
            .with_costs(4.0, 0.3)
            .with_shrinkage_rate(0.02)
    }

    #[test]
    fn test_valid_dataset() {
        assert!(validate_products(&[valid_product()]).is_ok());
    }

    #[test]
    fn test_empty_dataset() {
        assert!(matches!(
            validate_products(&[]),
            Err(RestockError::EmptyDataset)
        ));
    }

    #[test]
    fn test_min_above_max_is_left_to_solver() {
        let product = valid_product().with_stock_bounds(50.0, 10.0);
        assert!(validate_products(&[product]).is_ok());
    }

    #[rstest]
    #[case::negative_demand(ProductRecord { demand: -1.0, ..valid_product() }, "demand")]
    #[case::nan_cost(ProductRecord { unit_cost: f64::NAN, ..valid_product() }, "unit_cost")]
    #[case::infinite_on_hand(ProductRecord { on_hand: f64::INFINITY, ..valid_product() }, "on_hand")]
    #[case::full_shrinkage(valid_product().with_shrinkage_rate(1.0), "shrinkage_rate")]
    #[case::negative_shrinkage(valid_product().with_shrinkage_rate(-0.1), "shrinkage_rate")]
    #[case::nan_max(ProductRecord { max_stock: f64::NAN, ..valid_product() }, "max_stock")]
    fn test_invalid_fields(#[case] product: ProductRecord, #[case] expected_field: &str) {
        let err = validate_products(&[valid_product(), product]).unwrap_err();

        match err {
            RestockError::InvalidValue { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, expected_field);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_name() {
        let product = ProductRecord {
            name: "  ".to_string(),
            ..valid_product()
        };

        assert!(matches!(
            validate_products(&[product]),
            Err(RestockError::MissingValue { row: 1, .. })
        ));
    }
}
