//! 結果報表
//!
//! 兩個求解器共用相同的輸出欄位，數值以兩位小數寫出。

use std::io::{Read, Write};
use std::path::Path;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use restock_core::{ProductOutcome, SolutionResult};

use crate::{ReportError, Result};

/// 四捨五入到兩位小數（非有限值原樣保留）
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// 結果表的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub product: String,
    pub demand: f64,
    pub on_hand: f64,
    pub order_qty: f64,
    pub total_stock: f64,
    pub total_cost: f64,
    pub max_stock: f64,
    pub min_stock: f64,
}

impl ResultRow {
    /// 由商品輸出建立（數值已四捨五入）
    pub fn from_outcome(outcome: &ProductOutcome) -> Self {
        Self {
            product: outcome.name.clone(),
            demand: round2(outcome.demand),
            on_hand: round2(outcome.on_hand),
            order_qty: round2(outcome.order_qty),
            total_stock: round2(outcome.total_stock),
            total_cost: round2(outcome.total_cost),
            max_stock: round2(outcome.max_stock),
            min_stock: round2(outcome.min_stock),
        }
    }
}

/// 將求解結果寫入 CSV 檔
pub fn write_results(path: impl AsRef<Path>, solution: &SolutionResult) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_results_to(file, solution)?;
    tracing::debug!(
        "{} 結果已寫入 {}",
        solution.method().short_name(),
        path.display()
    );
    Ok(())
}

/// 將求解結果寫入任意輸出
pub fn write_results_to<W: Write>(sink: W, solution: &SolutionResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for outcome in solution.outcomes() {
        writer.serialize(ResultRow::from_outcome(outcome))?;
    }
    writer.flush()?;
    Ok(())
}

/// 讀取結果 CSV 檔
pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<ResultRow>> {
    let file = std::fs::File::open(path)?;
    read_results_from(file)
}

/// 從任意來源讀取結果表
pub fn read_results_from<R: Read>(source: R) -> Result<Vec<ResultRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// 單一商品的成本比較
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostComparisonRow {
    pub product: String,
    pub lp_cost: f64,
    pub ga_cost: f64,
}

impl CostComparisonRow {
    /// GA 減 LP 的成本差
    pub fn difference(&self) -> f64 {
        self.ga_cost - self.lp_cost
    }
}

/// 逐商品比較兩份結果表
///
/// 兩表必須依相同順序列出相同商品。
pub fn compare_results(lp: &[ResultRow], ga: &[ResultRow]) -> Result<Vec<CostComparisonRow>> {
    if lp.len() != ga.len() {
        return Err(ReportError::Mismatch(format!(
            "商品數不同: LP {} 筆, GA {} 筆",
            lp.len(),
            ga.len()
        )));
    }

    lp.iter()
        .zip(ga)
        .enumerate()
        .map(|(idx, (l, g))| {
            if l.product != g.product {
                return Err(ReportError::Mismatch(format!(
                    "第 {} 行商品不同: {} / {}",
                    idx + 1,
                    l.product,
                    g.product
                )));
            }
            Ok(CostComparisonRow {
                product: l.product.clone(),
                lp_cost: l.total_cost,
                ga_cost: g.total_cost,
            })
        })
        .collect()
}

/// 以文字表格呈現比較結果
pub fn format_comparison(rows: &[CostComparisonRow]) -> String {
    let width = rows
        .iter()
        .map(|r| r.product.chars().count())
        .max()
        .unwrap_or(0)
        .max("product".len());

    let mut out = format!(
        "{:<width$}  {:>12}  {:>12}  {:>12}\n",
        "product", "lp_cost", "ga_cost", "difference"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<width$}  {:>12.2}  {:>12.2}  {:>12.2}\n",
            row.product,
            row.lp_cost,
            row.ga_cost,
            row.difference()
        ));
    }

    let lp_total: f64 = rows.iter().map(|r| r.lp_cost).sum();
    let ga_total: f64 = rows.iter().map(|r| r.ga_cost).sum();
    out.push_str(&format!(
        "{:<width$}  {:>12.2}  {:>12.2}  {:>12.2}\n",
        "total",
        lp_total,
        ga_total,
        ga_total - lp_total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_core::{ProductRecord, SolveMethod};
    use rstest::rstest;

    fn solution() -> SolutionResult {
        let products = vec![
            ProductRecord::new("Rice", 120.0, 20.0)
                .with_stock_bounds(30.0, 300.0)
                .with_costs(2.5, 0.1),
            ProductRecord::new("Milk", 80.0, 10.0)
                .with_stock_bounds(20.0, 150.0)
                .with_costs(1.2, 0.05),
        ];
        SolutionResult::from_allocation(
            SolveMethod::Exact,
            &products,
            &[100.0, 70.0 / 3.0],
            0.0,
            0.0,
            1e-6,
        )
        .unwrap()
    }

    #[rstest]
    #[case(1.0, 1.0)]
    #[case(2.346, 2.35)]
    #[case(2.344, 2.34)]
    #[case(23.333333, 23.33)]
    #[case(-0.004, 0.0)]
    fn test_round2(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round2(value), expected);
    }

    #[test]
    fn test_round2_keeps_infinity() {
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_write_results_columns_and_rounding() {
        let mut buffer = Vec::new();
        write_results_to(&mut buffer, &solution()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "product,demand,on_hand,order_qty,total_stock,total_cost,max_stock,min_stock"
        );
        // 100*2.5 + 120*0.1 = 262
        assert_eq!(lines.next().unwrap(), "Rice,120.0,20.0,100.0,120.0,262.0,300.0,30.0");
        let milk = lines.next().unwrap();
        assert!(milk.starts_with("Milk,80.0,10.0,23.33,33.33,"), "{milk}");
    }

    #[test]
    fn test_results_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp_results.csv");

        write_results(&path, &solution()).unwrap();
        let rows = read_results(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product, "Rice");
        assert_eq!(rows[0].total_cost, 262.0);
        assert_eq!(rows[1].order_qty, 23.33);
    }

    #[test]
    fn test_compare_results() {
        let lp = read_results_from("product,demand,on_hand,order_qty,total_stock,total_cost,max_stock,min_stock\nA,1,0,1,1,10,5,0\nB,1,0,1,1,20,5,0".as_bytes()).unwrap();
        let ga = read_results_from("product,demand,on_hand,order_qty,total_stock,total_cost,max_stock,min_stock\nA,1,0,1,1,12,5,0\nB,1,0,1,1,20,5,0".as_bytes()).unwrap();

        let rows = compare_results(&lp, &ga).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].difference(), 2.0);
        assert_eq!(rows[1].difference(), 0.0);

        let table = format_comparison(&rows);
        assert!(table.contains("lp_cost"));
        assert!(table.lines().last().unwrap().starts_with("total"));
        assert!(table.contains("30.00"));
        assert!(table.contains("32.00"));
    }

    #[test]
    fn test_compare_mismatched_tables() {
        let header = "product,demand,on_hand,order_qty,total_stock,total_cost,max_stock,min_stock\n";
        let lp = read_results_from(format!("{header}A,1,0,1,1,10,5,0").as_bytes()).unwrap();
        let ga = read_results_from(format!("{header}B,1,0,1,1,10,5,0").as_bytes()).unwrap();

        assert!(matches!(compare_results(&lp, &ga), Err(ReportError::Mismatch(_))));
        assert!(matches!(compare_results(&lp, &[]), Err(ReportError::Mismatch(_))));
    }
}
