//! 成本與約束模型
//!
//! 兩個求解器共用的純函數：給定商品與訂購量，計算庫存、成本與約束違反量。
//! 本模型不拒絕任何訂購量，可行性由求解器自行判斷。

use crate::{ProductRecord, RestockError, Result};

/// 單一商品在指定訂購量下的評估結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockEvaluation {
    /// 訂購量
    pub order_qty: f64,
    /// 總庫存 = 現有 + 訂購
    pub total_stock: f64,
    /// 扣除損耗後的可用庫存
    pub usable_stock: f64,
    /// 採購成本 = 訂購量 × 單位成本
    pub material_cost: f64,
    /// 倉儲成本 = 總庫存 × 單位倉儲成本
    pub storage_cost: f64,
    /// 超過最高庫存的數量
    pub over_max: f64,
    /// 低於最低庫存的數量
    pub under_min: f64,
    /// 損耗後未滿足的需求量
    pub shortfall: f64,
}

impl StockEvaluation {
    /// 總成本（不含任何懲罰）
    pub fn total_cost(&self) -> f64 {
        self.material_cost + self.storage_cost
    }

    /// 是否滿足全部約束（含容差）
    pub fn is_feasible(&self, tolerance: f64) -> bool {
        self.over_max <= tolerance && self.under_min <= tolerance && self.shortfall <= tolerance
    }
}

/// 評估單一商品
pub fn evaluate(product: &ProductRecord, order_qty: f64) -> StockEvaluation {
    let total_stock = product.on_hand + order_qty;
    let usable_stock = total_stock * product.retention();

    StockEvaluation {
        order_qty,
        total_stock,
        usable_stock,
        material_cost: order_qty * product.unit_cost,
        storage_cost: total_stock * product.storage_cost,
        over_max: (total_stock - product.max_stock).max(0.0),
        under_min: (product.min_stock - total_stock).max(0.0),
        shortfall: (product.demand - usable_stock).max(0.0),
    }
}

/// 計算整體訂購向量的總成本
pub fn total_cost(products: &[ProductRecord], allocation: &[f64]) -> Result<f64> {
    if products.len() != allocation.len() {
        return Err(RestockError::AllocationMismatch {
            expected: products.len(),
            actual: allocation.len(),
        });
    }

    Ok(products
        .iter()
        .zip(allocation)
        .map(|(product, &qty)| evaluate(product, qty).total_cost())
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_product() -> ProductRecord {
        ProductRecord::new("APPLE", 100.0, 20.0)
            .with_stock_bounds(30.0, 150.0)
            .with_costs(2.0, 0.5)
            .with_shrinkage_rate(0.1)
    }

    #[test]
    fn test_evaluate_costs() {
        let eval = evaluate(&sample_product(), 100.0);

        assert_eq!(eval.total_stock, 120.0);
        assert!((eval.usable_stock - 108.0).abs() < 1e-9);
        assert_eq!(eval.material_cost, 200.0);
        assert_eq!(eval.storage_cost, 60.0);
        assert_eq!(eval.total_cost(), 260.0);
        assert!(eval.is_feasible(1e-9));
    }

    #[test]
    fn test_violation_signals() {
        let product = sample_product();

        // 不訂購：20 < 最低 30，可用 18 < 需求 100
        let low = evaluate(&product, 0.0);
        assert_eq!(low.under_min, 10.0);
        assert!((low.shortfall - 82.0).abs() < 1e-9);
        assert_eq!(low.over_max, 0.0);

        // 訂購過多：200 > 150
        let high = evaluate(&product, 180.0);
        assert_eq!(high.over_max, 50.0);
        assert_eq!(high.under_min, 0.0);
        assert_eq!(high.shortfall, 0.0);
        assert!(!high.is_feasible(1e-9));
    }

    #[test]
    fn test_total_cost_length_mismatch() {
        let products = vec![sample_product()];
        let err = total_cost(&products, &[1.0, 2.0]).unwrap_err();

        assert!(matches!(
            err,
            RestockError::AllocationMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_total_cost_sums_products() {
        let products = vec![
            ProductRecord::new("A", 10.0, 0.0).with_costs(1.0, 0.0),
            ProductRecord::new("B", 10.0, 5.0).with_costs(2.0, 1.0),
        ];

        // A: 10*1 = 10；B: 5*2 + 10*1 = 20
        let cost = total_cost(&products, &[10.0, 5.0]).unwrap();
        assert_eq!(cost, 30.0);
    }

    proptest! {
        #[test]
        fn prop_cost_is_monotone_in_order(
            order in 0.0f64..1_000.0,
            extra in 0.0f64..100.0,
            unit in 0.0f64..50.0,
            storage in 0.0f64..5.0,
        ) {
            let product = ProductRecord::new("P", 50.0, 10.0).with_costs(unit, storage);
            let a = evaluate(&product, order).total_cost();
            let b = evaluate(&product, order + extra).total_cost();
            prop_assert!(b + 1e-9 >= a);
        }

        #[test]
        fn prop_violations_are_non_negative(
            order in 0.0f64..1_000.0,
            on_hand in 0.0f64..500.0,
            demand in 0.0f64..500.0,
            shrinkage in 0.0f64..0.99,
        ) {
            let product = ProductRecord::new("P", demand, on_hand)
                .with_stock_bounds(50.0, 400.0)
                .with_shrinkage_rate(shrinkage);
            let eval = evaluate(&product, order);
            prop_assert!(eval.over_max >= 0.0);
            prop_assert!(eval.under_min >= 0.0);
            prop_assert!(eval.shortfall >= 0.0);
            // 超上限與低於下限不可能同時發生
            prop_assert!(eval.over_max == 0.0 || eval.under_min == 0.0);
        }
    }
}
