//! 約束建構
//!
//! 每個商品的三條約束皆為訂購量 `x` 的一次式：`coefficient × x (≤|≥) rhs`

use restock_core::{ProductRecord, RestockError, Result};

/// 約束類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// 現有 + 訂購 ≤ 最高庫存
    MaxStock,
    /// 現有 + 訂購 ≥ 最低庫存
    MinStock,
    /// (現有 + 訂購) × (1 − 損耗率) ≥ 需求
    Demand,
}

/// 關係運算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    AtMost,
    AtLeast,
}

/// 單變數線性約束
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearConstraint {
    /// 商品索引（決策變數索引）
    pub product: usize,
    pub kind: ConstraintKind,
    pub coefficient: f64,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    /// 檢查訂購量是否滿足約束
    pub fn is_satisfied(&self, order_qty: f64, tolerance: f64) -> bool {
        let lhs = self.coefficient * order_qty;
        match self.relation {
            Relation::AtMost => lhs <= self.rhs + tolerance,
            Relation::AtLeast => lhs + tolerance >= self.rhs,
        }
    }
}

/// 建立單一商品的三條約束
pub fn build_constraints(index: usize, product: &ProductRecord) -> [LinearConstraint; 3] {
    let retention = product.retention();

    [
        LinearConstraint {
            product: index,
            kind: ConstraintKind::MaxStock,
            coefficient: 1.0,
            relation: Relation::AtMost,
            rhs: product.max_stock - product.on_hand,
        },
        LinearConstraint {
            product: index,
            kind: ConstraintKind::MinStock,
            coefficient: 1.0,
            relation: Relation::AtLeast,
            rhs: product.min_stock - product.on_hand,
        },
        LinearConstraint {
            product: index,
            kind: ConstraintKind::Demand,
            coefficient: retention,
            relation: Relation::AtLeast,
            rhs: product.demand - retention * product.on_hand,
        },
    ]
}

/// 可行性預檢
///
/// 商品之間的約束互相獨立，不可行必然可歸因到單一商品。
pub fn check_feasibility(product: &ProductRecord, tolerance: f64) -> Result<()> {
    let infeasible = |reason: String| RestockError::Infeasible {
        product: product.name.clone(),
        reason,
    };

    if product.min_stock > product.max_stock + tolerance {
        return Err(infeasible(format!(
            "最低庫存 {} 大於最高庫存 {}",
            product.min_stock, product.max_stock
        )));
    }

    if product.on_hand > product.max_stock + tolerance {
        return Err(infeasible(format!(
            "現有庫存 {} 已超過最高庫存 {}",
            product.on_hand, product.max_stock
        )));
    }

    let needed = product.stock_needed_for_demand();
    if needed > product.max_stock + tolerance {
        return Err(infeasible(format!(
            "損耗後需求 {} 需要總庫存 {:.4}，超過最高庫存 {}",
            product.demand, needed, product.max_stock
        )));
    }

    Ok(())
}
