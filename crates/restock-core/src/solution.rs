//! 求解結果模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cost::evaluate;
use crate::{ProductRecord, RestockError, Result};

/// 求解方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    /// 線性規劃（精確解）
    Exact,
    /// 遺傳演算法（啟發式）
    Heuristic,
}

impl SolveMethod {
    /// 顯示名稱
    pub fn label(&self) -> &'static str {
        match self {
            SolveMethod::Exact => "Linear Programming",
            SolveMethod::Heuristic => "Genetic Algorithm",
        }
    }

    /// 簡稱
    pub fn short_name(&self) -> &'static str {
        match self {
            SolveMethod::Exact => "LP",
            SolveMethod::Heuristic => "GA",
        }
    }
}

/// 單一商品的求解輸出（兩個求解器共用的欄位集合）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOutcome {
    pub name: String,
    pub demand: f64,
    pub on_hand: f64,
    pub order_qty: f64,
    pub total_stock: f64,
    pub total_cost: f64,
    pub max_stock: f64,
    pub min_stock: f64,
}

/// 軟約束違反類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreachKind {
    /// 超過最高庫存
    OverMaxStock,
    /// 低於最低庫存
    UnderMinStock,
    /// 損耗後需求未滿足
    UnmetDemand,
}

/// 軟約束違反記錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintBreach {
    /// 商品索引
    pub index: usize,
    /// 商品名稱
    pub product: String,
    /// 違反類型
    pub kind: BreachKind,
    /// 違反量
    pub magnitude: f64,
}

/// 求解結果（建立後唯讀）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionResult {
    id: Uuid,
    method: SolveMethod,
    outcomes: Vec<ProductOutcome>,
    objective: f64,
    penalty: f64,
    breaches: Vec<ConstraintBreach>,
}

impl SolutionResult {
    /// 由訂購向量建立求解結果
    ///
    /// `objective` 為求解器回報的目標值，`penalty` 為其中的懲罰部分（精確解為 0）。
    /// 違反量超過 `tolerance` 的約束記為軟違反。
    pub fn from_allocation(
        method: SolveMethod,
        products: &[ProductRecord],
        allocation: &[f64],
        objective: f64,
        penalty: f64,
        tolerance: f64,
    ) -> Result<Self> {
        if products.len() != allocation.len() {
            return Err(RestockError::AllocationMismatch {
                expected: products.len(),
                actual: allocation.len(),
            });
        }

        let mut outcomes = Vec::with_capacity(products.len());
        let mut breaches = Vec::new();

        for (index, (product, &order_qty)) in products.iter().zip(allocation).enumerate() {
            let eval = evaluate(product, order_qty);

            for (kind, magnitude) in [
                (BreachKind::OverMaxStock, eval.over_max),
                (BreachKind::UnderMinStock, eval.under_min),
                (BreachKind::UnmetDemand, eval.shortfall),
            ] {
                if magnitude > tolerance {
                    breaches.push(ConstraintBreach {
                        index,
                        product: product.name.clone(),
                        kind,
                        magnitude,
                    });
                }
            }

            outcomes.push(ProductOutcome {
                name: product.name.clone(),
                demand: product.demand,
                on_hand: product.on_hand,
                order_qty,
                total_stock: eval.total_stock,
                total_cost: eval.total_cost(),
                max_stock: product.max_stock,
                min_stock: product.min_stock,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            method,
            outcomes,
            objective,
            penalty,
            breaches,
        })
    }

    /// 結果ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 求解方法
    pub fn method(&self) -> SolveMethod {
        self.method
    }

    /// 各商品輸出
    pub fn outcomes(&self) -> &[ProductOutcome] {
        &self.outcomes
    }

    /// 訂購向量
    pub fn allocation(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.order_qty).collect()
    }

    /// 求解器回報的目標值（GA 含殘留懲罰）
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// 目標值中的懲罰部分
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// 各商品總成本加總（不含懲罰）
    pub fn base_cost(&self) -> f64 {
        self.outcomes.iter().map(|o| o.total_cost).sum()
    }

    /// 軟約束違反列表
    pub fn breaches(&self) -> &[ConstraintBreach] {
        &self.breaches
    }

    /// 是否滿足全部約束
    pub fn is_feasible(&self) -> bool {
        self.breaches.is_empty()
    }

    /// 是否有指定類型的違反
    pub fn has_breach(&self, kind: BreachKind) -> bool {
        self.breaches.iter().any(|b| b.kind == kind)
    }
}
