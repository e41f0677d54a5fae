//! 懲罰適應度函數
//!
//! 適應度 = Σ 採購成本 + 倉儲成本 + 懲罰，越低越好。

use restock_core::{cost, PenaltyWeights, ProductRecord, RestockError, Result, StockEvaluation};

/// 適應度（成本與懲罰分開保存）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitness {
    /// 不含懲罰的總成本
    pub cost: f64,
    /// 懲罰
    pub penalty: f64,
}

impl Fitness {
    /// 適應度值
    pub fn value(&self) -> f64 {
        self.cost + self.penalty
    }
}

/// 單一商品的懲罰
pub fn product_penalty(product: &ProductRecord, eval: &StockEvaluation, weights: &PenaltyWeights) -> f64 {
    product.unit_cost
        * (weights.over_max * eval.over_max
            + weights.under_min * eval.under_min
            + weights.unmet_demand * eval.shortfall)
}

/// 懲罰適應度評估器
///
/// 只讀取共享的商品表與個體自身的基因，可安全地平行呼叫。
#[derive(Debug, Clone, Copy)]
pub struct PenaltyFitness<'a> {
    products: &'a [ProductRecord],
    weights: PenaltyWeights,
}

impl<'a> PenaltyFitness<'a> {
    /// 創建新的評估器
    pub fn new(products: &'a [ProductRecord], weights: PenaltyWeights) -> Self {
        Self { products, weights }
    }

    /// 基因長度
    pub fn genome_len(&self) -> usize {
        self.products.len()
    }

    /// 評估個體
    pub fn evaluate(&self, genome: &[f64]) -> Result<Fitness> {
        if genome.len() != self.products.len() {
            return Err(RestockError::AllocationMismatch {
                expected: self.products.len(),
                actual: genome.len(),
            });
        }

        let mut fitness = Fitness {
            cost: 0.0,
            penalty: 0.0,
        };
        for (product, &qty) in self.products.iter().zip(genome) {
            let eval = cost::evaluate(product, qty);
            fitness.cost += eval.total_cost();
            fitness.penalty += product_penalty(product, &eval, &self.weights);
        }

        if !fitness.value().is_finite() {
            return Err(RestockError::SolverFailure(format!(
                "適應度非有限值: 成本 {}, 懲罰 {}",
                fitness.cost, fitness.penalty
            )));
        }

        Ok(fitness)
    }
}
