//! # Restock GA
//!
//! 遺傳演算法啟發式求解器

pub mod fitness;
pub mod init;
pub mod operators;
pub mod population;
pub mod solver;
pub mod stats;

// Re-export 主要類型
pub use fitness::{Fitness, PenaltyFitness};
pub use population::{Individual, Population};
pub use solver::GeneticSolver;
pub use stats::GenerationStats;

/// GA 求解結果
#[derive(Debug, Clone)]
pub struct GaResult {
    /// 最佳個體對應的求解結果（目標值含殘留懲罰）
    pub solution: restock_core::SolutionResult,

    /// 最佳適應度
    pub best_fitness: f64,

    /// 每一世代的統計（第 0 筆為初始族群）
    pub history: Vec<GenerationStats>,

    /// 適應度評估總次數
    pub evaluations: usize,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl GaResult {
    /// 最後一世代的統計
    pub fn last_generation(&self) -> Option<&GenerationStats> {
        self.history.last()
    }
}
