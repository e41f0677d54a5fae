//! # Restock Core
//!
//! 核心資料模型、成本模型與求解器配置

pub mod config;
pub mod cost;
pub mod product;
pub mod solution;
pub mod validation;

// Re-export 主要類型
pub use config::{GaConfig, LpConfig, PenaltyWeights, SolverSettings};
pub use cost::{evaluate, total_cost, StockEvaluation};
pub use product::ProductRecord;
pub use solution::{BreachKind, ConstraintBreach, ProductOutcome, SolutionResult, SolveMethod};
pub use validation::validate_products;

/// 補貨優化錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum RestockError {
    #[error("缺少必要欄位: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("資料缺值 (第 {row} 行, 欄位 {column})")]
    MissingValue { row: usize, column: String },

    #[error("無效的數值 (第 {row} 行, 欄位 {field}): {value}")]
    InvalidValue {
        row: usize,
        field: String,
        value: String,
    },

    #[error("資料集為空")]
    EmptyDataset,

    #[error("模型不可行 (商品 {product}): {reason}")]
    Infeasible { product: String, reason: String },

    #[error("目標函數無界")]
    Unbounded,

    #[error("求解失敗: {0}")]
    SolverFailure(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("訂購向量長度不符: 預期 {expected}, 實際 {actual}")]
    AllocationMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, RestockError>;
