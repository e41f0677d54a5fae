//! # Restock IO
//!
//! 資料載入、結果報表與實驗執行

pub mod experiment;
pub mod loader;
pub mod metrics;
pub mod report;

// Re-export 主要類型
pub use experiment::{next_experiment_dir, ExperimentReport, ExperimentRunner, SolverRun};
pub use loader::{load_products, read_products, REQUIRED_COLUMNS};
pub use metrics::{cost_gap_percent, ModelSummary, PerformanceMetrics};
pub use report::{compare_results, read_results, write_results, CostComparisonRow, ResultRow};

use restock_core::RestockError;

/// 報表與檔案錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Restock(#[from] RestockError),

    #[error("CSV 讀寫失敗: {0}")]
    Csv(#[from] csv::Error),

    #[error("檔案讀寫失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 讀寫失敗: {0}")]
    Json(#[from] serde_json::Error),

    #[error("結果表不一致: {0}")]
    Mismatch(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
