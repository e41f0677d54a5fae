//! 實驗執行器
//!
//! 載入資料 → 同時執行 LP 與 GA → 寫出結果表、模型比較與效能指標到
//! `<save_dir>/experiment_<n>`。

use std::path::{Path, PathBuf};
use std::time::Instant;

use restock_core::{ProductRecord, SolutionResult, SolverSettings};
use restock_ga::{GaResult, GeneticSolver};
use restock_lp::ExactSolver;

use crate::loader::load_products;
use crate::metrics::{write_model_comparison, ModelSummary, PerformanceMetrics};
use crate::report::write_results;
use crate::Result;

const EXPERIMENT_PREFIX: &str = "experiment_";

/// 下一個可用的實驗目錄（`experiment_<最大編號 + 1>`，從 1 開始）
///
/// 不存在的 `save_dir` 會被建立；實驗目錄本身不建立。
pub fn next_experiment_dir(save_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let save_dir = save_dir.as_ref();
    std::fs::create_dir_all(save_dir)?;

    let mut last = 0u32;
    for entry in std::fs::read_dir(save_dir)? {
        let name = entry?.file_name();
        let number = name
            .to_str()
            .and_then(|n| n.strip_prefix(EXPERIMENT_PREFIX))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(number) = number {
            last = last.max(number);
        }
    }

    Ok(save_dir.join(format!("{}{}", EXPERIMENT_PREFIX, last + 1)))
}

/// 兩個求解器的執行結果與耗時
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub lp: SolutionResult,
    pub lp_seconds: f64,
    pub ga: GaResult,
    pub ga_seconds: f64,
}

impl SolverRun {
    /// 模型摘要（LP 在前）
    pub fn summaries(&self) -> Vec<ModelSummary> {
        vec![
            ModelSummary::from_solution(&self.lp, self.lp_seconds),
            ModelSummary::from_solution(&self.ga.solution, self.ga_seconds),
        ]
    }

    /// 效能指標
    pub fn metrics(&self) -> PerformanceMetrics {
        PerformanceMetrics::compute(&self.lp, self.lp_seconds, &self.ga.solution, self.ga_seconds)
    }
}

/// 一次完整實驗的產出
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    /// 實驗目錄
    pub dir: PathBuf,
    pub run: SolverRun,
    pub summaries: Vec<ModelSummary>,
    pub metrics: PerformanceMetrics,
}

/// 實驗執行器
#[derive(Debug, Clone)]
pub struct ExperimentRunner {
    settings: SolverSettings,
    save_dir: PathBuf,
}

impl Default for ExperimentRunner {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

impl ExperimentRunner {
    /// 創建新的實驗執行器（輸出到 `reports`）
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            settings,
            save_dir: PathBuf::from("reports"),
        }
    }

    /// 建構器模式：設置輸出目錄
    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }

    /// 取得設定
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// 同時執行兩個求解器
    ///
    /// 任一求解器失敗則整體失敗，不回傳部分結果。
    pub fn solve(&self, products: &[ProductRecord]) -> Result<SolverRun> {
        let exact = ExactSolver::new(self.settings.lp);
        let genetic = GeneticSolver::new(self.settings.ga.clone());

        let (lp, ga) = rayon::join(
            || {
                let start = Instant::now();
                exact.solve(products).map(|r| (r, start.elapsed().as_secs_f64()))
            },
            || {
                let start = Instant::now();
                genetic.solve(products).map(|r| (r, start.elapsed().as_secs_f64()))
            },
        );
        let (lp, lp_seconds) = lp?;
        let (ga, ga_seconds) = ga?;

        Ok(SolverRun {
            lp,
            lp_seconds,
            ga,
            ga_seconds,
        })
    }

    /// 執行完整實驗並寫出所有檔案
    pub fn run(&self, data_path: impl AsRef<Path>) -> Result<ExperimentReport> {
        let products = load_products(data_path)?;
        let dir = next_experiment_dir(&self.save_dir)?;
        tracing::info!("實驗目錄: {}", dir.display());

        let run = self.solve(&products)?;
        std::fs::create_dir_all(&dir)?;

        write_results(dir.join("lp_results.csv"), &run.lp)?;
        write_results(dir.join("ga_results.csv"), &run.ga.solution)?;

        let summaries = run.summaries();
        write_model_comparison(dir.join("model_comparison.csv"), &summaries)?;

        let metrics = run.metrics();
        metrics.write(dir.join("performance_metrics.json"))?;

        for summary in &summaries {
            tracing::info!(
                "{}: 總成本 {:.2}，耗時 {:.3} 秒，平均訂購 {:.2}",
                summary.model,
                summary.total_cost,
                summary.solve_seconds,
                summary.mean_order
            );
        }
        match metrics.cost_gap_percent {
            Some(gap) => tracing::info!("成本差距 {:.2}%，最佳模型 {}", gap, metrics.best_model),
            None => tracing::info!("成本差距無法定義，最佳模型 {}", metrics.best_model),
        }

        Ok(ExperimentReport {
            dir,
            run,
            summaries,
            metrics,
        })
    }
}
