//! 模型比較與效能指標

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use restock_core::SolutionResult;

use crate::report::round2;
use crate::Result;

/// 單一模型的摘要（`model_comparison.csv` 的一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub model: String,
    pub total_cost: f64,
    pub solve_seconds: f64,
    pub mean_order: f64,
    pub max_order: f64,
    pub min_order: f64,
}

impl ModelSummary {
    /// 由求解結果與耗時建立摘要
    pub fn from_solution(solution: &SolutionResult, solve_seconds: f64) -> Self {
        let orders = solution.allocation();
        let (mean_order, max_order, min_order) = if orders.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                orders.iter().sum::<f64>() / orders.len() as f64,
                orders.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                orders.iter().copied().fold(f64::INFINITY, f64::min),
            )
        };

        Self {
            model: solution.method().label().to_string(),
            total_cost: solution.objective(),
            solve_seconds,
            mean_order,
            max_order,
            min_order,
        }
    }

    fn rounded(&self) -> Self {
        Self {
            model: self.model.clone(),
            total_cost: round2(self.total_cost),
            solve_seconds: self.solve_seconds,
            mean_order: round2(self.mean_order),
            max_order: round2(self.max_order),
            min_order: round2(self.min_order),
        }
    }
}

/// 寫出模型比較表
pub fn write_model_comparison(path: impl AsRef<Path>, summaries: &[ModelSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for summary in summaries {
        writer.serialize(summary.rounded())?;
    }
    writer.flush()?;
    Ok(())
}

/// 成本差距百分比 = |lp − ga| / min(lp, ga) × 100
///
/// 兩者皆為 0 時為 0；較小者為 0 而另一者不為 0 時無法定義，回傳 None。
pub fn cost_gap_percent(lp_cost: f64, ga_cost: f64) -> Option<f64> {
    let diff = (lp_cost - ga_cost).abs();
    if diff == 0.0 {
        return Some(0.0);
    }
    let base = lp_cost.min(ga_cost);
    if base <= 0.0 {
        return None;
    }
    Some(diff / base * 100.0)
}

/// 效能指標（`performance_metrics.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// 成本差距（%），無法定義時為 null
    pub cost_gap_percent: Option<f64>,
    /// 較快的模型（LP / GA）
    pub faster_model: String,
    /// 耗時差（秒）
    pub speed_gap_seconds: f64,
    /// 成本較低的模型（LP / GA）
    pub best_model: String,
    /// 兩者總耗時（秒）
    pub total_solve_seconds: f64,
    pub timestamp: DateTime<Utc>,
    pub lp_run_id: Uuid,
    pub ga_run_id: Uuid,
}

impl PerformanceMetrics {
    /// 由兩個求解結果計算指標
    ///
    /// 耗時或成本相同時判定為 GA。
    pub fn compute(
        lp: &SolutionResult,
        lp_seconds: f64,
        ga: &SolutionResult,
        ga_seconds: f64,
    ) -> Self {
        let lp_cost = lp.objective();
        let ga_cost = ga.objective();
        let pick = |lp_wins: bool| String::from(if lp_wins { "LP" } else { "GA" });

        Self {
            cost_gap_percent: cost_gap_percent(lp_cost, ga_cost),
            faster_model: pick(lp_seconds < ga_seconds),
            speed_gap_seconds: (lp_seconds - ga_seconds).abs(),
            best_model: pick(lp_cost < ga_cost),
            total_solve_seconds: lp_seconds + ga_seconds,
            timestamp: Utc::now(),
            lp_run_id: lp.id(),
            ga_run_id: ga.id(),
        }
    }

    /// 寫出 JSON 檔
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
