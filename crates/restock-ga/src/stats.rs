//! 世代統計

/// 單一世代的適應度統計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 世代編號（0 為初始族群）
    pub generation: usize,
    /// 本世代評估次數
    pub evaluations: usize,
    pub min: f64,
    pub avg: f64,
    /// 母體標準差
    pub std: f64,
}

impl GenerationStats {
    /// 由適應度值計算統計
    pub fn from_values(generation: usize, evaluations: usize, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                generation,
                evaluations,
                min: f64::NAN,
                avg: f64::NAN,
                std: f64::NAN,
            };
        }

        let n = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let avg = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;

        Self {
            generation,
            evaluations,
            min,
            avg,
            std: variance.sqrt(),
        }
    }
}
