//! 求解器配置
//!
//! 所有可調參數皆以明確的配置物件傳入求解器，預設值沿用歷史調校結果。

use serde::{Deserialize, Serialize};

use crate::{RestockError, Result};

/// 遺傳演算法懲罰倍數
///
/// 每項懲罰 = 違反量 × 單位採購成本 × 倍數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// 超過最高庫存（預設 2）
    pub over_max: f64,
    /// 低於最低庫存（預設 2）
    pub under_min: f64,
    /// 損耗後需求未滿足（預設 3）
    pub unmet_demand: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            over_max: 2.0,
            under_min: 2.0,
            unmet_demand: 3.0,
        }
    }
}

impl PenaltyWeights {
    /// 創建新的懲罰倍數
    pub fn new(over_max: f64, under_min: f64, unmet_demand: f64) -> Self {
        Self {
            over_max,
            under_min,
            unmet_demand,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("over_max", self.over_max),
            ("under_min", self.under_min),
            ("unmet_demand", self.unmet_demand),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RestockError::InvalidConfig(format!(
                    "懲罰倍數 {} 必須為非負有限值，實際 {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// 遺傳演算法配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// 世代數（唯一的停止條件）
    pub generations: usize,

    /// 族群大小
    pub population_size: usize,

    /// 錦標賽規模
    pub tournament_size: usize,

    /// 交配機率（每對個體）
    pub crossover_probability: f64,

    /// 突變機率（每個個體）
    pub mutation_probability: f64,

    /// 基因突變機率（突變個體中的每個基因）
    pub gene_mutation_probability: f64,

    /// 高斯突變標準差
    pub mutation_sigma: f64,

    /// 初始化擾動幅度（種子值的 ±比例）
    pub seed_variation: f64,

    /// 懲罰倍數
    pub penalty: PenaltyWeights,

    /// 隨機種子（None 表示使用系統熵）
    pub seed: Option<u64>,

    /// 平行評估執行緒數（None 表示使用 rayon 預設值）
    pub workers: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self::new(300, 200)
    }
}

impl GaConfig {
    /// 創建新的 GA 配置
    pub fn new(generations: usize, population_size: usize) -> Self {
        Self {
            generations,
            population_size,
            tournament_size: 7,
            crossover_probability: 0.8,
            mutation_probability: 0.1,
            gene_mutation_probability: 0.1,
            mutation_sigma: 5.0,
            seed_variation: 0.1,
            penalty: PenaltyWeights::default(),
            seed: None,
            workers: None,
        }
    }

    /// 建構器模式：設置錦標賽規模
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// 建構器模式：設置交配機率
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// 建構器模式：設置突變機率（個體與基因）
    pub fn with_mutation(mut self, individual_p: f64, gene_p: f64, sigma: f64) -> Self {
        self.mutation_probability = individual_p;
        self.gene_mutation_probability = gene_p;
        self.mutation_sigma = sigma;
        self
    }

    /// 建構器模式：設置初始化擾動幅度
    pub fn with_seed_variation(mut self, variation: f64) -> Self {
        self.seed_variation = variation;
        self
    }

    /// 建構器模式：設置懲罰倍數
    pub fn with_penalty(mut self, penalty: PenaltyWeights) -> Self {
        self.penalty = penalty;
        self
    }

    /// 建構器模式：設置隨機種子
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 建構器模式：設置平行評估執行緒數
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(RestockError::InvalidConfig(format!(
                "族群大小至少為 2，實際 {}",
                self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(RestockError::InvalidConfig("錦標賽規模至少為 1".to_string()));
        }
        for (name, p) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
            ("gene_mutation_probability", self.gene_mutation_probability),
            ("seed_variation", self.seed_variation),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(RestockError::InvalidConfig(format!(
                    "{} 必須介於 [0, 1]，實際 {}",
                    name, p
                )));
            }
        }
        if !self.mutation_sigma.is_finite() || self.mutation_sigma <= 0.0 {
            return Err(RestockError::InvalidConfig(format!(
                "突變標準差必須為正，實際 {}",
                self.mutation_sigma
            )));
        }
        if self.workers == Some(0) {
            return Err(RestockError::InvalidConfig("執行緒數至少為 1".to_string()));
        }
        self.penalty.validate()
    }
}

/// 線性規劃配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LpConfig {
    /// 約束驗證的數值容差
    pub tolerance: f64,
}

impl Default for LpConfig {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

impl LpConfig {
    /// 建構器模式：設置數值容差
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(RestockError::InvalidConfig(format!(
                "容差必須為非負有限值，實際 {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// 完整求解器設定（可由 JSON 檔載入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub lp: LpConfig,
    pub ga: GaConfig,
}
