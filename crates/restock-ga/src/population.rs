//! 族群與平行適應度評估

use rand::Rng;
use rayon::prelude::*;
use rayon::ThreadPool;
use restock_core::{ProductRecord, Result};

use crate::fitness::{Fitness, PenaltyFitness};
use crate::init::seeded_genome;

/// 個體
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// 基因（每個商品的訂購量）
    pub genome: Vec<f64>,
    /// 適應度（None 表示尚未評估或基因已變動）
    pub fitness: Option<Fitness>,
}

impl Individual {
    /// 創建未評估的個體
    pub fn new(genome: Vec<f64>) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// 適應度值（未評估視為 +∞）
    pub fn fitness_value(&self) -> f64 {
        self.fitness.map(|f| f.value()).unwrap_or(f64::INFINITY)
    }

    /// 基因變動後清除適應度
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// 是否已評估
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }
}

/// 族群
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// 由個體列表建立族群
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// 以啟發式種子產生初始族群
    pub fn seeded<R: Rng + ?Sized>(
        products: &[ProductRecord],
        size: usize,
        variation: f64,
        rng: &mut R,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::new(seeded_genome(products, variation, rng)))
            .collect();
        Self { individuals }
    }

    /// 在指定執行緒池中平行評估所有未評估的個體
    ///
    /// 回傳本次評估的個體數。任一評估失敗則整批失敗。
    pub fn evaluate(&mut self, fitness: &PenaltyFitness<'_>, pool: &ThreadPool) -> Result<usize> {
        let pending = self.individuals.iter().filter(|ind| !ind.is_evaluated()).count();

        pool.install(|| {
            self.individuals
                .par_iter_mut()
                .filter(|ind| !ind.is_evaluated())
                .try_for_each(|ind| -> Result<()> {
                    ind.fitness = Some(fitness.evaluate(&ind.genome)?);
                    Ok(())
                })
        })?;

        Ok(pending)
    }

    /// 最佳個體（適應度最低）
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .min_by(|a, b| a.fitness_value().total_cmp(&b.fitness_value()))
    }

    /// 所有已評估個體的適應度值
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals
            .iter()
            .filter_map(|ind| ind.fitness.map(|f| f.value()))
            .collect()
    }

    /// 個體列表
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// 族群大小
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// 族群是否為空
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}
