//! 遺傳演算法求解器
//!
//! 世代流程：錦標賽選擇 → 兩兩交配 → 個體突變 → 平行評估未評估個體 → 更新名人堂。
//! 所有隨機數都在驅動執行緒上抽取，工作執行緒只負責適應度評估，
//! 因此相同種子的結果與執行緒數無關。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use restock_core::{
    validate_products, BreachKind, GaConfig, ProductRecord, RestockError, Result, SolutionResult,
    SolveMethod,
};

use crate::fitness::PenaltyFitness;
use crate::operators::{gaussian_mutation, tournament_select, two_point_crossover};
use crate::population::{Individual, Population};
use crate::stats::GenerationStats;
use crate::GaResult;

/// 回報軟違反時使用的容差
const BREACH_TOLERANCE: f64 = 1e-6;

/// 遺傳演算法求解器
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GaConfig,
}

impl GeneticSolver {
    /// 創建新的 GA 求解器
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// 取得配置
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// 求解
    ///
    /// 回傳名人堂中的最佳個體。目標值為懲罰後適應度，殘留的違反記錄在結果中而不報錯。
    pub fn solve(&self, products: &[ProductRecord]) -> Result<GaResult> {
        let config = &self.config;
        tracing::info!(
            "開始遺傳演算法求解：商品 {} 筆，族群 {}，世代 {}",
            products.len(),
            config.population_size,
            config.generations
        );
        let start_time = std::time::Instant::now();

        config.validate()?;
        validate_products(products)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = Normal::new(0.0, config.mutation_sigma)
            .map_err(|err| RestockError::InvalidConfig(format!("突變分佈無效: {}", err)))?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.unwrap_or(0))
            .thread_name(|i| format!("restock-ga-{}", i))
            .build()
            .map_err(|err| RestockError::SolverFailure(format!("無法建立執行緒池: {}", err)))?;
        let fitness = PenaltyFitness::new(products, config.penalty);

        // Step 1: 初始族群
        tracing::debug!("Step 1: 產生初始族群");
        let mut population =
            Population::seeded(products, config.population_size, config.seed_variation, &mut rng);
        let mut evaluations = population.evaluate(&fitness, &pool)?;
        let mut hall_of_fame = population
            .best()
            .cloned()
            .ok_or_else(|| RestockError::SolverFailure("初始族群為空".to_string()))?;
        let mut history = vec![GenerationStats::from_values(
            0,
            evaluations,
            &population.fitness_values(),
        )];

        // Step 2: 世代演化
        tracing::debug!("Step 2: 世代演化");
        for generation in 1..=config.generations {
            let offspring = self.breed(&population, &noise, &mut rng);
            population = Population::from_individuals(offspring);

            let evaluated = population.evaluate(&fitness, &pool)?;
            evaluations += evaluated;

            if let Some(best) = population.best() {
                if best.fitness_value() < hall_of_fame.fitness_value() {
                    hall_of_fame = best.clone();
                }
            }

            let stats =
                GenerationStats::from_values(generation, evaluated, &population.fitness_values());
            tracing::debug!(
                "世代 {}: 評估 {}，最小 {:.4}，平均 {:.4}，標準差 {:.4}",
                generation,
                evaluated,
                stats.min,
                stats.avg,
                stats.std
            );
            history.push(stats);
        }

        // Step 3: 組裝結果
        tracing::debug!("Step 3: 組裝結果");
        let best_fitness = hall_of_fame
            .fitness
            .ok_or_else(|| RestockError::SolverFailure("最佳個體未評估".to_string()))?;
        let solution = SolutionResult::from_allocation(
            SolveMethod::Heuristic,
            products,
            &hall_of_fame.genome,
            best_fitness.value(),
            best_fitness.penalty,
            BREACH_TOLERANCE,
        )?;

        for kind in [
            BreachKind::OverMaxStock,
            BreachKind::UnderMinStock,
            BreachKind::UnmetDemand,
        ] {
            let count = solution.breaches().iter().filter(|b| b.kind == kind).count();
            if count > 0 {
                tracing::warn!("最佳解仍有 {} 個商品違反 {:?}", count, kind);
            }
        }

        let elapsed = start_time.elapsed();
        tracing::info!(
            "遺傳演算法求解完成，適應度 {:.2}（懲罰 {:.2}），評估 {} 次，耗時 {:?}",
            best_fitness.value(),
            best_fitness.penalty,
            evaluations,
            elapsed
        );

        Ok(GaResult {
            solution,
            best_fitness: best_fitness.value(),
            history,
            evaluations,
            calculation_time_ms: Some(elapsed.as_millis()),
        })
    }

    /// 由目前族群產生下一代（尚未評估的個體適應度為 None）
    fn breed(&self, population: &Population, noise: &Normal<f64>, rng: &mut StdRng) -> Vec<Individual> {
        let config = &self.config;
        let mut offspring = tournament_select(
            population.individuals(),
            population.len(),
            config.tournament_size,
            rng,
        );

        // 相鄰兩個個體配對交配
        for i in (1..offspring.len()).step_by(2) {
            if rng.gen::<f64>() < config.crossover_probability {
                let (left, right) = offspring.split_at_mut(i);
                let first = &mut left[i - 1];
                let second = &mut right[0];
                if two_point_crossover(&mut first.genome, &mut second.genome, rng) {
                    first.invalidate();
                    second.invalidate();
                }
            }
        }

        for individual in offspring.iter_mut() {
            if rng.gen::<f64>() < config.mutation_probability
                && gaussian_mutation(
                    &mut individual.genome,
                    noise,
                    config.gene_mutation_probability,
                    rng,
                )
            {
                individual.invalidate();
            }
        }

        offspring
    }
}
