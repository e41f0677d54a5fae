//! 遺傳運算子：錦標賽選擇、兩點交配、高斯突變

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::population::Individual;

/// 錦標賽選擇
///
/// 重複 `count` 次：放回抽樣 `tournament_size` 個個體，保留適應度最低者。
/// 回傳被選中個體的複本。
pub fn tournament_select<R: Rng + ?Sized>(
    individuals: &[Individual],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Individual> {
    if individuals.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let mut winner = &individuals[rng.gen_range(0..individuals.len())];
            for _ in 1..tournament_size {
                let aspirant = &individuals[rng.gen_range(0..individuals.len())];
                if aspirant.fitness_value() < winner.fitness_value() {
                    winner = aspirant;
                }
            }
            winner.clone()
        })
        .collect()
}

/// 兩點交配：交換 `[start, end)` 區段的基因
///
/// 基因長度小於 2 時不做任何事。回傳是否執行交換。
pub fn two_point_crossover<R: Rng + ?Sized>(a: &mut [f64], b: &mut [f64], rng: &mut R) -> bool {
    let size = a.len().min(b.len());
    if size < 2 {
        return false;
    }

    let mut start = rng.gen_range(1..=size);
    let mut end = rng.gen_range(1..size);
    if end >= start {
        end += 1;
    } else {
        std::mem::swap(&mut start, &mut end);
    }

    a[start..end].swap_with_slice(&mut b[start..end]);
    true
}

/// 高斯突變：每個基因以 `gene_probability` 機率加上常態雜訊
///
/// 基因下限為 0（訂購量不可為負）。回傳是否有基因被修改。
pub fn gaussian_mutation<R: Rng + ?Sized>(
    genome: &mut [f64],
    noise: &Normal<f64>,
    gene_probability: f64,
    rng: &mut R,
) -> bool {
    let mut mutated = false;
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < gene_probability {
            *gene = (*gene + noise.sample(rng)).max(0.0);
            mutated = true;
        }
    }
    mutated
}
