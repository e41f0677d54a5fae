//! 初始族群啟發式
//!
//! 個體不是均勻隨機產生，而是從「補足缺口」的訂購量出發，
//! 加上小幅擾動後夾在 `[0, 最高庫存 − 現有]`，讓初始個體接近可行。

use rand::Rng;
use restock_core::ProductRecord;

/// 商品的基準訂購量
///
/// - 現有 < 需求：補足需求缺口
/// - 否則：補足到最低庫存（不足時為 0）
pub fn seed_order(product: &ProductRecord) -> f64 {
    if product.on_hand < product.demand {
        product.demand - product.on_hand
    } else {
        (product.min_stock - product.on_hand).max(0.0)
    }
}

/// 對基準訂購量加上 ±`variation` 比例的均勻擾動並夾在允許範圍內
pub fn perturbed_order<R: Rng + ?Sized>(product: &ProductRecord, variation: f64, rng: &mut R) -> f64 {
    let seed = seed_order(product);
    let noise = rng.gen_range(-variation..=variation) * seed;
    let upper = product.order_headroom().max(0.0);

    (seed + noise).max(0.0).min(upper)
}

/// 產生一個初始基因
pub fn seeded_genome<R: Rng + ?Sized>(products: &[ProductRecord], variation: f64, rng: &mut R) -> Vec<f64> {
    products
        .iter()
        .map(|product| perturbed_order(product, variation, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[rstest]
    // 現有不足需求：補足缺口
    #[case(ProductRecord::new("A", 100.0, 30.0).with_stock_bounds(10.0, 200.0), 70.0)]
    // 需求已滿足但低於最低庫存
    #[case(ProductRecord::new("B", 20.0, 30.0).with_stock_bounds(50.0, 200.0), 20.0)]
    // 需求與最低庫存都已滿足
    #[case(ProductRecord::new("C", 20.0, 80.0).with_stock_bounds(50.0, 200.0), 0.0)]
    fn test_seed_order(#[case] product: ProductRecord, #[case] expected: f64) {
        assert_eq!(seed_order(&product), expected);
    }

    #[test]
    fn test_perturbation_stays_within_ten_percent() {
        let product = ProductRecord::new("RICE", 100.0, 0.0).with_stock_bounds(0.0, 500.0);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let order = perturbed_order(&product, 0.1, &mut rng);
            assert!((90.0..=110.0).contains(&order), "order {order}");
        }
    }

    #[test]
    fn test_perturbation_clamped_to_headroom() {
        // 缺口 100，但上限只允許再訂 50
        let product = ProductRecord::new("MILK", 100.0, 0.0).with_stock_bounds(0.0, 50.0);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            assert!(perturbed_order(&product, 0.1, &mut rng) <= 50.0);
        }
    }

    #[test]
    fn test_overstocked_product_orders_nothing() {
        let product = ProductRecord::new("SODA", 10.0, 120.0).with_stock_bounds(0.0, 100.0);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(perturbed_order(&product, 0.1, &mut rng), 0.0);
    }

    #[test]
    fn test_seeded_genome_length() {
        let products = vec![
            ProductRecord::new("X", 10.0, 0.0),
            ProductRecord::new("Y", 0.0, 5.0),
        ];
        let mut rng = StdRng::seed_from_u64(4);

        let genome = seeded_genome(&products, 0.1, &mut rng);

        assert_eq!(genome.len(), 2);
        assert_eq!(genome[1], 0.0);
    }
}
