//! LP 與 GA 求解比較示例
//!
//! 執行: cargo run --example compare_solvers

use restock_core::{GaConfig, LpConfig, ProductRecord};
use restock_ga::GeneticSolver;
use restock_lp::ExactSolver;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 補貨優化：LP 與 GA 比較 ===\n");

    let products = vec![
        ProductRecord::new("Rice 5kg", 120.0, 20.0)
            .with_category("Grocery")
            .with_stock_bounds(30.0, 300.0)
            .with_costs(2.5, 0.1)
            .with_shrinkage_rate(0.01),
        ProductRecord::new("Milk 1L", 80.0, 10.0)
            .with_category("Dairy")
            .with_stock_bounds(20.0, 150.0)
            .with_costs(1.2, 0.05)
            .with_shrinkage_rate(0.05),
        ProductRecord::new("Soap", 40.0, 5.0)
            .with_category("Household")
            .with_stock_bounds(60.0, 100.0)
            .with_costs(3.0, 0.2),
        ProductRecord::new("Bread", 200.0, 0.0)
            .with_category("Bakery")
            .with_stock_bounds(0.0, 260.0)
            .with_costs(0.8, 0.02)
            .with_shrinkage_rate(0.1),
    ];

    println!("商品清單:");
    for product in &products {
        println!(
            "  - {} ({}): 需求 {}, 現有 {}, 庫存範圍 [{}, {}], 損耗 {:.0}%",
            product.name,
            product.category,
            product.demand,
            product.on_hand,
            product.min_stock,
            product.max_stock,
            product.shrinkage_rate * 100.0
        );
    }

    let lp = ExactSolver::new(LpConfig::default()).solve(&products)?;
    let ga = GeneticSolver::new(GaConfig::new(100, 100).with_seed(42)).solve(&products)?;

    println!("\n{:<10} {:>12} {:>12}", "商品", "LP 訂購", "GA 訂購");
    for (l, g) in lp.outcomes().iter().zip(ga.solution.outcomes()) {
        println!("{:<10} {:>12.2} {:>12.2}", l.name, l.order_qty, g.order_qty);
    }

    println!("\nLP 總成本: {:.2}", lp.objective());
    println!(
        "GA 適應度: {:.2} (成本 {:.2} + 懲罰 {:.2})",
        ga.solution.objective(),
        ga.solution.base_cost(),
        ga.solution.penalty()
    );

    if let Some(last) = ga.last_generation() {
        println!(
            "GA 最後世代: 最小 {:.2}, 平均 {:.2}, 標準差 {:.2}",
            last.min, last.avg, last.std
        );
    }

    for breach in ga.solution.breaches() {
        println!("  ⚠ {} {:?}: {:.2}", breach.product, breach.kind, breach.magnitude);
    }

    Ok(())
}
