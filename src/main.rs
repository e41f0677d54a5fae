//! restock 命令列工具
//!
//! - `restock run`: 載入商品資料，同時執行 LP 與 GA，輸出實驗報表
//! - `restock compare`: 逐商品比較兩份結果表的成本

mod cli;
mod logging;

use anyhow::Context;
use cli::{Command, RunArgs};
use restock_io::report::format_comparison;
use restock_io::{compare_results, read_results, ExperimentRunner};

fn main() -> anyhow::Result<()> {
    logging::init();

    match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => println!("{}", cli::USAGE),
        Command::Run(args) => run(&args)?,
        Command::Compare { lp, ga } => {
            let lp_rows = read_results(&lp)
                .with_context(|| format!("無法讀取 LP 結果 {}", lp.display()))?;
            let ga_rows = read_results(&ga)
                .with_context(|| format!("無法讀取 GA 結果 {}", ga.display()))?;
            let rows = compare_results(&lp_rows, &ga_rows)?;
            print!("{}", format_comparison(&rows));
        }
    }

    Ok(())
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let settings = args.settings()?;
    tracing::info!(
        "GA 設定: 世代 {}，族群 {}，種子 {:?}",
        settings.ga.generations,
        settings.ga.population_size,
        settings.ga.seed
    );
    let report = ExperimentRunner::new(settings)
        .with_save_dir(&args.out)
        .run(&args.data)
        .with_context(|| format!("實驗失敗 (資料 {})", args.data.display()))?;

    println!("=== 模型比較 ===\n");
    println!(
        "{:<20} {:>14} {:>10} {:>12} {:>12} {:>12}",
        "model", "total_cost", "seconds", "mean_order", "max_order", "min_order"
    );
    for summary in &report.summaries {
        println!(
            "{:<20} {:>14.2} {:>10.3} {:>12.2} {:>12.2} {:>12.2}",
            summary.model,
            summary.total_cost,
            summary.solve_seconds,
            summary.mean_order,
            summary.max_order,
            summary.min_order
        );
    }

    let metrics = &report.metrics;
    println!("\n=== 效能指標 ===\n");
    match metrics.cost_gap_percent {
        Some(gap) => println!("成本差距: {:.2}%", gap),
        None => println!("成本差距: 無法定義"),
    }
    println!("較快模型: {}", metrics.faster_model);
    println!("耗時差: {:.3} 秒", metrics.speed_gap_seconds);
    println!("最佳模型: {}", metrics.best_model);
    println!("總耗時: {:.3} 秒", metrics.total_solve_seconds);

    let breaches = report.run.ga.solution.breaches();
    if !breaches.is_empty() {
        println!("\nGA 最佳解仍有 {} 項約束違反:", breaches.len());
        for breach in breaches {
            println!("  - {} {:?}: {:.2}", breach.product, breach.kind, breach.magnitude);
        }
    }

    println!("\n結果已儲存: {}", report.dir.display());
    Ok(())
}
