//! 家具工廠生產組合示例

use lpopt::lpopt_report::format_currency;
use lpopt::{optimize, ParameterRecord, SolverConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 家具生產組合示例 ===\n");

    // 桌子 (x₁) 與椅子 (x₂)
    let record = ParameterRecord::new()
        .with("profit_1", 120_000.0)
        .with("time_1", 3.0)
        .with("max_1", 30.0)
        .with("profit_2", 80_000.0)
        .with("time_2", 2.0)
        .with("max_2", 40.0)
        .with("total_time", 120.0);

    let report = optimize(&record, &SolverConfig::default())?;
    tracing::info!("求解完成：{}", report.optimal_value_display);

    println!("{}", report.table.to_markdown());

    if let Some(derivation) = &report.derivation {
        println!("{}", derivation.to_text());
    }

    println!("{}\n", report.summary());

    if let Some(sensitivity) = &report.sensitivity {
        println!("敏感度分析:");
        println!(
            "  - 工時影子價格: {} / 小時",
            format_currency(sensitivity.time_shadow_price, "Rp")
        );
        println!(
            "  - 平均每小時利潤（近似值）: {}",
            format_currency(sensitivity.average_value_per_hour, "Rp")
        );
        for range in &sensitivity.profit_ranges {
            let upper = range
                .upper
                .map_or_else(|| "∞".to_string(), |u| format_currency(u, "Rp"));
            println!(
                "  - p{} 維持最佳解的範圍: [{}, {}]",
                range.variable + 1,
                format_currency(range.lower, "Rp"),
                upper
            );
        }
    }

    if let Some(plot) = &report.plot {
        println!("\n可行域頂點: {}", serde_json::to_string(&plot.feasible_region)?);
    }

    Ok(())
}
