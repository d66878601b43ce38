use anyhow::Context;
use tracing_subscriber::EnvFilter;

use latency_report::ReportConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════╗");
    println!("║   📈  MARKET-DATA LATENCY REPORT                 ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    let cfg = ReportConfig::default();
    let summary = latency_report::run(&cfg).with_context(|| {
        format!(
            "failed to build report from {}",
            cfg.input_path.display()
        )
    })?;

    println!();
    println!(
        "   ✓ {} events, {} num_updates groups",
        summary.rows, summary.groups
    );
    println!("Report → {}", summary.output.display());
    println!();

    Ok(())
}
