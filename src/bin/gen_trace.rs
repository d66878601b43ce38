//! Generate a synthetic latency trace in the trading pipeline's CSV format.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::Serialize;

use latency_report::config::DEFAULT_INPUT;

// ─── Shape of the synthetic load ─────────────────────────────────

/// Steady-clock origin of the first packet (ns)
const BASE_NS: u64 = 1_000_000_000_000;
/// Pool of instruments the packets are spread over
const NUM_SUBJECTS: u32 = 64;
/// Chance that a packet hits a slow network path
const SPIKE_PROB: f64 = 0.02;

#[derive(Parser)]
#[command(name = "gen-trace")]
#[command(about = "Generate a synthetic latency_trace.csv for the latency report")]
struct Args {
    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    output: PathBuf,

    /// Number of events to generate
    #[arg(short, long, default_value = "2000")]
    rows: usize,

    /// RNG seed; the same seed always gives the same file
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Largest num_updates value (events get 1..=max)
    #[arg(long, default_value = "5")]
    max_updates: u32,
}

/// Column order matches the trace writer of the pipeline.
#[derive(Debug, Serialize)]
struct TraceRow {
    subject_id: u32,
    t_recv: u64,
    t_parsed: u64,
    t_calc_start: u64,
    t_calc_end: u64,
    t_sent: u64,
    num_updates: u32,
}

fn generate(rng: &mut StdRng, rows: usize, max_updates: u32) -> Vec<TraceRow> {
    let max_updates = max_updates.max(1);
    let mut clock = BASE_NS;
    let mut out = Vec::with_capacity(rows);

    for _ in 0..rows {
        // inter-arrival 5–50 μs
        clock += rng.gen_range(5_000..50_000u64);
        let num_updates = rng.gen_range(1..=max_updates);

        let t_recv = clock;
        let t_parsed = t_recv + rng.gen_range(800..3_000u64);
        let t_calc_start = t_parsed + rng.gen_range(100..600u64);
        // every extra update costs roughly another 0.8 μs of scoring
        let calc_ns = 1_500 + u64::from(num_updates) * 800 + rng.gen_range(0..700u64);
        let t_calc_end = t_calc_start + calc_ns;
        let mut send_ns = rng.gen_range(1_000..4_000u64);
        if rng.gen_bool(SPIKE_PROB) {
            send_ns *= rng.gen_range(8..20u64);
        }
        let t_sent = t_calc_end + send_ns;

        out.push(TraceRow {
            subject_id: rng.gen_range(1..=NUM_SUBJECTS),
            t_recv,
            t_parsed,
            t_calc_start,
            t_calc_end,
            t_sent,
            num_updates,
        });
    }

    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🎲 Generating {} events (seed {})...", args.rows, args.seed);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let rows = generate(&mut rng, args.rows, args.max_updates);

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("opening {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("   ✓ wrote {}", args.output.display());
    Ok(())
}
