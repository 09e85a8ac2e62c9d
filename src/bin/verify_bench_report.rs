use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use verify_bench_report::{ChartOptions, DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "verify-bench-report")]
#[command(version)]
#[command(about = "Chart and summarize Google Benchmark CSV results for PQ transaction verification")]
struct Args {
    /// Benchmark CSV export, as written by `--benchmark_format=csv`.
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

fn init_tracing() {
    // Diagnostics go to stderr; the report itself is stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    verify_bench_report::run(
        &args.input,
        Path::new(DEFAULT_OUTPUT),
        &ChartOptions::default(),
    )?;

    Ok(())
}
