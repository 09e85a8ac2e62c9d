//! Chart and console summary for Google Benchmark CSV exports of the
//! PQ transaction verification benchmarks.

use std::path::{Path, PathBuf};

use tracing::info;

pub mod error;
pub mod options;
pub mod parse;
pub mod render;
pub mod schema;
pub mod summary;

pub use error::{ReportError, Result, RowError};
pub use options::ChartOptions;
pub use parse::{load_results, parse_reader, ParsedResults, SkippedRow};
pub use render::{render_report, RenderOutcome};
pub use schema::{BenchmarkRecord, TimeUnit};

/// Export read when no path is given.
pub const DEFAULT_INPUT: &str = "benchmark_results.csv";
/// Chart written next to the working directory.
pub const DEFAULT_OUTPUT: &str = "benchmark_graph.png";

/// Result of one end-to-end run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Rendered(PathBuf),
    /// The export existed but held no usable rows.
    NoResults,
    InputMissing,
}

/// Parse `input`, render to `output`, and print the summary.
///
/// A missing or empty export is not an error: guidance on producing the CSV
/// is printed instead.
pub fn run(input: &Path, output: &Path, opts: &ChartOptions) -> Result<RunOutcome> {
    info!("Reading benchmark results from {}...", input.display());

    let outcome = match load_results(input)? {
        None => RunOutcome::InputMissing,
        Some(parsed) => match render_report(&parsed.records, output, opts)? {
            RenderOutcome::Saved(path) => RunOutcome::Rendered(path),
            RenderOutcome::NoResults => RunOutcome::NoResults,
        },
    };

    if !matches!(outcome, RunOutcome::Rendered(_)) {
        print!("{}", guidance());
    }
    Ok(outcome)
}

/// How to produce an export this tool can read.
pub fn guidance() -> String {
    format!(
        "\nTo generate benchmark CSV:\n  {}\n\nThen run this again.\n",
        parse::GENERATE_COMMAND
    )
}
