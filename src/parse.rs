//! Reader for Google Benchmark CSV exports.
//!
//! Columns are taken by position:
//! `name, iterations, real_time, cpu_time, time_unit, bytes_per_second,
//! items_per_second, label, error_occurred, error_message`.
//! `bytes_per_second` and everything after `items_per_second` are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::error::{ReportError, Result, RowError};
use crate::schema::{BenchmarkRecord, TimeUnit};

/// Command that produces the export this crate consumes.
pub const GENERATE_COMMAND: &str =
    "./build/bin/Release/pqc-ledger-bench --benchmark_format=csv > benchmark_results.csv";

const COL_NAME: usize = 0;
const COL_ITERATIONS: usize = 1;
const COL_REAL_TIME: usize = 2;
const COL_CPU_TIME: usize = 3;
const COL_TIME_UNIT: usize = 4;
const COL_ITEMS_PER_SECOND: usize = 6;

/// A data row that was dropped during parsing.
#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based line of the row in the input, when the reader knows it.
    pub line: Option<u64>,
    pub raw: Vec<String>,
    pub error: RowError,
}

/// Records in input order plus the rows that could not be converted.
#[derive(Debug, Default)]
pub struct ParsedResults {
    pub records: Vec<BenchmarkRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Parse the export at `path`.
///
/// Returns `Ok(None)` when the file does not exist, which callers treat as
/// "nothing to report" rather than an error. An export that exists but
/// holds no usable rows yields `Ok(Some(_))` with no records.
pub fn load_results(path: &Path) -> Result<Option<ParsedResults>> {
    if !path.exists() {
        warn!("File {} not found", path.display());
        warn!("Run benchmark with: {GENERATE_COMMAND}");
        return Ok(None);
    }

    let file = File::open(path).map_err(|source| ReportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_reader(file)?;

    info!(
        "parsed {} records ({} rows skipped)",
        parsed.records.len(),
        parsed.skipped.len()
    );
    Ok(Some(parsed))
}

/// Parse an export from any reader. The first row is always the header.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParsedResults> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = ParsedResults::default();

    for row in rdr.records() {
        let row = match row {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let error = RowError::Undecodable(err.to_string());
                warn!("Skipping invalid row ({error})");
                parsed.skipped.push(SkippedRow {
                    line: err.position().map(|p| p.line()),
                    raw: Vec::new(),
                    error,
                });
                continue;
            }
        };

        if is_blank_or_comment(&row) {
            continue;
        }

        match parse_row(&row) {
            Ok(record) => parsed.records.push(record),
            Err(error) => {
                let raw: Vec<String> = row.iter().map(str::to_string).collect();
                warn!("Skipping invalid row: {raw:?} ({error})");
                parsed.skipped.push(SkippedRow {
                    line: row.position().map(|p| p.line()),
                    raw,
                    error,
                });
            }
        }
    }

    Ok(parsed)
}

fn is_blank_or_comment(row: &StringRecord) -> bool {
    match row.get(COL_NAME) {
        None => true,
        Some(first) if row.len() == 1 && first.is_empty() => true,
        Some(first) => first.starts_with('#'),
    }
}

fn parse_row(row: &StringRecord) -> std::result::Result<BenchmarkRecord, RowError> {
    let name = row.get(COL_NAME).unwrap_or_default().to_string();

    // A present-but-empty iteration count is an error, unlike the float columns.
    let iterations = match row.get(COL_ITERATIONS) {
        None => 0,
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|source| RowError::InvalidInteger {
                column: "iterations",
                value: value.to_string(),
                source,
            })?,
    };

    let real_time = optional_float(row, COL_REAL_TIME, "real_time")?;
    let cpu_time = optional_float(row, COL_CPU_TIME, "cpu_time")?;
    let unit = row
        .get(COL_TIME_UNIT)
        .map(TimeUnit::parse)
        .unwrap_or_default();
    let items_per_second = optional_float(row, COL_ITEMS_PER_SECOND, "items_per_second")?;

    Ok(BenchmarkRecord {
        name,
        iterations,
        real_time_us: unit.to_micros(real_time),
        cpu_time_us: unit.to_micros(cpu_time),
        items_per_second,
    })
}

/// Absent or empty columns read as 0.
fn optional_float(
    row: &StringRecord,
    index: usize,
    column: &'static str,
) -> std::result::Result<f64, RowError> {
    match row.get(index) {
        None | Some("") => Ok(0.0),
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map_err(|source| RowError::InvalidFloat {
                column,
                value: value.to_string(),
                source,
            }),
    }
}
