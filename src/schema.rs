/// Conventional Google Benchmark function prefix, dropped for display.
pub const NAME_PREFIX: &str = "BM_";

/// Name markers identifying the "verify 100 transactions" benchmark.
///
/// The first is the current benchmark name, the second the legacy one.
pub const PRIMARY_MARKERS: [&str; 2] = ["Verify100PQSignedTransactions", "Verify100Transactions"];

/// Time unit declared in the `time_unit` column of a benchmark export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeUnit {
    /// Google Benchmark's default when no unit is declared.
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    /// Anything else. Values in this unit are taken as already microseconds.
    Other(String),
}

impl TimeUnit {
    pub fn parse(s: &str) -> Self {
        match s {
            "ns" => TimeUnit::Nanoseconds,
            "us" => TimeUnit::Microseconds,
            "ms" => TimeUnit::Milliseconds,
            other => TimeUnit::Other(other.to_string()),
        }
    }

    /// Normalize a value expressed in this unit to microseconds.
    pub fn to_micros(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => value / 1000.0,
            TimeUnit::Microseconds => value,
            TimeUnit::Milliseconds => value * 1000.0,
            TimeUnit::Other(_) => value,
        }
    }
}

/// One timed benchmark case, with all durations in microseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkRecord {
    pub name: String,
    pub iterations: u64,
    pub real_time_us: f64,
    pub cpu_time_us: f64,
    pub items_per_second: f64,
}

impl BenchmarkRecord {
    /// Name without the `BM_` prefix.
    pub fn display_name(&self) -> &str {
        self.name.strip_prefix(NAME_PREFIX).unwrap_or(&self.name)
    }

    /// Whether this is the 100-transaction verification benchmark.
    pub fn is_primary(&self) -> bool {
        PRIMARY_MARKERS.iter().any(|m| self.name.contains(m))
    }
}
