//! Primary/other split and the console summary block.

use std::fmt;

use crate::schema::BenchmarkRecord;

/// Transactions verified per iteration of the primary benchmark.
pub const TXS_PER_PRIMARY: f64 = 100.0;

const RULE_WIDTH: usize = 60;

/// Derived timings for the primary benchmark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimaryStats {
    pub total_ms: f64,
    pub avg_per_tx_us: f64,
    pub avg_per_tx_ms: f64,
}

impl PrimaryStats {
    pub fn from_record(record: &BenchmarkRecord) -> Self {
        let avg_per_tx_us = record.real_time_us / TXS_PER_PRIMARY;
        Self {
            total_ms: record.real_time_us / 1000.0,
            avg_per_tx_us,
            avg_per_tx_ms: avg_per_tx_us / 1000.0,
        }
    }
}

/// Records split into the primary benchmark and everything else.
#[derive(Debug)]
pub struct Partition<'a> {
    /// First primary record in input order. Later matches are ignored.
    pub primary: Option<&'a BenchmarkRecord>,
    pub others: Vec<&'a BenchmarkRecord>,
}

impl<'a> Partition<'a> {
    pub fn new(records: &'a [BenchmarkRecord]) -> Self {
        let (primary, others): (Vec<_>, Vec<_>) = records.iter().partition(|r| r.is_primary());
        Self {
            primary: primary.into_iter().next(),
            others,
        }
    }

    pub fn primary_stats(&self) -> Option<PrimaryStats> {
        self.primary.map(PrimaryStats::from_record)
    }
}

impl fmt::Display for Partition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "=== Benchmark Summary ===")?;
        writeln!(f, "{rule}")?;

        if let (Some(bench), Some(stats)) = (self.primary, self.primary_stats()) {
            writeln!(f)?;
            writeln!(f, "Verify 100 PQ-Signed Transactions:")?;
            writeln!(f, "   Total time for 100 txs: {:.2} ms", stats.total_ms)?;
            writeln!(
                f,
                "   *** Average verify time per tx: {:.2} us ({:.3} ms) ***",
                stats.avg_per_tx_us, stats.avg_per_tx_ms
            )?;
            writeln!(f, "   Iterations: {}", bench.iterations)?;
            if bench.items_per_second > 0.0 {
                writeln!(
                    f,
                    "   Throughput: {:.0} transactions/sec",
                    bench.items_per_second
                )?;
            }
        }

        if !self.others.is_empty() {
            writeln!(f)?;
            writeln!(f, "Other Benchmarks (for comparison):")?;
            for bench in &self.others {
                writeln!(f, "   {}: {:.2} us", bench.display_name(), bench.real_time_us)?;
            }
        }

        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, iterations: u64, real_time_us: f64, items: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            name: name.to_string(),
            iterations,
            real_time_us,
            cpu_time_us: real_time_us,
            items_per_second: items,
        }
    }

    #[test]
    fn test_primary_stats_for_250ms() {
        let stats = PrimaryStats::from_record(&record("BM_Verify100Transactions", 10, 250_000.0, 0.0));
        assert_eq!(stats.total_ms, 250.0);
        assert_eq!(stats.avg_per_tx_us, 2500.0);
        assert_eq!(stats.avg_per_tx_ms, 2.5);
        assert_eq!(format!("{:.3}", stats.total_ms), "250.000");
        assert_eq!(format!("{:.2}", stats.avg_per_tx_us), "2500.00");
    }

    #[test]
    fn test_partition_keeps_first_primary_and_order() {
        let records = vec![
            record("BM_EncodeTransaction", 1, 1.5, 0.0),
            record("BM_Verify100Transactions", 1, 10.0, 0.0),
            record("BM_DecodeTransaction", 1, 2.5, 0.0),
            record("BM_Verify100PQSignedTransactions", 1, 20.0, 0.0),
        ];
        let partition = Partition::new(&records);

        assert_eq!(partition.primary.unwrap().name, "BM_Verify100Transactions");
        let others: Vec<&str> = partition.others.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(others, ["BM_EncodeTransaction", "BM_DecodeTransaction"]);
    }

    #[test]
    fn test_partition_without_primary() {
        let records = vec![record("BM_EncodeTransaction", 1, 1.5, 0.0)];
        let partition = Partition::new(&records);
        assert!(partition.primary.is_none());
        assert!(partition.primary_stats().is_none());
        assert_eq!(partition.others.len(), 1);
    }

    #[test]
    fn test_summary_text() {
        let records = vec![
            record("BM_Verify100PQSignedTransactions/iterations:10", 10, 250_000.0, 400.0),
            record("BM_VerifySingleTransaction", 283, 2480.55, 403.0),
            record("BM_EncodeTransaction", 412_345, 1.7, 0.0),
        ];
        let summary = Partition::new(&records).to_string();

        let expected = [
            "=".repeat(60).as_str(),
            "=== Benchmark Summary ===",
            "=".repeat(60).as_str(),
            "",
            "Verify 100 PQ-Signed Transactions:",
            "   Total time for 100 txs: 250.00 ms",
            "   *** Average verify time per tx: 2500.00 us (2.500 ms) ***",
            "   Iterations: 10",
            "   Throughput: 400 transactions/sec",
            "",
            "Other Benchmarks (for comparison):",
            "   VerifySingleTransaction: 2480.55 us",
            "   EncodeTransaction: 1.70 us",
            "=".repeat(60).as_str(),
        ]
        .join("\n");
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_omits_zero_throughput_and_empty_sections() {
        let records = vec![record("BM_Verify100Transactions", 10, 250_000.0, 0.0)];
        let summary = Partition::new(&records).to_string();
        assert!(summary.contains("   Iterations: 10"));
        assert!(!summary.contains("Throughput"));
        assert!(!summary.contains("Other Benchmarks"));
    }
}
