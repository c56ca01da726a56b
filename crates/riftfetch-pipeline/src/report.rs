//! Batch outcome reporting.

use riftfetch_core::MatchId;
use serde::{Deserialize, Serialize};

/// One id that could not be fetched or stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedMatch {
    pub match_id: MatchId,
    pub error: String,
}

/// Per-batch tally.
///
/// Every submitted id lands in exactly one of the three counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Fetched from the API and written to the cache.
    pub successful: usize,
    /// Fetch or write failed.
    pub failed: usize,
    /// Served from a valid cache entry.
    pub cached: usize,
    /// Details for failures with a known id.
    pub failures: Vec<FailedMatch>,
}

impl BatchReport {
    /// Number of ids accounted for.
    pub fn total(&self) -> usize {
        self.successful + self.failed + self.cached
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn record_failure(&mut self, match_id: MatchId, error: impl Into<String>) {
        self.failed += 1;
        self.failures.push(FailedMatch {
            match_id,
            error: error.into(),
        });
    }

    /// One-line completion summary.
    pub fn summary_line(&self) -> String {
        format!(
            "Processing complete. Successful: {}, Failed: {}, Cached: {}",
            self.successful, self.failed, self.cached
        )
    }

    /// Multi-line report including failure details.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                       BATCH REPORT                         \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Total matches:       {}\n", self.total()));
        s.push_str(&format!("  Fetched:             {}\n", self.successful));
        s.push_str(&format!("  From cache:          {}\n", self.cached));
        s.push_str(&format!("  Failed:              {}\n", self.failed));

        if !self.failures.is_empty() {
            s.push('\n');
            s.push_str("FAILURES\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for failure in &self.failures {
                s.push_str(&format!("  {}: {}\n", failure.match_id, failure.error));
            }
        }

        s.push_str("\n═══════════════════════════════════════════════════════════\n");
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let mut report = BatchReport {
            successful: 3,
            cached: 2,
            ..Default::default()
        };
        report.record_failure(MatchId::new("EUW1_9").unwrap(), "Not found");

        assert_eq!(report.total(), 6);
        assert!(!report.is_clean());
        assert_eq!(
            report.summary_line(),
            "Processing complete. Successful: 3, Failed: 1, Cached: 2"
        );
        let summary = report.summary();
        assert!(summary.contains("EUW1_9: Not found"));
        assert!(summary.contains("Total matches:       6"));
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = BatchReport::default();
        assert_eq!(report.total(), 0);
        assert!(report.is_clean());
        assert!(!report.summary().contains("FAILURES"));
    }
}
