use std::fmt;
use serde::{Serialize, Deserialize};

use ro_filters::Rejection;

use crate::SamplerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The target number of sequences was accepted.
    Done,
    /// The attempt budget ran out first; the accepted sequences are kept.
    Exhausted,
}

/// Rejected candidates, by the first filter that failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub gc_content: usize,
    pub homopolymer: usize,
    pub forbidden_site: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::GcContent => self.gc_content += 1,
            Rejection::Homopolymer => self.homopolymer += 1,
            Rejection::ForbiddenSite => self.forbidden_site += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.gc_content + self.homopolymer + self.forbidden_site
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub target: usize,
    pub accepted: usize,
    pub attempts: usize,
    pub max_attempts: usize,
    pub seed: u64,
    pub rejections: RejectionCounts,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.outcome == RunOutcome::Done
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempts as f64
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "accepted {}/{} after {} attempts ({:.4}%)",
            self.accepted, self.target, self.attempts, 100.0 * self.acceptance_rate())?;
        write!(f, "rejected: {} GC content, {} homopolymer, {} forbidden site",
            self.rejections.gc_content,
            self.rejections.homopolymer,
            self.rejections.forbidden_site)
    }
}

/// Configuration and report of one run, as stored next to the output table.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub config: &'a SamplerConfig,
    pub report: &'a RunReport,
}

impl RunSummary<'_> {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        let mut rejections = RejectionCounts::default();
        rejections.record(Rejection::GcContent);
        rejections.record(Rejection::GcContent);
        rejections.record(Rejection::ForbiddenSite);
        RunReport {
            outcome: RunOutcome::Exhausted,
            target: 5,
            accepted: 1,
            attempts: 4,
            max_attempts: 4,
            seed: 0,
            rejections,
        }
    }

    #[test]
    fn test_rejection_counts() {
        let r = report();
        assert_eq!(r.rejections.gc_content, 2);
        assert_eq!(r.rejections.homopolymer, 0);
        assert_eq!(r.rejections.forbidden_site, 1);
        assert_eq!(r.rejections.total(), 3);
    }

    #[test]
    fn test_report_rates() {
        let r = report();
        assert!(!r.is_complete());
        assert!((r.acceptance_rate() - 0.25).abs() < 1e-12);
        assert_eq!(r.to_string().lines().next().unwrap(), "accepted 1/5 after 4 attempts (25.0000%)");
    }

    #[test]
    fn test_summary_json() {
        let config = SamplerConfig::default();
        let r = report();
        let json = RunSummary { config: &config, report: &r }.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["report"]["outcome"], "exhausted");
        assert_eq!(value["report"]["rejections"]["gc_content"], 2);
        assert_eq!(value["config"]["length"], 61);
        assert_eq!(value["config"]["forbidden"][0]["regex"], "GAAGAC");
    }
}
