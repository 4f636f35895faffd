use crate::models::{sort_findings, Finding, Severity};
use serde::{Deserialize, Serialize};

/// Everything one pass over a pipeline document produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
    pub jobs_analyzed: usize,
    pub failed_jobs: Vec<String>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    pub fn count_at_or_above(&self, threshold: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity >= threshold)
            .count()
    }

    /// Findings arrive in task completion order; this fixes an order for
    /// reporting and comparisons.
    pub fn sorted(mut self) -> Self {
        sort_findings(&mut self.findings);
        self.failed_jobs.sort();
        self
    }
}
