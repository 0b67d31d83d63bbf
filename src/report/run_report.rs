//! What a provisioning run did.

use serde::Serialize;

use super::verify::ToolStatus;
use crate::steps::StepStatus;

/// Ordered, append-only list of failure messages for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FailureLog(Vec<String>);

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.iter().any(|m| m.contains(needle))
    }
}

impl Extend<String> for FailureLog {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// How one step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
    pub duration_ms: u64,
}

/// Everything a finished run reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
    pub failures: FailureLog,
    /// Filled in after the pipeline by the verification pass.
    pub tools: Vec<ToolStatus>,
}

impl RunReport {
    /// Whether any step failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    /// Lines of the closing summary.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.failures.is_empty() {
            return vec!["All done! No failures.".to_string()];
        }

        let mut lines = vec![format!(
            "Completed with {} failure(s):",
            self.failures.len()
        )];
        lines.extend(self.failures.iter().map(|f| format!("  - {}", f)));
        lines
    }
}
