//! Validation results
//!
//! A failed check is data, not an error: it is recorded and the remaining
//! checks still run.

use crate::error::BenchError;

/// Outcome of one check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Check name, e.g. `Memory cap`
    pub check: String,

    pub passed: bool,

    /// Observed metric in one line
    pub summary: String,

    /// Per-probe observations, in probe order
    pub details: Vec<String>,
}

impl ValidationResult {
    pub fn new(check: impl Into<String>, passed: bool, summary: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            passed,
            summary: summary.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn verdict(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Ordered results of the validation phase
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,

    /// Error that cut the phase short, if any
    pub aborted: Option<String>,
}

impl ValidationReport {
    pub fn record(&mut self, result: ValidationResult) {
        if !result.passed {
            tracing::warn!(check = %result.check, summary = %result.summary, "Check failed");
        }
        self.results.push(result);
    }

    /// Record `error` against the first pending check and mark the rest as not run
    pub fn abort(&mut self, error: &BenchError, pending: &[&str]) {
        tracing::warn!(error = %error, "Validation phase aborted");

        let mut pending = pending.iter();
        if let Some(check) = pending.next() {
            self.results
                .push(ValidationResult::new(*check, false, format!("aborted: {}", error)));
        }
        for check in pending {
            self.results.push(ValidationResult::new(
                *check,
                false,
                "not run: validation phase aborted",
            ));
        }
        self.aborted = Some(error.to_string());
    }

    pub fn get(&self, check: &str) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.check == check)
    }

    /// Overall verdict: nothing aborted and every recorded check passed
    pub fn passed(&self) -> bool {
        self.aborted.is_none() && !self.results.is_empty() && self.results.iter().all(|r| r.passed)
    }
}
