//! Sampled eviction check
//!
//! The store evicts by sampling, not in strict recency order, so the check
//! is statistical: enough of the oldest keys must be gone and every one of
//! the newest keys must still be there. Which early keys went is never
//! asserted.

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{Command, Response};

use super::{CapacityCheck, ValidationResult};

/// What a GET revealed about one probed key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Evicted,
    Present,
    /// ERROR or a reply GET should never produce; shown in the report as is
    Unexpected(String),
}

impl Probe {
    pub fn from_response(response: &Response) -> Self {
        match response {
            Response::NotFound => Probe::Evicted,
            Response::Value(_) => Probe::Present,
            other => Probe::Unexpected(other.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Probe::Evicted => "evicted".to_string(),
            Probe::Present => "present".to_string(),
            Probe::Unexpected(reply) => format!("unexpected reply: {}", reply),
        }
    }
}

/// Counts behind the eviction verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionTally {
    pub early_total: usize,
    pub evicted_early: usize,
    pub recent_total: usize,
    pub present_recent: usize,
}

impl EvictionTally {
    pub fn observe_early(&mut self, probe: &Probe) {
        self.early_total += 1;
        if *probe == Probe::Evicted {
            self.evicted_early += 1;
        }
    }

    /// Anything but NOT_FOUND keeps a recent key counted as present
    pub fn observe_recent(&mut self, probe: &Probe) {
        self.recent_total += 1;
        if *probe != Probe::Evicted {
            self.present_recent += 1;
        }
    }

    pub fn evicted_fraction(&self) -> f64 {
        if self.early_total == 0 {
            return 0.0;
        }
        self.evicted_early as f64 / self.early_total as f64
    }

    pub fn all_recent_present(&self) -> bool {
        self.present_recent == self.recent_total
    }

    /// PASS iff `evicted_early / early_total >= threshold` and every recent key is present
    pub fn passes(&self, threshold: f64) -> bool {
        self.early_total > 0 && self.evicted_fraction() >= threshold && self.all_recent_present()
    }
}

/// Probes early and recent keys after the store has been overfilled
#[derive(Debug, Clone)]
pub struct EvictionCheck {
    /// Keys inserted first
    pub early: Vec<String>,

    /// Keys inserted last
    pub recent: Vec<String>,

    /// Minimum evicted fraction of `early`
    pub threshold: f64,
}

impl EvictionCheck {
    pub const NAME: &'static str = "Sampled eviction";

    pub fn from_config(config: &Config) -> Self {
        Self {
            early: config.early_keys().into_iter().map(CapacityCheck::key).collect(),
            recent: config.recent_keys().into_iter().map(CapacityCheck::key).collect(),
            threshold: config.eviction_threshold,
        }
    }

    /// GET every sampled key and judge the tally
    pub fn run(&self, conn: &mut Connection) -> Result<ValidationResult> {
        let mut tally = EvictionTally::default();
        let mut details = Vec::with_capacity(self.early.len() + 2);

        for key in &self.early {
            let probe = Probe::from_response(&conn.send(&Command::get(key.as_str()))?);
            details.push(format!("{:<14} -> {}", key, probe.describe()));
            tally.observe_early(&probe);
        }

        let mut missing = Vec::new();
        for key in &self.recent {
            let probe = Probe::from_response(&conn.send(&Command::get(key.as_str()))?);
            if probe != Probe::Present {
                missing.push(format!("{:<14} -> {}", key, probe.describe()));
            }
            tally.observe_recent(&probe);
        }

        details.push(format!(
            "Early keys evicted  : {}/{}",
            tally.evicted_early, tally.early_total
        ));
        details.push(format!(
            "Recent keys present : {}/{}",
            tally.present_recent, tally.recent_total
        ));
        details.extend(missing);

        Ok(self.judge(&tally).with_details(details))
    }

    pub fn judge(&self, tally: &EvictionTally) -> ValidationResult {
        ValidationResult::new(
            Self::NAME,
            tally.passes(self.threshold),
            format!(
                "{}/{} early keys evicted (need {:.0}%), {}/{} recent keys present",
                tally.evicted_early,
                tally.early_total,
                self.threshold * 100.0,
                tally.present_recent,
                tally.recent_total
            ),
        )
    }
}
