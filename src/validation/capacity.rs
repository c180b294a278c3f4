//! Memory cap check
//!
//! Fills the store well past its byte ceiling and asks how much it holds.

use crate::bench::workload::{filler_value, key as prefixed_key, size_label};
use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{Command, Response};
use crate::report::format_count;

use super::ValidationResult;

/// Prefix of the keys written by the capacity check
pub const KEY_PREFIX: &str = "memtest";

/// Checks that reported usage never exceeds the configured limit
#[derive(Debug, Clone)]
pub struct CapacityCheck {
    /// Expected byte ceiling
    pub limit: u64,

    /// Number of distinct keys written
    pub inserts: usize,

    /// Size of every value written
    pub value_size: usize,
}

impl CapacityCheck {
    pub const NAME: &'static str = "Memory cap";

    pub fn from_config(config: &Config) -> Self {
        Self {
            limit: config.capacity_limit,
            inserts: config.capacity_inserts,
            value_size: config.capacity_value_size,
        }
    }

    /// Key of the `i`-th insert (1-based, in insertion order)
    pub fn key(i: usize) -> String {
        prefixed_key(KEY_PREFIX, i)
    }

    /// Insert `memtest_1..=memtest_<inserts>`, then read USAGE
    pub fn run(&self, conn: &mut Connection) -> Result<ValidationResult> {
        tracing::info!(
            inserts = self.inserts,
            value_size = self.value_size,
            limit = self.limit,
            "Filling store"
        );

        let value = filler_value(self.value_size);
        let mut rejected = 0;
        for i in 1..=self.inserts {
            if conn.send(&Command::set(Self::key(i), value.clone()))?.is_error() {
                rejected += 1;
            }
        }

        let reply = conn.send(&Command::Usage)?;
        Ok(self.judge(&reply, rejected))
    }

    /// Verdict from the USAGE reply: PASS iff usage <= limit
    pub fn judge(&self, usage_reply: &Response, rejected: usize) -> ValidationResult {
        let mut details = vec![format!(
            "Inserted {} x {} keys into {} byte store",
            format_count(self.inserts as u64),
            size_label(self.value_size),
            format_count(self.limit)
        )];
        if rejected > 0 {
            details.push(format!("{} SETs answered with ERROR", format_count(rejected as u64)));
        }

        let result = match usage_reply {
            Response::Usage(usage) => {
                let usage = *usage;
                let passed = usage <= self.limit;
                details.push(format!(
                    "Final usage : {} bytes ({} KiB / {} KiB limit)",
                    format_count(usage),
                    usage / 1024,
                    self.limit / 1024
                ));
                let relation = if passed { "<=" } else { ">" };
                ValidationResult::new(
                    Self::NAME,
                    passed,
                    format!(
                        "usage {} {} limit {}",
                        format_count(usage),
                        relation,
                        format_count(self.limit)
                    ),
                )
            }
            other => ValidationResult::new(
                Self::NAME,
                false,
                format!("unexpected reply to USAGE: {}", other),
            ),
        };

        result.with_details(details)
    }
}
