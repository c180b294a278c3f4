//! Validation Module
//!
//! Infers two store guarantees from the outside:
//! - a hard byte ceiling (USAGE never exceeds the limit once overfilled)
//! - sampled eviction (old keys tend to go, the newest keys stay)
//!
//! Both checks share one connection: the eviction probes only make sense
//! right after the capacity check has forced evictions.

mod capacity;
mod eviction;
mod result;

pub use capacity::{CapacityCheck, KEY_PREFIX};
pub use eviction::{EvictionCheck, EvictionTally, Probe};
pub use result::{ValidationReport, ValidationResult};

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;

/// Runs every check in order on one connection
pub struct ValidationSuite {
    config: Config,
}

impl ValidationSuite {
    /// Create a suite; the key samples are derived from a validated config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run all checks
    ///
    /// A failing check never stops the next one. A connection error stops
    /// the phase; the check it hit and every later check are recorded as
    /// failed so the report still names them.
    pub fn run(&self) -> ValidationReport {
        let capacity = CapacityCheck::from_config(&self.config);
        let eviction = EvictionCheck::from_config(&self.config);
        let mut report = ValidationReport::default();

        tracing::info!("Starting validation phase");
        let mut conn = match Connection::connect(&self.config) {
            Ok(conn) => conn,
            Err(e) => {
                report.abort(&e, &[CapacityCheck::NAME, EvictionCheck::NAME]);
                return report;
            }
        };

        match capacity.run(&mut conn) {
            Ok(result) => report.record(result),
            Err(e) => {
                report.abort(&e, &[CapacityCheck::NAME, EvictionCheck::NAME]);
                return report;
            }
        }

        match eviction.run(&mut conn) {
            Ok(result) => report.record(result),
            Err(e) => {
                report.abort(&e, &[EvictionCheck::NAME]);
                return report;
            }
        }

        conn.close();
        tracing::info!(passed = report.passed(), "Validation phase finished");
        report
    }
}
