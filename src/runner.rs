//! Harness Runner
//!
//! Runs the phases in order, each on its own connection:
//!
//! 1. throughput: SET per configured value size, then GET, then DELETE
//! 2. seed + latency: SET and GET round trips
//! 3. validation: memory cap and sampled eviction
//!
//! A phase that hits a connection error is recorded in the report and the
//! run moves on to the next phase.

use crate::bench::workload::{delete_workload, filler_value, get_workload, set_workload, size_label};
use crate::bench::BenchmarkDriver;
use crate::config::Config;
use crate::error::Result;
use crate::report::{PhaseFailure, Report};
use crate::validation::ValidationSuite;

/// Key prefix of the throughput runs
pub const THROUGHPUT_PREFIX: &str = "bench";

/// Key prefix of the seed and latency runs
pub const LATENCY_PREFIX: &str = "lbench";

/// Runs the whole harness against one store
pub struct Runner {
    config: Config,
    validation: ValidationSuite,
}

impl Runner {
    /// Create a runner; the config is validated up front
    pub fn new(config: Config) -> Result<Self> {
        let validation = ValidationSuite::new(config.clone())?;
        Ok(Self { config, validation })
    }

    /// Run every phase and assemble the report
    pub fn run(&self) -> Report {
        let mut report = Report::new(&self.config);

        if self.config.skip_bench {
            tracing::info!("Skipping benchmark phases");
        } else {
            let driver = BenchmarkDriver::new(self.config.clone());
            self.run_throughput(&driver, &mut report);
            self.run_latency(&driver, &mut report);
        }

        let validation = self.validation.run();
        if let Some(error) = &validation.aborted {
            report.failures.push(PhaseFailure {
                phase: "validation".to_string(),
                error: error.clone(),
            });
        }
        report.validation = Some(validation);

        tracing::info!(passed = report.passed(), "Run finished");
        report
    }

    fn run_throughput(&self, driver: &BenchmarkDriver, report: &mut Report) {
        let n = self.config.ops;

        for &size in &self.config.throughput_value_sizes {
            let label = format!("SET {}", size_label(size));
            let workload = set_workload(THROUGHPUT_PREFIX, filler_value(size));
            match driver.throughput(&label, workload, n) {
                Ok(result) => report.throughput.push(result),
                Err(e) => report.record_failure(format!("throughput {}", label), &e),
            }
        }

        match driver.throughput("GET", get_workload(THROUGHPUT_PREFIX, n), n) {
            Ok(result) => report.throughput.push(result),
            Err(e) => report.record_failure("throughput GET", &e),
        }

        match driver.throughput("DELETE", delete_workload(THROUGHPUT_PREFIX), n) {
            Ok(result) => report.throughput.push(result),
            Err(e) => report.record_failure("throughput DELETE", &e),
        }
    }

    fn run_latency(&self, driver: &BenchmarkDriver, report: &mut Report) {
        let n = self.config.ops;
        let value = filler_value(self.config.latency_value_size);

        if let Err(e) = driver.seed(set_workload(LATENCY_PREFIX, value.clone()), n) {
            report.record_failure("seed", &e);
        }

        let label = format!("SET {}", size_label(self.config.latency_value_size));
        match driver.latency(&label, set_workload(LATENCY_PREFIX, value), n) {
            Ok(result) => report.latency.push(result),
            Err(e) => report.record_failure(format!("latency {}", label), &e),
        }

        match driver.latency("GET", get_workload(LATENCY_PREFIX, n), n) {
            Ok(result) => report.latency.push(result),
            Err(e) => report.record_failure("latency GET", &e),
        }
    }
}
