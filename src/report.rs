//! Run Report
//!
//! Collects every phase's results and renders the human-readable report.
//! Every attempted phase and check shows up, including the ones that
//! failed or never got to run.

use std::fmt;

use crate::bench::{LatencyResult, ThroughputResult};
use crate::config::Config;
use crate::error::BenchError;
use crate::validation::{EvictionCheck, ValidationReport};

const WIDTH: usize = 62;

/// A phase cut short by an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseFailure {
    pub phase: String,
    pub error: String,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct Report {
    pub server: String,
    pub ops: usize,
    pub throughput: Vec<ThroughputResult>,
    pub latency: Vec<LatencyResult>,
    pub validation: Option<ValidationReport>,
    pub failures: Vec<PhaseFailure>,
}

impl Report {
    pub fn new(config: &Config) -> Self {
        Self {
            server: config.addr(),
            ops: config.ops,
            throughput: Vec::new(),
            latency: Vec::new(),
            validation: None,
            failures: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, phase: impl Into<String>, error: &BenchError) {
        let phase = phase.into();
        tracing::warn!(phase = %phase, error = %error, "Phase aborted");
        self.failures.push(PhaseFailure {
            phase,
            error: error.to_string(),
        });
    }

    /// Aggregate verdict: validation passed and no phase was aborted
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.validation.as_ref().is_some_and(ValidationReport::passed)
    }

    /// Process exit status for this report
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    fn write_throughput(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Throughput (sequential, single connection)")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        for run in &self.throughput {
            write!(
                f,
                "  {:<12} : {:>10} ops/sec  ({:.2}s)",
                run.label,
                format_count(run.ops_per_sec() as u64),
                run.elapsed.as_secs_f64()
            )?;
            if run.failures > 0 {
                write!(f, "  [{} errors]", format_count(run.failures as u64))?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }

    fn write_latency(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Latency (sequential, single connection, {} samples)",
            format_count(self.ops as u64)
        )?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        for run in &self.latency {
            let s = &run.stats;
            writeln!(f, "  {}:", run.label)?;
            writeln!(
                f,
                "    avg={}  p50={}  p95={}  p99={}  max={}",
                format_micros(s.avg),
                format_micros(s.p50),
                format_micros(s.p95),
                format_micros(s.p99),
                format_micros(s.max)
            )?;
            if run.failures > 0 {
                writeln!(f, "    [{} errors]", format_count(run.failures as u64))?;
            }
        }
        writeln!(f)
    }

    fn write_validation(&self, f: &mut fmt::Formatter<'_>, validation: &ValidationReport) -> fmt::Result {
        for result in &validation.results {
            writeln!(f, "{}", result.check)?;
            writeln!(f, "{}", "-".repeat(WIDTH))?;
            for line in &result.details {
                writeln!(f, "  {}", line)?;
            }
            writeln!(f, "  {}: {}", result.verdict(), result.summary)?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "  Results Summary")?;
        writeln!(f, "{}", "=".repeat(WIDTH))?;

        for run in &self.throughput {
            writeln!(
                f,
                "  {:<20}: {} ops/sec",
                format!("{} throughput", run.label),
                format_count(run.ops_per_sec() as u64)
            )?;
        }
        for run in &self.latency {
            writeln!(
                f,
                "  {:<20}: p50={} p99={}",
                format!("{} latency", run.label),
                format_micros(run.stats.p50),
                format_micros(run.stats.p99)
            )?;
        }

        match &self.validation {
            Some(validation) => {
                for result in &validation.results {
                    write!(f, "  {:<20}: {}", result.check, result.verdict())?;
                    if result.check == EvictionCheck::NAME {
                        write!(f, " ({})", result.summary)?;
                    }
                    writeln!(f)?;
                }
            }
            None => writeln!(f, "  {:<20}: not run", "Validation")?,
        }

        for failure in &self.failures {
            writeln!(f, "  ABORTED {}: {}", failure.phase, failure.error)?;
        }

        writeln!(f)?;
        let overall = if self.passed() {
            "ALL TESTS PASSED"
        } else {
            "SOME TESTS FAILED"
        };
        writeln!(f, "  OVERALL: {}", overall)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "  Blink-Store Benchmark")?;
        writeln!(f, "{}", "=".repeat(WIDTH))?;
        writeln!(f, "  Server       : {}", self.server)?;
        writeln!(f, "  Operations   : {} per test", format_count(self.ops as u64))?;
        writeln!(f, "  Connection   : single persistent TCP")?;
        writeln!(f)?;

        if !self.throughput.is_empty() {
            self.write_throughput(f)?;
        }
        if !self.latency.is_empty() {
            self.write_latency(f)?;
        }
        if let Some(validation) = &self.validation {
            self.write_validation(f, validation)?;
        }

        self.write_summary(f)
    }
}

/// `1234567` -> `1,234,567`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Microseconds below 1000, milliseconds with two decimals above
pub fn format_micros(us: f64) -> String {
    if us < 1000.0 {
        format!("{:.0} us", us)
    } else {
        format!("{:.2} ms", us / 1000.0)
    }
}
