//! Benchmark Driver
//!
//! Runs sequential throughput and latency experiments, one connection per
//! run, one outstanding request at a time.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::network::Connection;
use crate::protocol::Command;

use super::stats::{LatencySamples, LatencyStats};

/// Outcome of a throughput run
#[derive(Debug, Clone)]
pub struct ThroughputResult {
    pub label: String,

    /// Commands issued
    pub ops: usize,

    /// Commands answered with ERROR
    pub failures: usize,

    /// Wall-clock time for the whole batch
    pub elapsed: Duration,
}

impl ThroughputResult {
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.ops as f64 / secs
        } else {
            f64::INFINITY
        }
    }
}

/// Outcome of a latency run
#[derive(Debug, Clone)]
pub struct LatencyResult {
    pub label: String,
    pub stats: LatencyStats,

    /// Commands answered with ERROR
    pub failures: usize,
}

/// Drives benchmark runs against the configured store
pub struct BenchmarkDriver {
    config: Config,
}

impl BenchmarkDriver {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Issue `n` commands on one connection and time the whole batch
    ///
    /// Responses are only classified as success or ERROR. A connection
    /// error aborts the run.
    pub fn throughput<G>(&self, label: &str, generator: G, n: usize) -> Result<ThroughputResult>
    where
        G: Fn(usize) -> Command,
    {
        if n == 0 {
            return Err(BenchError::Config(format!(
                "throughput run '{}' needs at least one operation",
                label
            )));
        }

        tracing::info!(label, ops = n, "Starting throughput run");
        let mut conn = Connection::connect(&self.config)?;

        let mut failures = 0;
        let started = Instant::now();
        for i in 0..n {
            if conn.send(&generator(i))?.is_error() {
                failures += 1;
            }
        }
        let elapsed = started.elapsed();
        conn.close();

        let result = ThroughputResult {
            label: label.to_string(),
            ops: n,
            failures,
            elapsed,
        };
        tracing::info!(
            label,
            ops_per_sec = result.ops_per_sec() as u64,
            failures,
            "Throughput run finished"
        );
        Ok(result)
    }

    /// Time each of `n` round trips individually and summarize them
    ///
    /// The clock starts right before the request is written and stops once
    /// the response line is fully read; building the command is excluded.
    pub fn latency<G>(&self, label: &str, generator: G, n: usize) -> Result<LatencyResult>
    where
        G: Fn(usize) -> Command,
    {
        if n == 0 {
            return Err(BenchError::EmptySamples);
        }

        tracing::info!(label, samples = n, "Starting latency run");
        let mut conn = Connection::connect(&self.config)?;

        let mut samples = LatencySamples::with_capacity(label, n);
        let mut failures = 0;
        for i in 0..n {
            let command = generator(i);
            let started = Instant::now();
            let response = conn.send(&command)?;
            samples.record(started.elapsed());

            if response.is_error() {
                failures += 1;
            }
        }
        conn.close();

        let stats = samples.stats()?;
        tracing::info!(
            label,
            p50_us = stats.p50,
            p99_us = stats.p99,
            failures,
            "Latency run finished"
        );
        Ok(LatencyResult {
            label: label.to_string(),
            stats,
            failures,
        })
    }

    /// Populate keys ahead of a read run; returns how many SETs failed
    pub fn seed<G>(&self, generator: G, n: usize) -> Result<usize>
    where
        G: Fn(usize) -> Command,
    {
        tracing::info!(ops = n, "Seeding store");
        let mut conn = Connection::connect(&self.config)?;

        let mut failures = 0;
        for i in 0..n {
            if conn.send(&generator(i))?.is_error() {
                failures += 1;
            }
        }
        conn.close();

        if failures > 0 {
            tracing::warn!(failures, "Seed commands rejected by store");
        }
        Ok(failures)
    }
}
