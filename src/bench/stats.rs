//! Latency statistics
//!
//! Samples are kept in arrival order and only sorted when statistics are
//! computed. Percentiles use the nearest-rank-below rule on the sorted
//! samples: `p = sorted[floor(q * n)]`, index clamped to `[0, n - 1]`.

use std::time::Duration;

use crate::error::{BenchError, Result};

/// Round-trip latencies of one labeled run, in microseconds
#[derive(Debug, Clone, Default)]
pub struct LatencySamples {
    label: String,
    micros: Vec<f64>,
}

impl LatencySamples {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            micros: Vec::new(),
        }
    }

    pub fn with_capacity(label: impl Into<String>, capacity: usize) -> Self {
        Self {
            label: label.into(),
            micros: Vec::with_capacity(capacity),
        }
    }

    /// Record one completed round trip
    pub fn record(&mut self, elapsed: Duration) {
        self.micros.push(elapsed.as_nanos() as f64 / 1_000.0);
    }

    /// Record one round trip already expressed in microseconds
    pub fn record_micros(&mut self, micros: f64) {
        self.micros.push(micros);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.micros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.micros.is_empty()
    }

    /// Samples in arrival order
    pub fn as_micros(&self) -> &[f64] {
        &self.micros
    }

    /// Compute statistics; fails on an empty run
    pub fn stats(&self) -> Result<LatencyStats> {
        LatencyStats::from_micros(self.micros.clone())
    }
}

/// Summary of a latency run (all values in microseconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub samples: usize,
    pub min: f64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
}

impl LatencyStats {
    /// Compute statistics from raw samples in any order
    pub fn from_micros(mut samples: Vec<f64>) -> Result<Self> {
        let n = samples.len();
        if n == 0 {
            return Err(BenchError::EmptySamples);
        }

        samples.sort_by(f64::total_cmp);

        let min = samples[0];
        let max = samples[n - 1];
        // Rounding can push the mean an ulp outside the observed range
        let avg = (samples.iter().sum::<f64>() / n as f64).clamp(min, max);

        Ok(Self {
            samples: n,
            min,
            avg,
            p50: samples[percentile_index(n, 0.50)],
            p95: samples[percentile_index(n, 0.95)],
            p99: samples[percentile_index(n, 0.99)],
            max,
        })
    }
}

/// Index of quantile `q` in a sorted sample of length `n` (`n > 0`)
///
/// `floor(q * n)`, so the median lands on `n / 2`.
pub fn percentile_index(n: usize, q: f64) -> usize {
    debug_assert!(n > 0);
    let raw = (n as f64 * q).floor() as usize;
    raw.min(n.saturating_sub(1))
}
