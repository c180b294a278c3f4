//! Configuration for blink-bench
//!
//! Centralized configuration with sensible defaults. One `Config` value is
//! built up front and handed to every phase; nothing reads global state.

use std::time::Duration;

use crate::error::{BenchError, Result};

/// Main configuration for a harness run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Store host
    pub host: String,

    /// Store TCP port
    pub port: u16,

    /// Per-response read timeout (milliseconds, must be non-zero)
    pub read_timeout_ms: u64,

    /// Per-request write timeout (milliseconds, must be non-zero)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Benchmark Configuration
    // -------------------------------------------------------------------------
    /// Operations per throughput and latency run
    pub ops: usize,

    /// Value sizes (bytes) for the SET throughput runs
    pub throughput_value_sizes: Vec<usize>,

    /// Value size (bytes) for the seed and SET latency runs
    pub latency_value_size: usize,

    /// Skip throughput/latency and only run validation
    pub skip_bench: bool,

    // -------------------------------------------------------------------------
    // Validation Configuration
    // -------------------------------------------------------------------------
    /// Byte ceiling the store is expected to enforce
    pub capacity_limit: u64,

    /// Number of SETs issued by the capacity check
    pub capacity_inserts: usize,

    /// Value size (bytes) of each capacity check SET
    pub capacity_value_size: usize,

    /// How many of the first inserted keys are probed for eviction
    pub early_sample: usize,

    /// How many of the last inserted keys must survive
    pub recent_sample: usize,

    /// Minimum fraction of early keys that must be evicted
    pub eviction_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8765,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            ops: 10_000,
            throughput_value_sizes: vec![64, 256, 1024],
            latency_value_size: 256,
            skip_bench: false,
            capacity_limit: 2 * 1024 * 1024, // 2 MiB
            capacity_inserts: 4000,
            capacity_value_size: 1024,
            early_sample: 6,
            recent_sample: 5,
            eviction_threshold: 0.5,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` of the store
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Bound on every response read; also used as the connect timeout
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Key indices inserted first by the capacity check (1-based)
    pub fn early_keys(&self) -> Vec<usize> {
        (1..=self.early_sample).collect()
    }

    /// Key indices inserted last by the capacity check (1-based)
    ///
    /// Never reaches below the first insert, even on a config that
    /// asks for more recent keys than there are inserts.
    pub fn recent_keys(&self) -> Vec<usize> {
        let first = (self.capacity_inserts + 1).saturating_sub(self.recent_sample).max(1);
        (first..=self.capacity_inserts).collect()
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(BenchError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(BenchError::Config("port must be non-zero".to_string()));
        }
        if self.read_timeout_ms == 0 || self.write_timeout_ms == 0 {
            return Err(BenchError::Config(
                "read and write timeouts must be non-zero".to_string(),
            ));
        }
        if !self.skip_bench && self.ops == 0 {
            return Err(BenchError::Config(
                "operation count must be at least 1".to_string(),
            ));
        }
        if self.capacity_inserts == 0 {
            return Err(BenchError::Config(
                "capacity check needs at least one insert".to_string(),
            ));
        }
        if self.early_sample == 0 || self.recent_sample == 0 {
            return Err(BenchError::Config(
                "eviction samples must not be empty".to_string(),
            ));
        }
        if self.early_sample > self.capacity_inserts || self.recent_sample > self.capacity_inserts {
            return Err(BenchError::Config(format!(
                "eviction samples ({} early, {} recent) exceed {} inserts",
                self.early_sample, self.recent_sample, self.capacity_inserts
            )));
        }
        if !(0.0..=1.0).contains(&self.eviction_threshold) {
            return Err(BenchError::Config(format!(
                "eviction threshold {} is outside [0, 1]",
                self.eviction_threshold
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the store port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the number of operations per benchmark run
    pub fn ops(mut self, ops: usize) -> Self {
        self.config.ops = ops;
        self
    }

    /// Set the value sizes used by the SET throughput runs
    pub fn throughput_value_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.config.throughput_value_sizes = sizes;
        self
    }

    /// Set the value size used by the latency runs
    pub fn latency_value_size(mut self, size: usize) -> Self {
        self.config.latency_value_size = size;
        self
    }

    /// Only run the validation phase
    pub fn skip_bench(mut self, skip: bool) -> Self {
        self.config.skip_bench = skip;
        self
    }

    /// Set the expected byte ceiling of the store
    pub fn capacity_limit(mut self, bytes: u64) -> Self {
        self.config.capacity_limit = bytes;
        self
    }

    /// Set the number of capacity check inserts
    pub fn capacity_inserts(mut self, count: usize) -> Self {
        self.config.capacity_inserts = count;
        self
    }

    /// Set the capacity check value size (in bytes)
    pub fn capacity_value_size(mut self, size: usize) -> Self {
        self.config.capacity_value_size = size;
        self
    }

    /// Set how many early keys are probed
    pub fn early_sample(mut self, count: usize) -> Self {
        self.config.early_sample = count;
        self
    }

    /// Set how many recent keys are probed
    pub fn recent_sample(mut self, count: usize) -> Self {
        self.config.recent_sample = count;
        self
    }

    /// Set the minimum evicted fraction of early keys
    pub fn eviction_threshold(mut self, fraction: f64) -> Self {
        self.config.eviction_threshold = fraction;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
