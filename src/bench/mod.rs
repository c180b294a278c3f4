//! Benchmark Module
//!
//! Sequential throughput and latency measurement over the store protocol.
//!
//! ## Methodology
//! - Each run owns one persistent connection, so connection setup is
//!   amortized away from the per-operation cost
//! - Throughput: wall-clock time for the whole batch, `ops / elapsed`
//! - Latency: one sample per isolated round trip, percentiles computed
//!   after the run from the sorted samples

mod driver;
mod stats;
pub mod workload;

pub use driver::{BenchmarkDriver, LatencyResult, ThroughputResult};
pub use stats::{percentile_index, LatencySamples, LatencyStats};
