//! # blink-bench
//!
//! Black-box measurement and validation harness for Blink Store, a
//! memory-bounded key-value store reachable only through its line
//! protocol:
//! - Strict request/response protocol client over one TCP connection
//! - Sequential throughput and latency-percentile benchmarks
//! - Memory cap and sampled-eviction checks inferred from responses alone
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Runner                              │
//! │          (one connection per phase, builds Report)          │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌─────────────────────────┐    ┌─────────────────────────┐
//!   │    Benchmark Driver     │    │    Validation Suite     │
//!   │ (throughput, latency)   │    │  (memory cap, eviction) │
//!   └────────────┬────────────┘    └────────────┬────────────┘
//!                │                              │
//!                └──────────────┬───────────────┘
//!                               ▼
//!                    ┌─────────────────────┐
//!                    │   Protocol Client   │
//!                    │ (Connection, codec) │
//!                    └──────────┬──────────┘
//!                               │ TCP, one line per request/response
//!                               ▼
//!                         Blink Store
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod bench;
pub mod validation;
pub mod report;
pub mod runner;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchError, Result};
pub use config::Config;
pub use network::Connection;
pub use report::Report;
pub use runner::Runner;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of blink-bench
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
