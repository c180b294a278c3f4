//! Error types for blink-bench
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BenchError
pub type Result<T> = std::result::Result<T, BenchError>;

/// Unified error type for blink-bench operations
#[derive(Debug, Error)]
pub enum BenchError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    /// Refused, reset, timed out or closed by the store. Fatal to the phase.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Measurement Errors
    // -------------------------------------------------------------------------
    #[error("Latency statistics require at least one sample")]
    EmptySamples,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BenchError {
    /// Classify a socket-level failure as a connection error
    ///
    /// Timeouts surface as `WouldBlock` on Unix and `TimedOut` on Windows.
    pub fn from_socket(context: &str, err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let reason = match err.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => "timed out".to_string(),
            ErrorKind::ConnectionRefused => "refused".to_string(),
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => "reset by peer".to_string(),
            ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof => "closed by peer".to_string(),
            _ => err.to_string(),
        };
        BenchError::Connection(format!("{}: {}", context, reason))
    }
}
