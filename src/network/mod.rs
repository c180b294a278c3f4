//! Network Module
//!
//! Client side of the store protocol.
//!
//! ## Model
//! - One TCP connection per phase, never shared
//! - Blocking I/O, one outstanding request at a time
//! - Bounded read/write timeouts turn a stalled store into an error

mod connection;

pub use connection::Connection;
