//! Command generators
//!
//! Every generator is a pure function of the iteration index, so a run
//! issues the same command sequence every time regardless of what the
//! store answered.

use bytes::Bytes;

use crate::protocol::Command;

/// Key for iteration `i` under `prefix`: `<prefix>_<i>`
pub fn key(prefix: &str, i: usize) -> String {
    format!("{}_{}", prefix, i)
}

/// A printable value of exactly `size` bytes
pub fn filler_value(size: usize) -> Bytes {
    Bytes::from(vec![b'x'; size])
}

/// `SET <prefix>_<i> <value>`
pub fn set_workload(prefix: impl Into<String>, value: Bytes) -> impl Fn(usize) -> Command {
    let prefix = prefix.into();
    move |i| Command::set(key(&prefix, i), value.clone())
}

/// `GET <prefix>_<i % modulus>`
pub fn get_workload(prefix: impl Into<String>, modulus: usize) -> impl Fn(usize) -> Command {
    let prefix = prefix.into();
    let modulus = modulus.max(1);
    move |i| Command::get(key(&prefix, i % modulus))
}

/// `DELETE <prefix>_<i>`
pub fn delete_workload(prefix: impl Into<String>) -> impl Fn(usize) -> Command {
    let prefix = prefix.into();
    move |i| Command::delete(key(&prefix, i))
}

/// Human label for a value size, e.g. `64B`, `1KiB`
pub fn size_label(size: usize) -> String {
    if size >= 1024 && size % 1024 == 0 {
        format!("{}KiB", size / 1024)
    } else {
        format!("{}B", size)
    }
}
