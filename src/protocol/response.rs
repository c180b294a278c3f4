//! Response definitions
//!
//! Represents the store's answer to one request.

use bytes::Bytes;

/// Response status, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Value,
    NotFound,
    Usage,
    Error,
}

/// One decoded response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success; carries whatever followed `OK` on the line (usually empty)
    Ok(String),

    /// GET hit with the decoded payload
    Value(Bytes),

    /// GET / DELETE miss
    NotFound,

    /// Bytes currently held by the store
    Usage(u64),

    /// Store error, or a line that could not be decoded
    Error(String),
}

impl Response {
    /// Create a plain OK response
    pub fn ok() -> Self {
        Response::Ok(String::new())
    }

    /// Create an ERROR response
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(message.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Response::Ok(_) => Status::Ok,
            Response::Value(_) => Status::Value,
            Response::NotFound => Status::NotFound,
            Response::Usage(_) => Status::Usage,
            Response::Error(_) => Status::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Ok(detail) if detail.is_empty() => write!(f, "OK"),
            Response::Ok(detail) => write!(f, "OK {}", detail),
            Response::Value(payload) => write!(f, "VALUE ({} bytes)", payload.len()),
            Response::NotFound => write!(f, "NOT_FOUND"),
            Response::Usage(bytes) => write!(f, "USAGE {}", bytes),
            Response::Error(message) => write!(f, "ERROR {}", message),
        }
    }
}
