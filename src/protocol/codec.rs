//! Protocol codec
//!
//! Encoding and decoding functions for the line protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <VERB> <key>[ <value>]\n
//! ```
//!
//! ### Response
//! ```text
//! OK[ ...]\n | VALUE <base64>\n | NOT_FOUND\n | USAGE <n>\n | ERROR <msg>\n
//! ```
//!
//! Responses never fail to decode: a line that matches no known form, or a
//! VALUE whose payload is not valid base64, becomes `Response::Error` so the
//! caller sees it instead of corrupt data.

use std::io::{self, BufRead, Read, Write};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;

use crate::error::{BenchError, Result};
use super::{Command, CommandType, Response};

/// Maximum line length accepted from the peer (16 MB)
pub const MAX_LINE_LEN: usize = 16 * 1024 * 1024;

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to one request line
///
/// Keys must be a single non-empty token and values must be one line of
/// UTF-8 text; anything else cannot be represented on the wire.
pub fn encode_command(command: &Command) -> Result<Vec<u8>> {
    let verb = command.command_type().as_str();

    let line = match command {
        Command::Get { key } | Command::Delete { key } => {
            validate_key(verb, key)?;
            format!("{} {}\n", verb, key).into_bytes()
        }
        Command::Set { key, value } => {
            validate_key(verb, key)?;
            validate_value(value)?;

            let mut line = Vec::with_capacity(verb.len() + key.len() + value.len() + 3);
            line.extend_from_slice(verb.as_bytes());
            line.push(b' ');
            line.extend_from_slice(key.as_bytes());
            if !value.is_empty() {
                line.push(b' ');
                line.extend_from_slice(value);
            }
            line.push(b'\n');
            line
        }
        Command::Usage | Command::Quit => format!("{}\n", verb).into_bytes(),
    };

    Ok(line)
}

fn validate_key(verb: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(BenchError::Protocol(format!("{} requires a key", verb)));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(BenchError::Protocol(format!(
            "{} key {:?} contains whitespace",
            verb, key
        )));
    }
    Ok(())
}

fn validate_value(value: &[u8]) -> Result<()> {
    if value.iter().any(|b| *b == b'\n' || *b == b'\r') {
        return Err(BenchError::Protocol(
            "SET value must not contain line breaks".to_string(),
        ));
    }
    std::str::from_utf8(value)
        .map_err(|e| BenchError::Protocol(format!("SET value is not UTF-8: {}", e)))?;
    Ok(())
}

/// Decode one request line
///
/// The verb is case-insensitive. A SET value is everything after the key,
/// spaces included; a SET without a value stores an empty value.
pub fn decode_command(line: &str) -> Result<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Err(BenchError::Protocol("empty request line".to_string()));
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command_type = CommandType::parse(verb)
        .ok_or_else(|| BenchError::Protocol(format!("unknown command: {}", verb)))?;

    match command_type {
        CommandType::Get | CommandType::Delete => {
            let key = rest.trim();
            if key.is_empty() {
                return Err(BenchError::Protocol(format!("{} requires a key", command_type)));
            }
            Ok(match command_type {
                CommandType::Get => Command::get(key),
                _ => Command::delete(key),
            })
        }
        CommandType::Set => {
            let rest = rest.trim_start();
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .map(|(k, v)| (k, v.trim_start()))
                .unwrap_or((rest, ""));
            if key.is_empty() {
                return Err(BenchError::Protocol("SET requires a key".to_string()));
            }
            Ok(Command::set(key, Bytes::copy_from_slice(value.as_bytes())))
        }
        CommandType::Usage => Ok(Command::Usage),
        CommandType::Quit => Ok(Command::Quit),
    }
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to one line
pub fn encode_response(response: &Response) -> Vec<u8> {
    let line = match response {
        Response::Ok(detail) if detail.is_empty() => "OK\n".to_string(),
        Response::Ok(detail) => format!("OK {}\n", single_line(detail)),
        Response::Value(payload) => format!("VALUE {}\n", BASE64.encode(payload)),
        Response::NotFound => "NOT_FOUND\n".to_string(),
        Response::Usage(bytes) => format!("USAGE {}\n", bytes),
        Response::Error(message) => format!("ERROR {}\n", single_line(message)),
    };
    line.into_bytes()
}

fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

/// Decode one response line
///
/// Never fails: unknown or malformed lines become `Response::Error`.
pub fn decode_response(line: &str) -> Response {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(payload) = line.strip_prefix("VALUE ") {
        return match BASE64.decode(payload.trim()) {
            Ok(bytes) => Response::Value(Bytes::from(bytes)),
            Err(e) => Response::Error(format!("malformed VALUE payload ({}): {}", e, line)),
        };
    }

    if let Some(count) = line.strip_prefix("USAGE ") {
        return match count.trim().parse::<u64>() {
            Ok(bytes) => Response::Usage(bytes),
            Err(_) => Response::Error(format!("malformed USAGE count: {}", line)),
        };
    }

    if strip_word(line, "NOT_FOUND").is_some() {
        return Response::NotFound;
    }

    if let Some(detail) = strip_word(line, "OK") {
        return Response::Ok(detail.to_string());
    }

    if let Some(message) = strip_word(line, "ERROR") {
        return Response::Error(message.to_string());
    }

    if line.is_empty() {
        return Response::Error("empty response line".to_string());
    }

    Response::Error(line.to_string())
}

/// Match `word` alone or followed by a space; returns the trimmed remainder
fn strip_word<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(word)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(' ').map(str::trim)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one `\n`-terminated line; `None` on a clean end of stream
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let mut limited = Read::take(&mut *reader, MAX_LINE_LEN as u64 + 1);
    let n = limited.read_until(b'\n', &mut line)?;

    if n == 0 {
        return Ok(None);
    }

    if line.last() != Some(&b'\n') {
        if line.len() > MAX_LINE_LEN {
            return Err(BenchError::Protocol(format!(
                "Line too long: more than {} bytes",
                MAX_LINE_LEN
            )));
        }
        return Err(BenchError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended in the middle of a line",
        )));
    }

    Ok(Some(line))
}

/// Read a complete command from a stream
///
/// Blocks until a full line is received or an error occurs
pub fn read_command<R: BufRead>(reader: &mut R) -> Result<Command> {
    let line = read_line(reader)?.ok_or_else(|| {
        BenchError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "client disconnected"))
    })?;
    let line = std::str::from_utf8(&line)
        .map_err(|e| BenchError::Protocol(format!("request is not UTF-8: {}", e)))?;
    decode_command(line)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let line = read_line(reader)?.ok_or_else(|| {
        BenchError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "store closed the connection"))
    })?;
    Ok(decode_response(&String::from_utf8_lossy(&line)))
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
