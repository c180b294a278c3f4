//! Codec Tests
//!
//! Tests for request and response encoding/decoding.

use std::io::Cursor;

use blink_bench::protocol::{
    Command, CommandType, Response, Status,
    encode_command, decode_command,
    encode_response, decode_response,
    read_command, write_command,
    read_response, write_response,
};
use blink_bench::BenchError;
use bytes::Bytes;

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_get() {
    let encoded = encode_command(&Command::get("foo")).unwrap();
    assert_eq!(encoded, b"GET foo\n");
}

#[test]
fn test_encode_set() {
    let encoded = encode_command(&Command::set("foo", "bar")).unwrap();
    assert_eq!(encoded, b"SET foo bar\n");
}

#[test]
fn test_encode_set_value_with_spaces() {
    let encoded = encode_command(&Command::set("k", "v with spaces")).unwrap();
    assert_eq!(encoded, b"SET k v with spaces\n");
}

#[test]
fn test_encode_set_empty_value() {
    let encoded = encode_command(&Command::set("k", Bytes::new())).unwrap();
    assert_eq!(encoded, b"SET k\n");
}

#[test]
fn test_encode_delete_usage_quit() {
    assert_eq!(encode_command(&Command::delete("foo")).unwrap(), b"DELETE foo\n");
    assert_eq!(encode_command(&Command::Usage).unwrap(), b"USAGE\n");
    assert_eq!(encode_command(&Command::Quit).unwrap(), b"QUIT\n");
}

#[test]
fn test_command_key() {
    assert_eq!(Command::get("foo").key(), Some("foo"));
    assert_eq!(Command::set("k", "v").key(), Some("k"));
    assert_eq!(Command::delete("d").key(), Some("d"));
    assert_eq!(Command::Usage.key(), None);
    assert_eq!(Command::Quit.key(), None);
}

#[test]
fn test_get_never_becomes_set() {
    // The verb alone decides the wire form
    let encoded = encode_command(&Command::get("foo")).unwrap();
    assert!(encoded.starts_with(b"GET "));
    assert_eq!(Command::get("foo").command_type(), CommandType::Get);
    assert_eq!(Command::delete("foo").command_type(), CommandType::Delete);
}

#[test]
fn test_encode_rejects_empty_key() {
    let result = encode_command(&Command::get(""));
    assert!(matches!(result, Err(BenchError::Protocol(_))));
}

#[test]
fn test_encode_rejects_key_with_whitespace() {
    let result = encode_command(&Command::set("two words", "v"));
    assert!(matches!(result, Err(BenchError::Protocol(_))));
}

#[test]
fn test_encode_rejects_value_with_newline() {
    let result = encode_command(&Command::set("k", "line\nbreak"));
    assert!(matches!(result, Err(BenchError::Protocol(_))));
}

#[test]
fn test_encode_rejects_non_utf8_value() {
    let result = encode_command(&Command::set("k", vec![0xff, 0xfe]));
    assert!(matches!(result, Err(BenchError::Protocol(_))));
}

// =============================================================================
// Command Decoding Tests
// =============================================================================

#[test]
fn test_decode_get() {
    assert_eq!(decode_command("GET foo").unwrap(), Command::get("foo"));
}

#[test]
fn test_decode_is_case_insensitive() {
    assert_eq!(decode_command("get foo\n").unwrap(), Command::get("foo"));
    assert_eq!(decode_command("Usage").unwrap(), Command::Usage);
}

#[test]
fn test_decode_set_value_with_spaces() {
    let command = decode_command("SET k v with spaces\n").unwrap();
    assert_eq!(command, Command::set("k", "v with spaces"));
}

#[test]
fn test_decode_set_key_only() {
    let command = decode_command("SET k").unwrap();
    assert_eq!(command, Command::set("k", Bytes::new()));
}

#[test]
fn test_decode_usage_and_quit() {
    assert_eq!(decode_command("USAGE").unwrap(), Command::Usage);
    assert_eq!(decode_command("QUIT").unwrap(), Command::Quit);
}

#[test]
fn test_decode_unknown_verb() {
    let result = decode_command("PUT k v");
    assert!(matches!(result, Err(BenchError::Protocol(_))));
}

#[test]
fn test_decode_missing_key() {
    assert!(matches!(decode_command("GET"), Err(BenchError::Protocol(_))));
    assert!(matches!(decode_command("SET"), Err(BenchError::Protocol(_))));
    assert!(matches!(decode_command("DELETE  "), Err(BenchError::Protocol(_))));
}

#[test]
fn test_decode_empty_line() {
    assert!(matches!(decode_command("\n"), Err(BenchError::Protocol(_))));
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_decode_value() {
    let response = decode_response("VALUE YmFy\n");
    assert_eq!(response, Response::Value(Bytes::from_static(b"bar")));
}

#[test]
fn test_decode_value_tolerates_trailing_whitespace() {
    let response = decode_response("VALUE YmFy  \r\n");
    assert_eq!(response, Response::Value(Bytes::from_static(b"bar")));
}

#[test]
fn test_decode_empty_value() {
    assert_eq!(decode_response("VALUE \n"), Response::Value(Bytes::new()));
}

#[test]
fn test_decode_malformed_base64_is_error() {
    let response = decode_response("VALUE !!!not-base64!!!\n");
    assert_eq!(response.status(), Status::Error);
}

#[test]
fn test_decode_not_found() {
    assert_eq!(decode_response("NOT_FOUND\n"), Response::NotFound);
}

#[test]
fn test_decode_ok_is_prefix_match() {
    assert_eq!(decode_response("OK\n"), Response::ok());
    assert_eq!(decode_response("OK 3\n"), Response::Ok("3".to_string()));
}

#[test]
fn test_decode_ok_lookalike_is_not_ok() {
    assert_eq!(decode_response("OKAY\n"), Response::Error("OKAY".to_string()));
}

#[test]
fn test_decode_usage() {
    assert_eq!(decode_response("USAGE 2097152\n"), Response::Usage(2_097_152));
}

#[test]
fn test_decode_malformed_usage_is_error() {
    assert!(decode_response("USAGE lots\n").is_error());
}

#[test]
fn test_decode_error_message() {
    assert_eq!(
        decode_response("ERROR unknown command\n"),
        Response::Error("unknown command".to_string())
    );
}

#[test]
fn test_decode_unknown_line_keeps_raw_text() {
    assert_eq!(
        decode_response("HELLO there\n"),
        Response::Error("HELLO there".to_string())
    );
}

#[test]
fn test_decode_empty_response_line() {
    assert!(decode_response("\n").is_error());
}

// =============================================================================
// Response Encoding Tests
// =============================================================================

#[test]
fn test_encode_responses() {
    assert_eq!(encode_response(&Response::ok()), b"OK\n");
    assert_eq!(encode_response(&Response::NotFound), b"NOT_FOUND\n");
    assert_eq!(encode_response(&Response::Usage(42)), b"USAGE 42\n");
    assert_eq!(
        encode_response(&Response::Value(Bytes::from_static(b"bar"))),
        b"VALUE YmFy\n"
    );
}

#[test]
fn test_encode_error_stays_on_one_line() {
    let encoded = encode_response(&Response::error("bad\nthing"));
    assert_eq!(encoded, b"ERROR bad thing\n");
}

#[test]
fn test_binary_payload_survives_value_response() {
    let payload: Vec<u8> = vec![0x00, 0x01, 0xff, 0x7f, 0x80, b'\n', b' '];
    let line = encode_response(&Response::Value(Bytes::from(payload.clone())));
    let decoded = decode_response(std::str::from_utf8(&line).unwrap());
    assert_eq!(decoded, Response::Value(Bytes::from(payload)));
}

// =============================================================================
// Stream Helper Tests
// =============================================================================

#[test]
fn test_write_then_read_command() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::set("k", "hello world")).unwrap();
    write_command(&mut buffer, &Command::Usage).unwrap();

    let mut reader = Cursor::new(buffer);
    assert_eq!(read_command(&mut reader).unwrap(), Command::set("k", "hello world"));
    assert_eq!(read_command(&mut reader).unwrap(), Command::Usage);
}

#[test]
fn test_read_responses_in_order() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::ok()).unwrap();
    write_response(&mut buffer, &Response::NotFound).unwrap();

    let mut reader = Cursor::new(buffer);
    assert_eq!(read_response(&mut reader).unwrap(), Response::ok());
    assert_eq!(read_response(&mut reader).unwrap(), Response::NotFound);
}

#[test]
fn test_read_response_at_eof() {
    let mut reader = Cursor::new(Vec::<u8>::new());
    let result = read_response(&mut reader);
    assert!(matches!(result, Err(BenchError::Io(_))));
}

#[test]
fn test_read_response_partial_line() {
    let mut reader = Cursor::new(b"VALUE YmF".to_vec());
    let result = read_response(&mut reader);
    assert!(matches!(result, Err(BenchError::Io(_))));
}

#[test]
fn test_read_response_non_utf8_is_error_response() {
    let mut reader = Cursor::new(vec![0xff, 0xfe, b'\n']);
    assert!(read_response(&mut reader).unwrap().is_error());
}

#[test]
fn test_write_command_rejects_before_writing() {
    let mut buffer = Vec::new();
    assert!(write_command(&mut buffer, &Command::get("")).is_err());
    assert!(buffer.is_empty());
}
