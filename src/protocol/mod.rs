//! Protocol Module
//!
//! Defines the Blink Store wire protocol.
//!
//! ## Protocol Format (line oriented, UTF-8)
//!
//! Every request and every response is exactly one `\n`-terminated line.
//! Requests are strictly sequential: one response follows each request
//! before the next request may be sent.
//!
//! ### Requests
//! ```text
//! GET <key>
//! SET <key> <value...>     value = verbatim remainder of the line
//! DELETE <key>
//! USAGE
//! QUIT                     no response, the store closes the connection
//! ```
//!
//! ### Responses
//! ```text
//! OK[ <detail>]            SET / DELETE success
//! VALUE <base64>           GET hit, payload is base64 of the stored bytes
//! NOT_FOUND                GET / DELETE miss
//! USAGE <bytes>            bytes currently held by the store
//! ERROR <message>          protocol or application error
//! ```

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{encode_command, decode_command, encode_response, decode_response};
pub use codec::{read_command, write_command, read_response, write_response, MAX_LINE_LEN};
