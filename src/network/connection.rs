//! Store Connection
//!
//! One persistent client connection to the store.

use std::io::{self, BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

/// A single client connection to the store
///
/// Owned by exactly one phase. Dropping the connection performs the same
/// best-effort QUIT as [`Connection::close`].
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Set once QUIT has been attempted
    closed: bool,
}

impl Connection {
    /// Open a connection to the store named by `config`
    ///
    /// The connect attempt is bounded by the read timeout. Disables Nagle's
    /// algorithm so single-line requests go out immediately, and applies the
    /// configured read and write timeouts.
    pub fn connect(config: &Config) -> Result<Self> {
        let addr = config.addr();
        let context = format!("connect to {}", addr);
        let stream = Self::connect_any(&addr, config.read_timeout())
            .map_err(|e| BenchError::from_socket(&context, e))?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(config.read_timeout()))?;
        stream.set_write_timeout(Some(config.write_timeout()))?;

        Self::from_stream(stream, addr)
    }

    /// Try every resolved address in turn, keeping the last failure
    fn connect_any(addr: &str, timeout: Duration) -> io::Result<TcpStream> {
        let mut last_err = None;
        for sock_addr in addr.to_socket_addrs()? {
            match TcpStream::connect_timeout(&sock_addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no addresses resolved")
        }))
    }

    fn from_stream(stream: TcpStream, peer_addr: String) -> Result<Self> {
        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            closed: false,
        })
    }

    /// Send one command and wait for its response
    ///
    /// Exactly one response line is read per command. Socket failures and
    /// timeouts become `BenchError::Connection`; a response the codec cannot
    /// make sense of comes back as `Response::Error`.
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        if self.closed {
            return Err(BenchError::Connection(format!(
                "connection to {} already closed",
                self.peer_addr
            )));
        }

        write_command(&mut self.writer, command).map_err(|e| self.classify("send", e))?;

        if !command.expects_response() {
            self.closed = true;
            return Ok(Response::ok());
        }

        let response = read_response(&mut self.reader).map_err(|e| self.classify("receive", e))?;
        tracing::trace!(
            key = command.key().unwrap_or("-"),
            "{} -> {:?}",
            command.command_type(),
            response.status()
        );
        Ok(response)
    }

    /// Close the connection, sending QUIT first if possible
    ///
    /// A failed QUIT is ignored; the socket is released either way.
    pub fn close(mut self) {
        self.quit();
    }

    fn quit(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = write_command(&mut self.writer, &Command::Quit) {
            tracing::debug!("QUIT to {} failed: {}", self.peer_addr, e);
        }
        tracing::debug!("Closed connection to {}", self.peer_addr);
    }

    /// Turn stream I/O failures into connection errors
    fn classify(&self, context: &str, err: BenchError) -> BenchError {
        match err {
            BenchError::Io(io_err) => {
                BenchError::from_socket(&format!("{} ({})", context, self.peer_addr), io_err)
            }
            other => other,
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.quit();
    }
}
