//! The `transport` module is the boundary between the protocol session and
//! the byte stream it runs over.
//!
//! A [`Connector`] opens a [`Transport`]; the session only ever talks to the
//! transport through these two traits, which keeps the protocol logic
//! testable against an in-memory stream. [`TcpConnector`] is the production
//! implementation over a blocking `std::net::TcpStream`.

pub mod tcp;

use std::io;
use std::time::Duration;

pub use tcp::{TcpConnector, TcpTransport};

/// Opens transports to a `host:port`.
pub trait Connector {
    type Transport: Transport;

    /// Opens a connection, failing if it cannot be established within `timeout`.
    fn open(&self, host: &str, port: u16, timeout: Duration) -> io::Result<Self::Transport>;
}

/// A connected, blocking byte stream.
pub trait Transport {
    /// Writes all of `bytes`.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Writes `text` as UTF-8.
    fn send_text(&mut self, text: &str) -> io::Result<()> {
        self.send(text.as_bytes())
    }

    /// Reads at most `len` bytes, waiting up to `timeout`.
    ///
    /// `Ok(None)` means nothing arrived in time; it is not an error.
    fn read(&mut self, len: usize, timeout: Duration) -> io::Result<Option<Vec<u8>>>;

    /// Releases the connection. Calling it again has no effect.
    fn close(&mut self);
}
