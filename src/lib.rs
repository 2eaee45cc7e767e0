//! # nsqlink
//!
//! `nsqlink` is a small, blocking client for the NSQ V2 TCP protocol. It owns
//! a single connection, performs the version/IDENTIFY handshake, and sends
//! line-oriented commands plus the binary message envelope used by `PUB`.
//!
//! ## Core Modules
//!
//! - `client`: The protocol session (`Session`) and the `Connection` command trait.
//! - `envelope`: The publishable `Message` and its binary encoding.
//! - `protocol`: Command lines, length prefixes and response interpretation.
//! - `transport`: The byte-stream boundary and its TCP implementation.
//! - `config`: Loading `Settings` from files and environment variables.
//! - `utils`: The crate error type and logging bootstrap.
//!
//! ## Example
//!
//! ```no_run
//! use nsqlink::client::{Connection, Session};
//! use nsqlink::config::Settings;
//! use nsqlink::envelope::Message;
//!
//! let mut session = Session::connect(Settings::default())?;
//! session.publish("events", &Message::now(b"hello".to_vec()))?;
//! session.close();
//! # Ok::<(), nsqlink::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod protocol;
pub mod transport;
pub mod utils;

pub use utils::{Error, Result};

#[cfg(test)]
mod test_util;
