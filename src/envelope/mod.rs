//! The `envelope` module defines the publishable [`Message`] and the binary
//! envelope it travels in inside a `PUB` command.
//!
//! Encoding is a pure function of the message; nothing here touches the
//! network.

pub mod codec;
pub mod message;

pub use codec::encode;
pub use message::Message;

#[cfg(test)]
mod tests;
