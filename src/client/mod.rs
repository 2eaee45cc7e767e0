//! The `client` module is the protocol session: one connection, the
//! handshake, and one method per command.
//!
//! Commands are exposed through the [`Connection`] trait so that a pooled or
//! multi-connection wrapper can offer the same surface later; [`Session`] is
//! the single-connection implementation.

pub mod identify;
pub mod session;

pub use identify::{IdentifyPayload, IdentifyResponse};
pub use session::{Session, SessionState};

use std::time::Duration;

use crate::envelope::Message;
use crate::utils::Result;

/// Commands available on an open connection.
///
/// Every method blocks until the command is written and, for `subscribe` and
/// `publish`, until the server's response is read. Nothing is retried.
pub trait Connection {
    /// `SUB <topic> <channel>`.
    fn subscribe(&mut self, topic: &str, channel: &str) -> Result<()>;

    /// `PUB <topic>` followed by the length-prefixed envelope of `message`.
    fn publish(&mut self, topic: &str, message: &Message) -> Result<()>;

    /// Publishes each message in order; the first failure stops the rest.
    fn publish_many(&mut self, topic: &str, messages: &[Message]) -> Result<()> {
        for message in messages {
            self.publish(topic, message)?;
        }
        Ok(())
    }

    /// `RDY <count>`.
    fn ready(&mut self, count: u64) -> Result<()>;

    /// `FIN <message_id>`.
    fn finish(&mut self, message_id: &str) -> Result<()>;

    /// `TOUCH <message_id>`.
    fn touch(&mut self, message_id: &str) -> Result<()>;

    /// `NOP`.
    fn noop(&mut self) -> Result<()>;

    /// Not supported by this client.
    fn requeue(&mut self, message_id: &str, timeout: Duration) -> Result<()>;

    /// Not supported by this client.
    fn authenticate(&mut self) -> Result<()>;

    /// Best-effort `CLS`, then releases the connection. Never fails.
    fn close(&mut self);
}
