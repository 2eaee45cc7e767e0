//! The `error` module defines the error type shared by every part of `nsqlink`.
//!
//! Transport failures, server rejections and local encoding problems all end
//! up in [`Error`], so callers can match on a single enum regardless of which
//! command failed.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not be opened.
    #[error("unable to connect: {0}")]
    Connection(#[source] io::Error),

    /// A send or receive failed on an already open transport.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Server answered `E_INVALID`.
    #[error("server rejected the request as invalid")]
    InvalidRequest,

    /// Server answered `E_BAD_TOPIC`.
    #[error("server rejected the topic name")]
    BadTopic,

    /// Server answered `E_BAD_CHANNEL`.
    #[error("server rejected the channel name")]
    BadChannel,

    /// Server answered `E_BAD_MESSAGE`.
    #[error("server rejected the message")]
    BadMessage,

    /// Server answered `E_PUB_FAILED`.
    #[error("server failed to publish the message")]
    PublishFailed,

    /// Response bytes were present but not recognised.
    #[error("unexpected response: {0:?}")]
    UnexpectedResponse(String),

    /// The message identifier is not 32 hexadecimal digits.
    #[error("invalid message id: {id:?}")]
    InvalidMessage { id: String },

    /// The session was already torn down.
    #[error("connection closed")]
    ConnectionClosed,

    /// The command exists in the protocol but this client does not implement it.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// A length-prefixed body does not fit the 4-byte size field.
    #[error("payload too large: {size} bytes")]
    PayloadTooLarge { size: usize },

    /// The IDENTIFY payload could not be encoded as JSON.
    #[error("failed to serialize identify payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// `true` for the errors reported by the server in a response token.
    pub fn is_server_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest
                | Self::BadTopic
                | Self::BadChannel
                | Self::BadMessage
                | Self::PublishFailed
        )
    }
}
