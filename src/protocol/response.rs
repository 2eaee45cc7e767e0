use std::fmt;
use std::io;
use std::time::Duration;

use serde::Deserialize;

use super::{MAX_FRAME_SIZE, RESPONSE_DELIMITER};
use crate::transport::Transport;
use crate::utils::{Error, Result};

/// How a response is delimited on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFraming {
    /// Bytes up to and including a `0x10` delimiter.
    #[default]
    Delimited,
    /// `[size:u32 BE][frame_type:u32 BE][data]`, size covering type and data.
    SizePrefixed,
}

/// Token returned by the server after `SUB`, `PUB` or `IDENTIFY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    Ok,
    Invalid,
    BadTopic,
    BadChannel,
    BadMessage,
    PubFailed,
    /// Anything else, kept as (lossy) text for diagnostics.
    Unexpected(String),
}

impl ResponseCode {
    /// Classifies raw response bytes.
    ///
    /// A trailing delimiter is ignored and the remaining text must be exactly
    /// one of the known tokens. Non-UTF-8 input is `Unexpected`.
    pub fn classify(bytes: &[u8]) -> Self {
        let bytes = bytes.strip_suffix(&[RESPONSE_DELIMITER]).unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::from_token(text),
            Err(_) => Self::Unexpected(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// Classifies the data of a size-prefixed error frame, which carries the
    /// token followed by a free-form detail message.
    pub fn classify_error_frame(data: &[u8]) -> Self {
        let Ok(text) = std::str::from_utf8(data) else {
            return Self::Unexpected(String::from_utf8_lossy(data).into_owned());
        };

        match Self::from_token(text.split(' ').next().unwrap_or_default()) {
            // an error frame never signals success
            Self::Ok => Self::Unexpected(text.to_string()),
            Self::Unexpected(_) => Self::Unexpected(text.to_string()),
            code => code,
        }
    }

    fn from_token(text: &str) -> Self {
        match text {
            "OK" => Self::Ok,
            "E_INVALID" => Self::Invalid,
            "E_BAD_TOPIC" => Self::BadTopic,
            "E_BAD_CHANNEL" => Self::BadChannel,
            "E_BAD_MESSAGE" => Self::BadMessage,
            "E_PUB_FAILED" => Self::PubFailed,
            _ => Self::Unexpected(text.to_string()),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Ok => "OK",
            Self::Invalid => "E_INVALID",
            Self::BadTopic => "E_BAD_TOPIC",
            Self::BadChannel => "E_BAD_CHANNEL",
            Self::BadMessage => "E_BAD_MESSAGE",
            Self::PubFailed => "E_PUB_FAILED",
            Self::Unexpected(text) => text.as_str(),
        };
        f.write_str(token)
    }
}

/// Frame type tag of a size-prefixed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Response,
    Error,
    Message,
}

impl FrameType {
    pub fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Response),
            1 => Some(Self::Error),
            2 => Some(Self::Message),
            _ => None,
        }
    }
}

/// A size-prefixed frame read from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameType,
    pub data: Vec<u8>,
}

/// Reads one byte at a time until the delimiter, which is kept in the
/// returned buffer. Gives up once more than `MAX_FRAME_SIZE` bytes arrive
/// without a delimiter.
pub fn read_delimited<T: Transport + ?Sized>(
    transport: &mut T,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    loop {
        let chunk = match transport.read(1, timeout)? {
            Some(chunk) if !chunk.is_empty() => chunk,
            _ => return Err(timed_out()),
        };
        for b in chunk {
            bytes.push(b);
            if b == RESPONSE_DELIMITER {
                return Ok(bytes);
            }
        }
        if bytes.len() > MAX_FRAME_SIZE {
            return Err(Error::UnexpectedResponse(format!(
                "no delimiter within {MAX_FRAME_SIZE} bytes"
            )));
        }
    }
}

/// Reads one `[size][frame_type][data]` frame.
pub fn read_frame<T: Transport + ?Sized>(transport: &mut T, timeout: Duration) -> Result<Frame> {
    let size = read_u32(transport, timeout)? as usize;
    if !(4..=MAX_FRAME_SIZE).contains(&size) {
        return Err(Error::UnexpectedResponse(format!("frame size {size}")));
    }

    let tag = read_u32(transport, timeout)?;
    let kind = FrameType::from_u32(tag)
        .ok_or_else(|| Error::UnexpectedResponse(format!("frame type {tag}")))?;
    let data = read_exact(transport, size - 4, timeout)?;
    Ok(Frame { kind, data })
}

fn read_u32<T: Transport + ?Sized>(transport: &mut T, timeout: Duration) -> Result<u32> {
    let bytes = read_exact(transport, 4, timeout)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_exact<T: Transport + ?Sized>(
    transport: &mut T,
    len: usize,
    timeout: Duration,
) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len);
    while buf.len() < len {
        match transport.read(len - buf.len(), timeout)? {
            Some(chunk) if !chunk.is_empty() => buf.extend_from_slice(&chunk),
            _ => return Err(timed_out()),
        }
    }
    Ok(buf)
}

fn timed_out() -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::TimedOut,
        "no response within message timeout",
    ))
}
