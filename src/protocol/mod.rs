//! The `protocol` module holds the wire-level pieces of the V2 protocol:
//! the version preamble, command lines, 4-byte length prefixes and the
//! interpretation of responses.
//!
//! Command lines are ASCII, space-separated and `\n`-terminated. Binary
//! sections (the IDENTIFY body and a PUB envelope) are preceded by their
//! length as a big-endian `u32`.

pub mod command;
pub mod response;

pub use command::Command;
pub use response::{Frame, FrameType, ResponseCode, ResponseFraming};

use crate::utils::{Error, Result};

/// Version preamble sent once, before any command.
pub const MAGIC_V2: &[u8; 4] = b"  V2";

/// Byte terminating a response in delimited framing.
pub const RESPONSE_DELIMITER: u8 = 0x10;

/// Largest size-prefixed frame accepted from the server.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Big-endian `u32` length prefix for a binary section of `len` bytes.
pub fn length_prefix(len: usize) -> Result<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| Error::PayloadTooLarge { size: len })
}
