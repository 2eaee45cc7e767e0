use crate::envelope::Message;
use crate::utils::{Error, Result};

/// Raw identifier length once the hex form is decoded.
pub const ID_LEN: usize = 16;

/// Fixed bytes preceding the body: timestamp (8) + attempts (2) + id (16).
pub const HEADER_LEN: usize = 8 + 2 + ID_LEN;

/// Encodes `message` into the layout the server expects inside a `PUB` body:
///
/// ```text
/// [timestamp:u64 BE][attempts:u16 BE][id:16 raw bytes][body...]
/// ```
///
/// The identifier is decoded before anything is written, so a malformed id
/// yields [`Error::InvalidMessage`] and no bytes at all.
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    let id = decode_id(message.id())?;

    let mut buf = Vec::with_capacity(HEADER_LEN + message.body().len());
    buf.extend_from_slice(&message.timestamp().to_be_bytes());
    buf.extend_from_slice(&message.attempts().to_be_bytes());
    buf.extend_from_slice(&id);
    buf.extend_from_slice(message.body());
    Ok(buf)
}

/// Decodes a 32-digit hex identifier two digits at a time.
pub fn decode_id(id: &str) -> Result<[u8; ID_LEN]> {
    let invalid = || Error::InvalidMessage { id: id.to_string() };

    let digits = id.as_bytes();
    if digits.len() != ID_LEN * 2 {
        return Err(invalid());
    }

    let mut out = [0u8; ID_LEN];
    for (slot, pair) in out.iter_mut().zip(digits.chunks_exact(2)) {
        let hi = hex_value(pair[0]).ok_or_else(invalid)?;
        let lo = hex_value(pair[1]).ok_or_else(invalid)?;
        *slot = (hi << 4) | lo;
    }
    Ok(out)
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
