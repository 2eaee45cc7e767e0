use super::codec::{self, HEADER_LEN};
use super::{Message, encode};
use crate::utils::Error;
use chrono::{TimeZone, Utc};

const ID: &str = "0123456789abcdef00ff10e7a5c3b2d1";

#[test]
fn test_encode_layout() {
    let mut msg = Message::with_id(ID, b"hello".to_vec(), 0x1122_3344_5566_7788);
    for _ in 0..0x1234 {
        msg.increase_attempt_count();
    }

    let bytes = encode(&msg).unwrap();

    assert_eq!(bytes.len(), HEADER_LEN + 5);
    assert_eq!(
        &bytes[0..8],
        &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]
    );
    assert_eq!(&bytes[8..10], &[0x12, 0x34]);
    assert_eq!(
        &bytes[10..26],
        &[
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x00, 0xff, 0x10, 0xe7, 0xa5, 0xc3,
            0xb2, 0xd1
        ]
    );
    assert_eq!(&bytes[26..], b"hello");
}

#[test]
fn test_attempts_after_three_increments() {
    let mut msg = Message::new(b"xyz".to_vec(), 0.0);
    msg.increase_attempt_count();
    msg.increase_attempt_count();
    msg.increase_attempt_count();

    let bytes = encode(&msg).unwrap();
    assert_eq!(bytes.len(), 29);
    assert_eq!(&bytes[0..8], &[0; 8]);
    assert_eq!(&bytes[8..10], &[0, 3]);
    assert_eq!(&bytes[26..], b"xyz");
}

#[test]
fn test_empty_body_is_header_only() {
    let msg = Message::with_id(ID, Vec::new(), 7);
    let bytes = encode(&msg).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN);
    assert_eq!(&bytes[0..8], &7u64.to_be_bytes());
}

#[test]
fn test_non_hex_id_is_rejected() {
    let bad = "0123456789abcdef00ff10e7a5c3b2dg";
    let msg = Message::with_id(bad, b"body".to_vec(), 0);

    match encode(&msg) {
        Err(Error::InvalidMessage { id }) => assert_eq!(id, bad),
        other => panic!("expected InvalidMessage, got {:?}", other),
    }
}

#[test]
fn test_sign_prefixed_pair_is_rejected() {
    // "+f" parses as a radix-16 integer in std, but is not a hex pair
    let msg = Message::with_id("+f23456789abcdef00ff10e7a5c3b2d1", Vec::new(), 0);
    assert!(matches!(encode(&msg), Err(Error::InvalidMessage { .. })));
}

#[test]
fn test_wrong_length_id_is_rejected() {
    assert!(codec::decode_id("abcd").is_err());
    assert!(codec::decode_id(&format!("{ID}00")).is_err());
}

#[test]
fn test_uppercase_hex_decodes() {
    let upper = ID.to_uppercase();
    assert_eq!(
        codec::decode_id(&upper).unwrap(),
        codec::decode_id(ID).unwrap()
    );
}

#[test]
fn test_generated_ids_are_lowercase_hex_and_unique() {
    let a = Message::new(Vec::new(), 0.0);
    let b = Message::new(Vec::new(), 0.0);

    assert_eq!(a.id().len(), 32);
    assert!(
        a.id()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
    assert_ne!(a.id(), b.id());
    assert!(encode(&a).is_ok());
}

#[test]
fn test_fractional_seconds_become_nanoseconds() {
    let msg = Message::new(Vec::new(), 1.5);
    assert_eq!(msg.timestamp(), 1_500_000_000);

    let negative = Message::new(Vec::new(), -3.0);
    assert_eq!(negative.timestamp(), 0);
}

#[test]
fn test_at_keeps_nanosecond_precision() {
    let time = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    let msg = Message::at(b"x".to_vec(), time);
    assert_eq!(msg.timestamp(), 1_700_000_000_123_456_789);
}

#[test]
fn test_attempts_saturate() {
    let mut msg = Message::new(Vec::new(), 0.0);
    for _ in 0..=u16::MAX as u32 {
        msg.increase_attempt_count();
    }
    assert_eq!(msg.attempts(), u16::MAX);
}
