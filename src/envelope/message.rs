use chrono::{DateTime, Utc};
use uuid::Uuid;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// A single unit of data to publish.
///
/// The identifier is generated on construction and never changes. The attempt
/// count starts at zero and only moves through [`Message::increase_attempt_count`].
///
/// # Example
///
/// ```rust
/// use nsqlink::envelope::Message;
///
/// let mut msg = Message::new(b"xyz".to_vec(), 0.0);
/// msg.increase_attempt_count();
/// assert_eq!(msg.attempts(), 1);
/// assert_eq!(msg.id().len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: String,
    timestamp: u64,
    attempts: u16,
    body: Vec<u8>,
}

impl Message {
    /// Creates a message stamped with `timestamp`, given in seconds since the
    /// Unix epoch with a fractional part. Scaled by 1e9 and stored as
    /// nanoseconds, which is what the server expects; older clients scaled by
    /// 10 000 instead. Negative or non-finite input becomes 0.
    pub fn new(body: impl Into<Vec<u8>>, timestamp: f64) -> Self {
        // float-to-int casts saturate, NaN maps to 0
        let nanos = (timestamp * NANOS_PER_SEC) as u64;
        Self::with_timestamp(body.into(), nanos)
    }

    /// Creates a message stamped with the current time.
    pub fn now(body: impl Into<Vec<u8>>) -> Self {
        Self::at(body, Utc::now())
    }

    /// Creates a message stamped with `time` at full nanosecond precision.
    pub fn at(body: impl Into<Vec<u8>>, time: DateTime<Utc>) -> Self {
        let nanos = time
            .timestamp_nanos_opt()
            .map_or(0, |n| u64::try_from(n).unwrap_or(0));
        Self::with_timestamp(body.into(), nanos)
    }

    fn with_timestamp(body: Vec<u8>, timestamp: u64) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            timestamp,
            attempts: 0,
            body,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_id(id: &str, body: impl Into<Vec<u8>>, timestamp: u64) -> Self {
        Self {
            id: id.to_string(),
            timestamp,
            attempts: 0,
            body: body.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Nanoseconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn attempts(&self) -> u16 {
        self.attempts
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Bumps the attempt count by one, saturating at `u16::MAX`.
    pub fn increase_attempt_count(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }
}
