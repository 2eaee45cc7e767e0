//! In-memory transport for exercising the protocol without sockets.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::transport::{Connector, Transport};

#[derive(Debug, Default)]
pub struct Wire {
    /// Every `send` call as its own chunk, in order.
    pub sent: Vec<Vec<u8>>,
    pub inbound: VecDeque<u8>,
    pub close_calls: usize,
    pub closed: bool,
    pub fail_sends: bool,
}

/// Cloneable handle; clones share the same wire so tests can inspect it after
/// the session owning the transport is gone.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    wire: Arc<Mutex<Wire>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wire(&self) -> MutexGuard<'_, Wire> {
        self.wire.lock().unwrap()
    }

    /// Queues bytes the "server" will send.
    pub fn push_inbound(&self, bytes: &[u8]) {
        self.wire().inbound.extend(bytes.iter().copied());
    }

    /// Queues a delimited response such as `OK`.
    pub fn push_response(&self, token: &str) {
        self.push_inbound(token.as_bytes());
        self.push_inbound(&[crate::protocol::RESPONSE_DELIMITER]);
    }

    /// Queues a size-prefixed frame.
    pub fn push_frame(&self, frame_type: u32, data: &[u8]) {
        let size = (data.len() + 4) as u32;
        self.push_inbound(&size.to_be_bytes());
        self.push_inbound(&frame_type.to_be_bytes());
        self.push_inbound(data);
    }

    pub fn sent_chunks(&self) -> Vec<Vec<u8>> {
        self.wire().sent.clone()
    }

    pub fn written(&self) -> Vec<u8> {
        self.wire().sent.concat()
    }

    pub fn clear_sent(&self) {
        self.wire().sent.clear();
    }

    pub fn fail_sends(&self) {
        self.wire().fail_sends = true;
    }

    pub fn close_calls(&self) -> usize {
        self.wire().close_calls
    }
}

impl Transport for MockTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut wire = self.wire();
        if wire.closed {
            return Err(io::ErrorKind::NotConnected.into());
        }
        if wire.fail_sends {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        wire.sent.push(bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, len: usize, _timeout: Duration) -> io::Result<Option<Vec<u8>>> {
        let mut wire = self.wire();
        if wire.closed {
            return Err(io::ErrorKind::NotConnected.into());
        }
        let n = len.min(wire.inbound.len());
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(wire.inbound.drain(..n).collect()))
    }

    fn close(&mut self) {
        let mut wire = self.wire();
        wire.close_calls += 1;
        wire.closed = true;
    }
}

/// Hands out clones of one [`MockTransport`], or refuses to connect.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    pub transport: MockTransport,
    pub refuse: bool,
    pub opened: Arc<Mutex<Vec<(String, u16)>>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }
}

impl Connector for MockConnector {
    type Transport = MockTransport;

    fn open(&self, host: &str, port: u16, _timeout: Duration) -> io::Result<MockTransport> {
        self.opened.lock().unwrap().push((host.to_string(), port));
        if self.refuse {
            return Err(io::ErrorKind::ConnectionRefused.into());
        }
        Ok(self.transport.clone())
    }
}
