use std::time::Duration;

use tracing::{debug, trace, warn};

use super::Connection;
use super::identify::{IdentifyPayload, IdentifyResponse};
use crate::config::Settings;
use crate::envelope::{self, Message};
use crate::protocol::response::{read_delimited, read_frame};
use crate::protocol::{
    self, Command, Frame, FrameType, MAGIC_V2, ResponseCode, ResponseFraming,
};
use crate::transport::{Connector, TcpConnector, TcpTransport, Transport};
use crate::utils::{Error, Result};

/// Whether a session still accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// One live connection to a server.
///
/// Constructed by [`Session::connect`], which performs the handshake; dropped
/// or [closed](Connection::close) exactly once. A session has no internal
/// locking: share it across threads behind a `Mutex`.
#[derive(Debug)]
pub struct Session<T: Transport = TcpTransport> {
    settings: Settings,
    /// `None` once the transport has been released.
    transport: Option<T>,
    negotiated: Option<IdentifyResponse>,
}

impl Session<TcpTransport> {
    /// Opens a TCP connection to `settings.server` and performs the handshake.
    pub fn connect(settings: Settings) -> Result<Self> {
        Self::connect_with(&TcpConnector, settings)
    }
}

impl<T: Transport> Session<T> {
    /// Opens a transport through `connector` and performs the handshake:
    /// version preamble, `IDENTIFY`, then the length-prefixed JSON payload.
    pub fn connect_with<C>(connector: &C, settings: Settings) -> Result<Self>
    where
        C: Connector<Transport = T>,
    {
        let transport = connector
            .open(
                &settings.server.host,
                settings.server.port,
                settings.connect_timeout(),
            )
            .map_err(Error::Connection)?;
        debug!(
            "connected to {}:{}",
            settings.server.host, settings.server.port
        );

        let mut session = Self {
            settings,
            transport: Some(transport),
            negotiated: None,
        };
        session.handshake()?;
        Ok(session)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        if self.transport.is_some() {
            SessionState::Open
        } else {
            SessionState::Closed
        }
    }

    /// Features reported by the server, when the handshake was configured to
    /// read them and the server answered with JSON.
    pub fn negotiated(&self) -> Option<&IdentifyResponse> {
        self.negotiated.as_ref()
    }

    fn handshake(&mut self) -> Result<()> {
        self.send(MAGIC_V2)?;
        self.send_command(Command::Identify)?;

        let payload = IdentifyPayload::from_settings(&self.settings.client);
        let body = serde_json::to_vec(&payload)?;
        self.send(&protocol::length_prefix(body.len())?)?;
        if self.settings.protocol.send_identify_body {
            self.send(&body)?;
        }

        if self.settings.protocol.read_identify_response {
            let frame = self.read_response()?;
            self.negotiated = parse_identify_response(&frame)?;
            if let Some(features) = &self.negotiated {
                debug!("negotiated features: {:?}", features);
                if features.auth_required == Some(true) {
                    warn!("server requires AUTH, which this client does not implement");
                }
            }
        }

        debug!("handshake complete");
        Ok(())
    }

    fn transport_mut(&mut self) -> Result<&mut T> {
        self.transport.as_mut().ok_or(Error::ConnectionClosed)
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state() {
            SessionState::Open => Ok(()),
            SessionState::Closed => Err(Error::ConnectionClosed),
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.transport_mut()?.send(bytes)?;
        Ok(())
    }

    fn send_command(&mut self, command: Command<'_>) -> Result<()> {
        trace!("> {}", command);
        self.transport_mut()?.send_text(&command.line())?;
        Ok(())
    }

    /// Reads one response with the configured framing. Delimited replies
    /// come back as response frames.
    fn read_response(&mut self) -> Result<Frame> {
        let timeout = self.settings.message_timeout();
        let framing = self.settings.protocol.response_framing;
        let transport = self.transport_mut()?;

        match framing {
            ResponseFraming::Delimited => Ok(Frame {
                kind: FrameType::Response,
                data: read_delimited(transport, timeout)?,
            }),
            ResponseFraming::SizePrefixed => {
                let frame = read_frame(transport, timeout)?;
                match frame.kind {
                    FrameType::Response | FrameType::Error => Ok(frame),
                    FrameType::Message => Err(Error::UnexpectedResponse(
                        "message frame while awaiting a response".to_string(),
                    )),
                }
            }
        }
    }

    fn read_code(&mut self) -> Result<ResponseCode> {
        let frame = self.read_response()?;
        let code = classify_frame(&frame);
        trace!("< {}", code);
        Ok(code)
    }
}

impl<T: Transport> Connection for Session<T> {
    fn subscribe(&mut self, topic: &str, channel: &str) -> Result<()> {
        self.send_command(Command::Subscribe { topic, channel })?;

        match self.read_code()? {
            ResponseCode::Ok => Ok(()),
            ResponseCode::Invalid => Err(Error::InvalidRequest),
            ResponseCode::BadTopic => Err(Error::BadTopic),
            ResponseCode::BadChannel => Err(Error::BadChannel),
            other => Err(Error::UnexpectedResponse(other.to_string())),
        }
    }

    fn publish(&mut self, topic: &str, message: &Message) -> Result<()> {
        self.ensure_open()?;
        // encode first so a bad id never leaves a half-written PUB
        let envelope = envelope::encode(message)?;
        let prefix = protocol::length_prefix(envelope.len())?;

        self.send_command(Command::Publish { topic })?;
        self.send(&prefix)?;
        self.send(&envelope)?;

        match self.read_code()? {
            ResponseCode::Ok => Ok(()),
            ResponseCode::Invalid => Err(Error::InvalidRequest),
            ResponseCode::BadTopic => Err(Error::BadTopic),
            ResponseCode::BadMessage => Err(Error::BadMessage),
            ResponseCode::PubFailed => Err(Error::PublishFailed),
            other => Err(Error::UnexpectedResponse(other.to_string())),
        }
    }

    fn ready(&mut self, count: u64) -> Result<()> {
        self.send_command(Command::Ready(count))
    }

    fn finish(&mut self, message_id: &str) -> Result<()> {
        self.send_command(Command::Finish(message_id))
    }

    fn touch(&mut self, message_id: &str) -> Result<()> {
        self.send_command(Command::Touch(message_id))
    }

    fn noop(&mut self) -> Result<()> {
        self.send_command(Command::Nop)
    }

    fn requeue(&mut self, _message_id: &str, _timeout: Duration) -> Result<()> {
        self.ensure_open()?;
        Err(Error::NotImplemented("REQ"))
    }

    fn authenticate(&mut self) -> Result<()> {
        self.ensure_open()?;
        Err(Error::NotImplemented("AUTH"))
    }

    fn close(&mut self) {
        let Some(mut transport) = self.transport.take() else {
            return;
        };

        if let Err(e) = transport.send_text(&Command::Close.line()) {
            debug!("ignoring CLS failure during close: {}", e);
        }
        transport.close();
        debug!("session closed");
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Error frames match on their leading token; everything else must be an
/// exact token.
fn classify_frame(frame: &Frame) -> ResponseCode {
    match frame.kind {
        FrameType::Error => ResponseCode::classify_error_frame(&frame.data),
        _ => ResponseCode::classify(&frame.data),
    }
}

/// `OK`, a JSON feature object, or a rejection.
fn parse_identify_response(frame: &Frame) -> Result<Option<IdentifyResponse>> {
    let data: &[u8] = &frame.data;
    let trimmed = data
        .strip_suffix(&[protocol::RESPONSE_DELIMITER])
        .unwrap_or(data);
    if frame.kind == FrameType::Response && trimmed.first() == Some(&b'{') {
        return serde_json::from_slice(trimmed)
            .map(Some)
            .map_err(|_| Error::UnexpectedResponse(String::from_utf8_lossy(trimmed).into_owned()));
    }

    match classify_frame(frame) {
        ResponseCode::Ok => Ok(None),
        ResponseCode::Invalid => Err(Error::InvalidRequest),
        other => Err(Error::UnexpectedResponse(other.to_string())),
    }
}
