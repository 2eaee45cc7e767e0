use std::time::Duration;

use serde::Deserialize;

use crate::protocol::ResponseFraming;

/// Top-level configuration for a session.
///
/// Read once at construction; a `Session` never mutates it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub client: ClientSettings,
    pub protocol: ProtocolSettings,
}

/// Where to connect.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub connect_timeout_ms: u64,
}

/// Values announced to the server in the IDENTIFY payload.
///
/// `msg_timeout` doubles as the per-read timeout while waiting for a response.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientSettings {
    pub client_id: String,
    pub hostname: String,
    pub output_buffer_size: i64,
    pub output_buffer_timeout: i64,
    pub msg_timeout: u64,
    pub tls_v1: bool,
    pub snappy: bool,
    pub deflate: bool,
    pub deflate_level: Option<u8>,
    pub sample_rate: Option<u8>,
}

/// Wire-level switches. Defaults send the full IDENTIFY body and read
/// delimited responses.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProtocolSettings {
    pub response_framing: ResponseFraming,
    /// Send the IDENTIFY JSON after its length prefix.
    pub send_identify_body: bool,
    /// Wait for and check the server's answer to IDENTIFY.
    pub read_identify_response: bool,
}

impl Settings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.server.connect_timeout_ms)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.client.msg_timeout)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub client: Option<PartialClientSettings>,
    pub protocol: Option<PartialProtocolSettings>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub connect_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialClientSettings {
    pub client_id: Option<String>,
    pub hostname: Option<String>,
    pub output_buffer_size: Option<i64>,
    pub output_buffer_timeout: Option<i64>,
    pub msg_timeout: Option<u64>,
    pub tls_v1: Option<bool>,
    pub snappy: Option<bool>,
    pub deflate: Option<bool>,
    pub deflate_level: Option<u8>,
    pub sample_rate: Option<u8>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PartialProtocolSettings {
    pub response_framing: Option<ResponseFraming>,
    pub send_identify_body: Option<bool>,
    pub read_identify_response: Option<bool>,
}

impl PartialSettings {
    /// Overlays whatever was provided on top of `default`.
    pub fn merge(self, default: Settings) -> Settings {
        let server = self.server.unwrap_or_default();
        let client = self.client.unwrap_or_default();
        let protocol = self.protocol.unwrap_or_default();

        Settings {
            server: ServerSettings {
                host: server.host.unwrap_or(default.server.host),
                port: server.port.unwrap_or(default.server.port),
                connect_timeout_ms: server
                    .connect_timeout_ms
                    .unwrap_or(default.server.connect_timeout_ms),
            },
            client: ClientSettings {
                client_id: client.client_id.unwrap_or(default.client.client_id),
                hostname: client.hostname.unwrap_or(default.client.hostname),
                output_buffer_size: client
                    .output_buffer_size
                    .unwrap_or(default.client.output_buffer_size),
                output_buffer_timeout: client
                    .output_buffer_timeout
                    .unwrap_or(default.client.output_buffer_timeout),
                msg_timeout: client.msg_timeout.unwrap_or(default.client.msg_timeout),
                tls_v1: client.tls_v1.unwrap_or(default.client.tls_v1),
                snappy: client.snappy.unwrap_or(default.client.snappy),
                deflate: client.deflate.unwrap_or(default.client.deflate),
                deflate_level: client.deflate_level.or(default.client.deflate_level),
                sample_rate: client.sample_rate.or(default.client.sample_rate),
            },
            protocol: ProtocolSettings {
                response_framing: protocol
                    .response_framing
                    .unwrap_or(default.protocol.response_framing),
                send_identify_body: protocol
                    .send_identify_body
                    .unwrap_or(default.protocol.send_identify_body),
                read_identify_response: protocol
                    .read_identify_response
                    .unwrap_or(default.protocol.read_identify_response),
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 4150,
                connect_timeout_ms: 300_000,
            },
            client: ClientSettings {
                client_id: "nsqlink".to_string(),
                hostname: "localhost".to_string(),
                output_buffer_size: 16 * 1024,
                output_buffer_timeout: 250,
                msg_timeout: 60_000,
                tls_v1: false,
                snappy: false,
                deflate: false,
                deflate_level: None,
                sample_rate: None,
            },
            protocol: ProtocolSettings {
                response_framing: ResponseFraming::Delimited,
                send_identify_body: true,
                read_identify_response: false,
            },
        }
    }
}
