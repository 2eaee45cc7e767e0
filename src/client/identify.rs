use serde::{Deserialize, Serialize};

use crate::config::ClientSettings;

/// Value of `user_agent` in every IDENTIFY payload.
pub const USER_AGENT: &str = concat!("nsqlink/", env!("CARGO_PKG_VERSION"));

/// JSON body sent after `IDENTIFY`.
///
/// `deflate_level` is only present when deflate is on and a level was
/// configured; `sample_rate` only when configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifyPayload {
    pub client_id: String,
    pub hostname: String,
    pub feature_negotiation: bool,
    pub output_buffer_size: i64,
    pub output_buffer_timeout: i64,
    pub tls_v1: bool,
    pub snappy: bool,
    pub deflate: bool,
    pub user_agent: String,
    pub msg_timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deflate_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u8>,
}

impl IdentifyPayload {
    pub fn from_settings(client: &ClientSettings) -> Self {
        Self {
            client_id: client.client_id.clone(),
            hostname: client.hostname.clone(),
            feature_negotiation: true,
            output_buffer_size: client.output_buffer_size,
            output_buffer_timeout: client.output_buffer_timeout,
            tls_v1: client.tls_v1,
            snappy: client.snappy,
            deflate: client.deflate,
            user_agent: USER_AGENT.to_string(),
            msg_timeout: client.msg_timeout,
            deflate_level: client.deflate_level.filter(|_| client.deflate),
            sample_rate: client.sample_rate,
        }
    }
}

/// Features the server reports back after a negotiated IDENTIFY.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IdentifyResponse {
    pub max_rdy_count: Option<i64>,
    pub version: Option<String>,
    pub max_msg_timeout: Option<u64>,
    pub msg_timeout: Option<u64>,
    pub tls_v1: Option<bool>,
    pub deflate: Option<bool>,
    pub deflate_level: Option<u8>,
    pub max_deflate_level: Option<u8>,
    pub snappy: Option<bool>,
    pub sample_rate: Option<u8>,
    pub auth_required: Option<bool>,
    pub output_buffer_size: Option<i64>,
    pub output_buffer_timeout: Option<i64>,
}
