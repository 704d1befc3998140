//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Chat message kind as it appears in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Text,
    Image,
    System,
}

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Explicit registration of a display name
    Register(String),
    /// Chat message to relay
    Message(InboundChatPayload),
}

/// Chat payload sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundChatPayload {
    pub username: String,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Relayed chat message
    Message(OutboundChatPayload),
    /// Presence update
    Presence(PresencePayload),
    /// Rejection of the receiving client's last frame
    Error(ErrorPayload),
}

/// Chat payload broadcast by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundChatPayload {
    pub username: String,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Server receipt time, `HH:MM`
    pub timestamp: String,
}

/// Presence payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub count: usize,
    pub users: Vec<String>,
}

/// Error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub reason: String,
}
