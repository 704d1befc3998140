//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    ChatMessage, DisplayName, IncomingMessage, MessageBody, Notification, PayloadError,
    PresenceSnapshot,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::InboundChatPayload> for IncomingMessage {
    type Error = PayloadError;

    /// 種別ごとに必須フィールドを検証する。
    /// 空の username はプレースホルダーに置き換える。
    fn try_from(payload: dto::InboundChatPayload) -> Result<Self, Self::Error> {
        let body = match payload.kind {
            dto::ChatKind::Text => MessageBody::Text {
                body: payload.msg.ok_or(PayloadError::MissingField {
                    kind: "text",
                    field: "msg",
                })?,
            },
            dto::ChatKind::Image => {
                let url = payload
                    .url
                    .filter(|url| !url.is_empty())
                    .ok_or(PayloadError::MissingField {
                        kind: "image",
                        field: "url",
                    })?;
                MessageBody::Image {
                    url,
                    caption: payload.msg.unwrap_or_default(),
                }
            }
            dto::ChatKind::System => MessageBody::System {
                body: payload.msg.ok_or(PayloadError::MissingField {
                    kind: "system",
                    field: "msg",
                })?,
            },
        };

        Ok(IncomingMessage::new(
            DisplayName::or_placeholder(&payload.username),
            body,
        ))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&ChatMessage> for dto::OutboundChatPayload {
    fn from(message: &ChatMessage) -> Self {
        let (kind, msg, url) = match &message.body {
            MessageBody::Text { body } => (dto::ChatKind::Text, body.clone(), None),
            MessageBody::Image { url, caption } => {
                (dto::ChatKind::Image, caption.clone(), Some(url.clone()))
            }
            MessageBody::System { body } => (dto::ChatKind::System, body.clone(), None),
        };

        Self {
            username: message.sender.as_str().to_string(),
            kind,
            msg,
            url,
            timestamp: message.timestamp.as_str().to_string(),
        }
    }
}

impl From<&PresenceSnapshot> for dto::PresencePayload {
    fn from(snapshot: &PresenceSnapshot) -> Self {
        Self {
            count: snapshot.count,
            users: snapshot
                .users
                .iter()
                .map(|name| name.as_str().to_string())
                .collect(),
        }
    }
}

impl From<&Notification> for dto::ServerEvent {
    fn from(notification: &Notification) -> Self {
        match notification {
            Notification::Chat(message) => Self::Message(message.into()),
            Notification::Presence(snapshot) => Self::Presence(snapshot.into()),
            Notification::Rejected { reason } => Self::Error(dto::ErrorPayload {
                reason: reason.clone(),
            }),
        }
    }
}
