//! Domain layer
//!
//! 接続レジストリ・プレゼンス・チャットメッセージのドメインモデルと、
//! ドメイン層が必要とするインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, IncomingMessage, MessageBody, PresenceSnapshot};
pub use error::{MessagePushError, PayloadError};
pub use pusher::{MessagePusher, Notification, PusherChannel};
pub use registry::ConnectionRegistry;
pub use value_object::{ConnectionId, ConnectionIdFactory, DisplayName, MinuteTimestamp};

#[cfg(test)]
pub use pusher::MockMessagePusher;
