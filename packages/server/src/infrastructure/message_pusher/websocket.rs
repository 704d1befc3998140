//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - 通知を JSON フレームにエンコードしてクライアントへ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信は unbounded channel への `send` なので、遅いクライアントが他のクライアントへの
//! 配信を待たせることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// 通知を WebSocket のテキストフレームにエンコード
fn encode(notification: &Notification) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerEvent::from(notification))
        .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", connection);
        clients.insert(connection, sender);
    }

    async fn unregister_client(&self, connection: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection);
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection);
    }

    async fn unregister_all(&self) -> usize {
        let mut clients = self.clients.lock().await;
        let count = clients.len();
        clients.clear();
        tracing::debug!("{} clients unregistered from MessagePusher", count);
        count
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = encode(notification)?;
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection) {
            sender
                .send(frame)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to client '{}'", connection);
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(connection.to_string()))
        }
    }

    async fn broadcast(&self, notification: &Notification) -> Result<usize, MessagePushError> {
        let frame = encode(notification)?;
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for (connection, sender) in clients.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(frame.clone()) {
                tracing::warn!("Failed to push message to client '{}': {}", connection, e);
            } else {
                delivered += 1;
            }
        }
        tracing::debug!(
            "Broadcasted message to {}/{} clients",
            delivered,
            clients.len()
        );

        Ok(delivered)
    }
}
