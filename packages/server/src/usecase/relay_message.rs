//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() / announce() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む全クライアントにメッセージが中継されることを確認
//! - 明示的な登録なしでもメッセージ送信で送信者がレジストリに載ることを保証
//! - タイムスタンプが分単位（HH:MM）で付与されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキスト・画像メッセージの中継
//! - 異常系：クライアントからの system メッセージ
//! - エッジケース：同じ送信者からの連続メッセージ（エントリは 1 つのまま）

use std::sync::Arc;

use lanchat_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, ConnectionRegistry, DisplayName, IncomingMessage, MessageBody,
    MessagePusher, MinuteTimestamp, Notification,
};

use super::{error::RelayError, publish_presence::PresencePublisher};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// Registry（接続レジストリの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// プレゼンス配信
    publisher: Arc<PresencePublisher>,
    /// 受信時刻の取得
    clock: Arc<dyn Clock>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        publisher: Arc<PresencePublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            publisher,
            clock,
        }
    }

    /// メッセージ中継を実行
    ///
    /// 1. テキスト・画像なら送信者名でレジストリを更新（system は拒否）
    /// 2. サーバー受信時刻（HH:MM）を付与
    /// 3. 送信者を含む全クライアントにブロードキャスト
    /// 4. 1 で得たスナップショットを配信
    ///
    /// # Arguments
    ///
    /// * `connection` - 送信元の接続 ID
    /// * `incoming` - 受信したメッセージ（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 中継したメッセージ
    /// * `Err(RelayError)` - 中継失敗
    pub async fn execute(
        &self,
        connection: ConnectionId,
        incoming: IncomingMessage,
    ) -> Result<ChatMessage, RelayError> {
        match &incoming.body {
            MessageBody::Text { .. } | MessageBody::Image { .. } => {}
            MessageBody::System { .. } => return Err(RelayError::SystemMessageFromClient),
        }

        let snapshot = self
            .registry
            .register(connection.clone(), incoming.sender.clone())
            .await;

        let message = self.stamp(incoming);
        tracing::info!(
            "Relaying message from '{}' ({}) at {}",
            message.sender,
            connection,
            message.timestamp.as_str()
        );
        let broadcast_result = self.broadcast(&message).await;

        self.publisher.publish(snapshot).await;

        broadcast_result.map(|_| message)
    }

    /// サーバーからのお知らせ（system メッセージ）を全クライアントにブロードキャスト
    pub async fn announce(&self, body: impl Into<String>) -> Result<ChatMessage, RelayError> {
        let message = self.stamp(IncomingMessage::new(
            DisplayName::system(),
            MessageBody::System { body: body.into() },
        ));
        self.broadcast(&message).await.map(|_| message)
    }

    fn stamp(&self, incoming: IncomingMessage) -> ChatMessage {
        incoming.stamp(MinuteTimestamp::from_datetime(&self.clock.now()))
    }

    async fn broadcast(&self, message: &ChatMessage) -> Result<usize, RelayError> {
        self.message_pusher
            .broadcast(&Notification::Chat(message.clone()))
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePushError, MockMessagePusher},
        infrastructure::registry::InMemoryConnectionRegistry,
    };
    use chrono::{FixedOffset, TimeZone};
    use lanchat_shared::time::FixedClock;
    use mockall::Sequence;

    fn fixed_clock(hour: u32, min: u32, sec: u32) -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(
            FixedOffset::east_opt(9 * 3600)
                .unwrap()
                .with_ymd_and_hms(2024, 1, 1, hour, min, sec)
                .unwrap(),
        ))
    }

    fn create_usecase(
        pusher: MockMessagePusher,
        clock: Arc<dyn Clock>,
    ) -> (RelayMessageUseCase, Arc<InMemoryConnectionRegistry>) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let pusher: Arc<dyn MessagePusher> = Arc::new(pusher);
        let publisher = Arc::new(PresencePublisher::new(pusher.clone()));
        let usecase = RelayMessageUseCase::new(registry.clone(), pusher, publisher, clock);
        (usecase, registry)
    }

    fn text(sender: &str, body: &str) -> IncomingMessage {
        IncomingMessage::new(
            DisplayName::new(sender),
            MessageBody::Text {
                body: body.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_relay_text_broadcasts_then_publishes_presence() {
        // テスト項目: メッセージが全員にブロードキャストされ、その後プレゼンスが配信される
        // given (前提条件):
        let mut seq = Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|n| {
                matches!(n, Notification::Chat(m)
                    if m.sender.as_str() == "Alice" && m.timestamp.as_str() == "12:34")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(2));
        pusher
            .expect_broadcast()
            .withf(|n| matches!(n, Notification::Presence(s) if s.count == 1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(2));
        let (usecase, _registry) = create_usecase(pusher, fixed_clock(12, 34, 56));

        // when (操作):
        let result = usecase
            .execute(ConnectionId::new("a"), text("Alice", "hello"))
            .await;

        // then (期待する結果):
        let message = result.unwrap();
        assert_eq!(
            message.body,
            MessageBody::Text {
                body: "hello".to_string()
            }
        );
        assert_eq!(message.timestamp.as_str(), "12:34");
    }

    #[tokio::test]
    async fn test_relay_image_without_registration_registers_sender() {
        // テスト項目: 事前登録なしの画像メッセージでも送信者がレジストリに載る
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(2).returning(|_| Ok(1));
        let (usecase, registry) = create_usecase(pusher, fixed_clock(8, 0, 0));
        let image = IncomingMessage::new(
            DisplayName::new("Alice"),
            MessageBody::Image {
                url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
                caption: String::new(),
            },
        );

        // when (操作):
        let result = usecase.execute(ConnectionId::new("a"), image).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.users, vec![DisplayName::new("Alice")]);
    }

    #[tokio::test]
    async fn test_relay_twice_from_same_connection_keeps_one_entry() {
        // テスト項目: 同じ接続・同じ名前で 2 回送ってもエントリは 1 つ
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(4).returning(|_| Ok(1));
        let (usecase, registry) = create_usecase(pusher, fixed_clock(8, 0, 0));

        // when (操作):
        usecase
            .execute(ConnectionId::new("a"), text("Alice", "one"))
            .await
            .unwrap();
        usecase
            .execute(ConnectionId::new("a"), text("Alice", "two"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(registry.snapshot().await.count, 1);
    }

    #[tokio::test]
    async fn test_relay_updates_name_when_sender_changes_it() {
        // テスト項目: メッセージの送信者名が変わればレジストリの名前も変わる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(4).returning(|_| Ok(1));
        let (usecase, registry) = create_usecase(pusher, fixed_clock(8, 0, 0));
        usecase
            .execute(ConnectionId::new("a"), text("Alice", "hi"))
            .await
            .unwrap();

        // when (操作):
        usecase
            .execute(ConnectionId::new("a"), text("Alicia", "renamed"))
            .await
            .unwrap();

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.users, vec![DisplayName::new("Alicia")]);
    }

    #[tokio::test]
    async fn test_relay_rejects_system_message_from_client() {
        // テスト項目: クライアントからの system メッセージは拒否され、レジストリも変わらない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(0);
        let (usecase, registry) = create_usecase(pusher, fixed_clock(8, 0, 0));
        let system = IncomingMessage::new(
            DisplayName::new("Mallory"),
            MessageBody::System {
                body: "server restarting".to_string(),
            },
        );

        // when (操作):
        let result = usecase.execute(ConnectionId::new("m"), system).await;

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::SystemMessageFromClient));
        assert_eq!(registry.snapshot().await.count, 0);
    }

    #[tokio::test]
    async fn test_relay_publishes_presence_even_if_broadcast_fails() {
        // テスト項目: メッセージのブロードキャストが失敗してもプレゼンスは配信される
        // given (前提条件):
        let mut seq = Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(MessagePushError::EncodeFailed("boom".to_string())));
        pusher
            .expect_broadcast()
            .withf(|n| matches!(n, Notification::Presence(_)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(1));
        let (usecase, _registry) = create_usecase(pusher, fixed_clock(8, 0, 0));

        // when (操作):
        let result = usecase
            .execute(ConnectionId::new("a"), text("Alice", "hi"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(RelayError::BroadcastFailed(_))));
    }

    #[tokio::test]
    async fn test_announce_broadcasts_system_message() {
        // テスト項目: お知らせは System 送信者の system メッセージとして配信される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|n| {
                matches!(n, Notification::Chat(m)
                    if m.sender.as_str() == DisplayName::SYSTEM
                        && matches!(m.body, MessageBody::System { .. }))
            })
            .times(1)
            .returning(|_| Ok(3));
        let (usecase, registry) = create_usecase(pusher, fixed_clock(23, 59, 59));

        // when (操作):
        let message = usecase.announce("Server is shutting down").await.unwrap();

        // then (期待する結果):
        assert_eq!(message.timestamp.as_str(), "23:59");
        assert_eq!(registry.snapshot().await.count, 0);
    }

    #[tokio::test]
    async fn test_messages_within_same_minute_share_timestamp() {
        // テスト項目: 同じ分に受信したメッセージは同じタイムスタンプになる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().returning(|_| Ok(1));
        let (early, _) = create_usecase(pusher, fixed_clock(10, 15, 1));
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().returning(|_| Ok(1));
        let (late, _) = create_usecase(pusher, fixed_clock(10, 15, 58));

        // when (操作):
        let first = early
            .execute(ConnectionId::new("a"), text("Alice", "one"))
            .await
            .unwrap();
        let second = late
            .execute(ConnectionId::new("a"), text("Alice", "two"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(first.timestamp, second.timestamp);
    }
}
