//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続直後（登録前）のクライアントもブロードキャストを受け取れることを保証
//! - 接続しただけではレジストリにエントリが作られないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続に現在のプレゼンスが送られる
//! - エッジケース：既に他のクライアントが登録済み

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, ConnectionRegistry, MessagePusher, PusherChannel,
};

use super::publish_presence::PresencePublisher;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Registry（接続レジストリの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// プレゼンス配信
    publisher: Arc<PresencePublisher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        publisher: Arc<PresencePublisher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            publisher,
        }
    }

    /// クライアント接続を実行
    ///
    /// 接続 ID を払い出して送信チャンネルを MessagePusher に登録し、
    /// 現在のプレゼンスをそのクライアントにだけ送る。レジストリは変更しない。
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 払い出した接続 ID
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(connection.clone(), sender)
            .await;

        let snapshot = self.registry.snapshot().await;
        if let Err(e) = self.publisher.publish_to(&connection, snapshot).await {
            tracing::warn!("Failed to greet client '{}' with presence: {}", connection, e);
        }

        connection
    }
}
