//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続のエントリが即座にレジストリから消えることを保証
//! - 残りのクライアントに更新後のプレゼンスが届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みクライアントの切断
//! - エッジケース：登録前（名前なし）のクライアントの切断

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, MessagePusher, PresenceSnapshot};

use super::publish_presence::PresencePublisher;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Registry（接続レジストリの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// プレゼンス配信
    publisher: Arc<PresencePublisher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
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

    /// クライアント切断を実行
    ///
    /// 送信チャンネルを登録解除し、レジストリのエントリを削除（なければ何もしない）して、
    /// 残りのクライアントにプレゼンスを配信する。
    pub async fn execute(&self, connection: &ConnectionId) -> PresenceSnapshot {
        self.message_pusher.unregister_client(connection).await;

        let snapshot = self.registry.remove(connection).await;
        tracing::info!(
            "Client '{}' disconnected ({} online)",
            connection,
            snapshot.count
        );

        self.publisher.publish(snapshot.clone()).await;
        snapshot
    }
}
