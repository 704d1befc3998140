//! UseCase: 表示名の登録処理

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, DisplayName, PresenceSnapshot};

use super::publish_presence::PresencePublisher;

/// 表示名登録のユースケース（クライアントの `register` イベント）
pub struct RegisterNameUseCase {
    /// Registry（接続レジストリの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// プレゼンス配信
    publisher: Arc<PresencePublisher>,
}

impl RegisterNameUseCase {
    /// 新しい RegisterNameUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>, publisher: Arc<PresencePublisher>) -> Self {
        Self {
            registry,
            publisher,
        }
    }

    /// 表示名を登録（既存なら上書き）し、プレゼンスを配信
    ///
    /// 空の表示名はプレースホルダーに置き換える。
    pub async fn execute(&self, connection: ConnectionId, name: &str) -> PresenceSnapshot {
        let name = DisplayName::or_placeholder(name);
        tracing::info!("Client '{}' registered as '{}'", connection, name);

        let snapshot = self.registry.register(connection, name).await;
        self.publisher.publish(snapshot.clone()).await;
        snapshot
    }
}
