//! UseCase: プレゼンス取得

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, PresenceSnapshot};

/// 現在のプレゼンスを取得するユースケース（HTTP API 用）
pub struct GetPresenceUseCase {
    /// Registry（接続レジストリの抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetPresenceUseCase {
    /// 新しい GetPresenceUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 現在のスナップショットを取得
    pub async fn execute(&self) -> PresenceSnapshot {
        self.registry.snapshot().await
    }
}
