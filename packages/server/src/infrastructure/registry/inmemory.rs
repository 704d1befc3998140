//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用し、1 つの Mutex で全操作を直列化します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRegistry, DisplayName, PresenceSnapshot};

/// Mutex で保護される内部状態
#[derive(Debug, Default)]
struct RegistryState {
    /// Key: 接続 ID, Value: 表示名
    entries: HashMap<ConnectionId, DisplayName>,
    /// 更新回数（スナップショットの新旧判定に使う）
    revision: u64,
}

impl RegistryState {
    fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot::from_entries(self.entries.values(), self.revision)
    }
}

/// インメモリ Connection Registry 実装
#[derive(Debug, Default)]
pub struct InMemoryConnectionRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryConnectionRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: ConnectionId, name: DisplayName) -> PresenceSnapshot {
        let mut state = self.state.lock().await;
        match state.entries.insert(connection.clone(), name.clone()) {
            Some(previous) if previous == name => {
                tracing::trace!("Connection '{}' re-registered as '{}'", connection, name);
            }
            Some(previous) => {
                tracing::debug!(
                    "Connection '{}' renamed from '{}' to '{}'",
                    connection,
                    previous,
                    name
                );
            }
            None => {
                tracing::debug!("Connection '{}' registered as '{}'", connection, name);
            }
        }
        state.revision += 1;
        state.snapshot()
    }

    async fn remove(&self, connection: &ConnectionId) -> PresenceSnapshot {
        let mut state = self.state.lock().await;
        if let Some(name) = state.entries.remove(connection) {
            state.revision += 1;
            tracing::debug!("Connection '{}' ('{}') removed", connection, name);
        }
        state.snapshot()
    }

    async fn snapshot(&self) -> PresenceSnapshot {
        let state = self.state.lock().await;
        state.snapshot()
    }
}
