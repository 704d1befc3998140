//! UseCase: プレゼンス配信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PresencePublisher::publish() / publish_to()
//!
//! ### なぜこのテストが必要か
//! - 並行するハンドラがレジストリ更新と配信を別の順序で終えても、
//!   全クライアントの最終的な表示が最新の状態に収束することを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：スナップショットのブロードキャスト
//! - エッジケース：古い revision のスナップショットが後から届く
//! - 異常系：ブロードキャストの失敗

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PresenceSnapshot};

/// プレゼンス配信のユースケース
///
/// 配信を自身の Mutex で直列化し、最後に配信したスナップショットを覚えておく。
/// それより古い revision のスナップショットは配信しない。
pub struct PresencePublisher {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 最後に配信したスナップショット
    last_published: Mutex<Option<PresenceSnapshot>>,
}

impl PresencePublisher {
    /// 新しい PresencePublisher を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            message_pusher,
            last_published: Mutex::new(None),
        }
    }

    /// スナップショットを全クライアントにブロードキャスト
    ///
    /// # Returns
    ///
    /// * `true` - 配信した
    /// * `false` - 配信済みのものより古いため破棄した
    pub async fn publish(&self, snapshot: PresenceSnapshot) -> bool {
        let mut last_published = self.last_published.lock().await;
        if let Some(last) = last_published.as_ref()
            && snapshot.is_older_than(last)
        {
            tracing::debug!(
                "Dropping stale presence snapshot (revision {} < {})",
                snapshot.revision,
                last.revision
            );
            return false;
        }

        let notification = Notification::Presence(snapshot.clone());
        match self.message_pusher.broadcast(&notification).await {
            Ok(delivered) => tracing::debug!(
                "Published presence ({} online) to {} clients",
                snapshot.count,
                delivered
            ),
            Err(e) => tracing::warn!("Failed to publish presence: {}", e),
        }

        *last_published = Some(snapshot);
        true
    }

    /// 1 つのクライアントにだけ現在のプレゼンスを送信
    ///
    /// 渡されたスナップショットと最後に配信したスナップショットのうち、新しい方を送る。
    pub async fn publish_to(
        &self,
        connection: &ConnectionId,
        snapshot: PresenceSnapshot,
    ) -> Result<(), MessagePushError> {
        let last_published = self.last_published.lock().await;
        let newest = match last_published.as_ref() {
            Some(last) if snapshot.is_older_than(last) => last.clone(),
            _ => snapshot,
        };

        self.message_pusher
            .push_to(connection, &Notification::Presence(newest))
            .await
    }
}
