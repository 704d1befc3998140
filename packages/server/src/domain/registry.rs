//! ConnectionRegistry trait 定義
//!
//! 「誰がオンラインか」の唯一の情報源となる、接続 ID → 表示名の対応表への
//! インターフェース。具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, PresenceSnapshot};

/// Connection Registry trait
///
/// ## 不変条件
///
/// - エントリは、登録済みまたは 1 件以上メッセージを送った接続に対してのみ存在する
/// - 切断時に 1 度だけ同期的に削除され、接続より長く残ることはない
/// - 内部のマップは公開しない（3 つの操作のみを提供）
///
/// 更新系の操作は、同じロックの中で取得した最新のスナップショットを返します。
/// どの操作も通常の運用で失敗することはありません。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// エントリを追加（既存なら上書き）。表示名は検証しない
    async fn register(&self, connection: ConnectionId, name: DisplayName) -> PresenceSnapshot;

    /// エントリを削除（存在しなければ何もしない）
    async fn remove(&self, connection: &ConnectionId) -> PresenceSnapshot;

    /// 現在のスナップショットを取得（状態は変更しない）
    async fn snapshot(&self) -> PresenceSnapshot;
}
