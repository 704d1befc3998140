//! MessagePusher trait 定義
//!
//! クライアントへの通知（ブロードキャスト・個別送信）のインターフェース。
//! 通知の具体的なエンコード方式と送信手段は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, ConnectionId, MessagePushError, PresenceSnapshot};

/// クライアントへの送信チャンネル（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// クライアントへの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 中継されたチャットメッセージ
    Chat(ChatMessage),
    /// プレゼンスの更新
    Presence(PresenceSnapshot),
    /// 送信元の接続にだけ返すエラー
    Rejected { reason: String },
}

/// MessagePusher trait
///
/// ## 配信の方針
///
/// - 送信は fire-and-forget。クライアントごとの到達確認は待たない
/// - `broadcast` は一部のクライアントへの送信失敗を許容し、残りへの配信を続ける
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, connection: &ConnectionId);

    /// 全クライアントの送信チャンネルを登録解除し、解除した数を返す
    ///
    /// チャンネルが閉じると各クライアントの送信タスクは残りのフレームを送り切って終了する。
    async fn unregister_all(&self) -> usize;

    /// 特定のクライアントに通知
    async fn push_to(
        &self,
        connection: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 接続中の全クライアントに通知し、送信できたクライアント数を返す
    async fn broadcast(&self, notification: &Notification) -> Result<usize, MessagePushError>;
}
