//! UseCase errors

use thiserror::Error;

/// メッセージ中継のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// system 種別はサーバーからクライアントへの一方向のみ
    #[error("System messages cannot be sent by clients")]
    SystemMessageFromClient,

    /// ブロードキャスト全体が失敗した（エンコード失敗など）
    #[error("Failed to broadcast message: {0}")]
    BroadcastFailed(String),
}
