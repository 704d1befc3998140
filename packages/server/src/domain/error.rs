//! Domain errors

use thiserror::Error;

/// メッセージ送信（通知）のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 送信先のクライアントが接続していない
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗した（受信側が閉じている）
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// 通知のエンコードに失敗した
    #[error("Failed to encode notification: {0}")]
    EncodeFailed(String),
}

/// 受信ペイロードの検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// 種別に必要なフィールドがない
    #[error("Missing required field '{field}' for '{kind}' message")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}
