//! Value Objects
//!
//! 接続 ID・表示名・分単位タイムスタンプを表す値オブジェクト。

use std::fmt;

use chrono::{DateTime, TimeZone};
use lanchat_shared::time::format_minute_timestamp;
use uuid::Uuid;

/// 接続 ID
///
/// WebSocket のアップグレード時にサーバーが払い出す不透明な識別子。
/// レジストリはこれを検索キーとしてのみ使用し、接続のライフサイクルは管理しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ConnectionId の生成
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 から新しい ConnectionId を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// 表示名
///
/// クライアントが自由に選ぶ文字列。重複可・いつでも変更可（接続ごとに後勝ち）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    /// 空の表示名の代わりに使うプレースホルダー
    pub const PLACEHOLDER: &'static str = "Anon";

    /// サーバーからのお知らせに使う送信者名
    pub const SYSTEM: &'static str = "System";

    /// 検証なしで DisplayName を作成（空文字列も許容）
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 空白のみ・空の表示名をプレースホルダーに置き換えて作成
    pub fn or_placeholder(value: &str) -> Self {
        if value.trim().is_empty() {
            Self(Self::PLACEHOLDER.to_string())
        } else {
            Self(value.to_string())
        }
    }

    /// サーバーのお知らせ用の送信者名
    pub fn system() -> Self {
        Self(Self::SYSTEM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 分単位のタイムスタンプ（`HH:MM`）
///
/// 秒以下は保持しない。同じ分に受信したメッセージは同一の文字列になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinuteTimestamp(String);

impl MinuteTimestamp {
    pub fn from_datetime<Tz: TimeZone>(time: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self(format_minute_timestamp(time))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
