//! Entities
//!
//! チャットメッセージとプレゼンススナップショット。

use std::collections::BTreeSet;

use super::value_object::{DisplayName, MinuteTimestamp};

/// メッセージ本文
///
/// 種別ごとに必要なフィールドだけを持つタグ付きバリアント。
/// 画像の URL（data URL を含む）は中身を検証せずそのまま中継する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text { body: String },
    Image { url: String, caption: String },
    System { body: String },
}

/// クライアントから受信した、タイムスタンプ付与前のメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: DisplayName,
    pub body: MessageBody,
}

impl IncomingMessage {
    pub fn new(sender: DisplayName, body: MessageBody) -> Self {
        Self { sender, body }
    }

    /// サーバー受信時刻を付与して ChatMessage にする
    pub fn stamp(self, timestamp: MinuteTimestamp) -> ChatMessage {
        ChatMessage {
            sender: self.sender,
            body: self.body,
            timestamp,
        }
    }
}

/// 中継されるチャットメッセージ（永続化しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: DisplayName,
    pub body: MessageBody,
    pub timestamp: MinuteTimestamp,
}

/// プレゼンススナップショット
///
/// レジストリから導出される一時的な値。`users` は重複のない表示名を昇順に並べたもの、
/// `revision` はスナップショット取得時点のレジストリ更新回数。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresenceSnapshot {
    pub count: usize,
    pub users: Vec<DisplayName>,
    pub revision: u64,
}

impl PresenceSnapshot {
    /// 登録中の全エントリの表示名から作成
    pub fn from_entries<'a>(
        names: impl IntoIterator<Item = &'a DisplayName>,
        revision: u64,
    ) -> Self {
        let mut count = 0;
        let mut unique = BTreeSet::new();
        for name in names {
            count += 1;
            unique.insert(name.clone());
        }

        Self {
            count,
            users: unique.into_iter().collect(),
            revision,
        }
    }

    /// `other` より古いスナップショットか
    pub fn is_older_than(&self, other: &PresenceSnapshot) -> bool {
        self.revision < other.revision
    }
}
