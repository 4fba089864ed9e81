//! 接続の識別子とセッション状態
//!
//! `ConnectionId` はマップのキーとしてのみ使われる不透明な識別子で、
//! ドメイン上の意味を持ちません。`Session` は接続ごとの可変状態
//! （所属グループ・最新位置・最終アクティビティ時刻）を表します。

use thiserror::Error;
use uuid::Uuid;

use super::{GroupId, Location, Timestamp};

/// セッション操作のエラー
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("connection '{0}' is not registered")]
    NotRegistered(String),
}

/// 接続の一意な識別子（UUID v4）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい ConnectionId を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 接続ごとのセッション状態
///
/// 接続はその生存期間を通じてちょうど1つのグループに属します
/// （途中での所属変更はありません）。`location` は最初の有効な
/// 位置報告を受け取るまで `None` です。
#[derive(Debug, Clone)]
pub struct Session {
    /// 所属グループ
    pub group_id: GroupId,
    /// 最後に報告された位置（未報告なら None）
    pub location: Option<Location>,
    /// 接続時刻
    pub connected_at: Timestamp,
    /// 最終アクティビティ時刻（接続時と有効な位置報告ごとに更新）
    pub last_activity: Timestamp,
}

impl Session {
    /// 新しい Session を作成
    pub fn new(group_id: GroupId, connected_at: Timestamp) -> Self {
        Self {
            group_id,
            location: None,
            connected_at,
            last_activity: connected_at,
        }
    }
}
