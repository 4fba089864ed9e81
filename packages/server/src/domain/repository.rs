//! SessionRepository trait 定義
//!
//! ドメイン層が必要とする接続ごとのセッション状態へのアクセスを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, GroupId, Location, Session, SessionError, Timestamp};

/// 接続ごとのセッション状態の Repository
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しません。全ての削除系操作は存在しないキーに対して no-op です。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを登録（接続受付時に1回だけ呼ばれる）
    async fn register(&self, connection_id: ConnectionId, group_id: GroupId, connected_at: Timestamp);

    /// 位置情報を更新し、最終アクティビティ時刻を更新する（last-write-wins）
    async fn set_location(
        &self,
        connection_id: &ConnectionId,
        location: Location,
        at: Timestamp,
    ) -> Result<(), SessionError>;

    /// 接続の最新の位置情報を取得（未報告・未登録なら None）
    async fn location_of(&self, connection_id: &ConnectionId) -> Option<Location>;

    /// 接続の所属グループを取得（未登録なら None）
    async fn group_of(&self, connection_id: &ConnectionId) -> Option<GroupId>;

    /// セッションを取得（未登録なら None）
    async fn get(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// セッションを削除（存在しなければ no-op）
    async fn remove(&self, connection_id: &ConnectionId);

    /// 最終アクティビティから `idle_timeout_millis` を超えて経過した
    /// 接続の ID 一覧を取得
    async fn stale_connection_ids(&self, now: Timestamp, idle_timeout_millis: i64)
    -> Vec<ConnectionId>;

    /// 登録中のセッション数を取得
    async fn count(&self) -> usize;
}
