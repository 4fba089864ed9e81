//! GroupRegistry trait 定義
//!
//! グループ識別子から所属接続の集合への対応を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, GroupId};

/// グループと所属接続の Registry
///
/// グループは最初のメンバーの join で暗黙に作られ、メンバー集合が
/// 空になった瞬間にエントリごと削除されます。全ての操作は同一・異なる
/// グループに対する任意の並行呼び出しに対して安全でなければなりません。
#[async_trait]
pub trait GroupRegistry: Send + Sync {
    /// 接続をグループのメンバー集合に追加（グループがなければ作成）
    async fn join(&self, group_id: &GroupId, connection_id: ConnectionId);

    /// 接続をメンバー集合から削除。集合が空になればグループのエントリも削除。
    /// 既に削除済みの接続に対しては no-op（冪等）。
    async fn leave(&self, group_id: &GroupId, connection_id: &ConnectionId);

    /// グループの現在のメンバーのスナップショットを取得。
    /// グループが存在しなければ空のリストを返す。
    async fn members(&self, group_id: &GroupId) -> Vec<ConnectionId>;

    /// 存在する全グループの (GroupId, メンバー数) 一覧を取得
    async fn group_summaries(&self) -> Vec<(GroupId, usize)>;
}
