//! UseCase: グループ離脱処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveGroupUseCase::execute() メソッド
//! - 接続クローズ時のクリーンアップ（Registry からの削除、セッション破棄、
//!   MessagePusher の登録解除）
//!
//! ### なぜこのテストが必要か
//! - クリーンアップはどの終了経路（通常クローズ・トランスポート障害・
//!   Reaper によるクローズ）からもちょうど1回実行される必要がある
//! - 最後のメンバーの離脱でグループのエントリが削除されることを保証
//! - Reaper との競合に備え、全体が冪等であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの離脱と状態の完全な破棄
//! - エッジケース：最後のメンバーの離脱（グループ削除）
//! - 異常系：既にクリーンアップ済みの接続の離脱（no-op）

use std::sync::Arc;

use crate::domain::{ConnectionId, GroupId, GroupRegistry, MessagePusher, SessionRepository};

/// グループ離脱のユースケース
///
/// セッションループが `Closed` に入るときの正規のクリーンアップ経路。
/// 全ての操作が存在しないキーに対して no-op のため、何度呼んでも安全です。
pub struct LeaveGroupUseCase {
    /// Registry（グループメンバーシップの抽象化）
    registry: Arc<dyn GroupRegistry>,
    /// Repository（セッション状態の抽象化）
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveGroupUseCase {
    /// 新しい LeaveGroupUseCase を作成
    pub fn new(
        registry: Arc<dyn GroupRegistry>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            sessions,
            message_pusher,
        }
    }

    /// グループ離脱を実行
    ///
    /// # Arguments
    ///
    /// * `group_id` - 離脱するグループの ID（Domain Model）
    /// * `connection_id` - 接続の ID（Domain Model）
    pub async fn execute(&self, group_id: &GroupId, connection_id: &ConnectionId) {
        // 1. Registry からメンバーを削除（集合が空になればグループごと削除）
        self.registry.leave(group_id, connection_id).await;

        // 2. セッション（位置・アクティビティ）を破棄
        self.sessions.remove(connection_id).await;

        // 3. MessagePusher からクライアントを登録解除
        self.message_pusher.unregister_client(connection_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Timestamp};
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemoryGroupRegistry,
        repository::InMemorySessionRepository,
    };

    struct TestFixture {
        registry: Arc<InMemoryGroupRegistry>,
        sessions: Arc<InMemorySessionRepository>,
        pusher: Arc<WebSocketMessagePusher>,
        usecase: LeaveGroupUseCase,
        group_id: GroupId,
    }

    impl TestFixture {
        fn new() -> Self {
            let registry = Arc::new(InMemoryGroupRegistry::new());
            let sessions = Arc::new(InMemorySessionRepository::new());
            let pusher = Arc::new(WebSocketMessagePusher::new());
            let usecase =
                LeaveGroupUseCase::new(registry.clone(), sessions.clone(), pusher.clone());
            Self {
                registry,
                sessions,
                pusher,
                usecase,
                group_id: GroupId::new("g1".to_string()).unwrap(),
            }
        }

        async fn add_member(&self) -> ConnectionId {
            let connection_id = ConnectionId::generate();
            self.registry
                .join(&self.group_id, connection_id.clone())
                .await;
            self.sessions
                .register(
                    connection_id.clone(),
                    self.group_id.clone(),
                    Timestamp::new(1000),
                )
                .await;
            let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
            self.pusher.register_client(connection_id.clone(), tx).await;
            connection_id
        }
    }

    #[tokio::test]
    async fn test_leave_removes_all_state() {
        // テスト項目: 離脱で Registry・Repository の両方から状態が消える
        // given (前提条件):
        let fixture = TestFixture::new();
        let alice = fixture.add_member().await;
        let bob = fixture.add_member().await;
        fixture
            .sessions
            .set_location(
                &alice,
                Location::new("alice".to_string(), 10.0, 20.0).unwrap(),
                Timestamp::new(2000),
            )
            .await
            .unwrap();

        // when (操作):
        fixture.usecase.execute(&fixture.group_id, &alice).await;

        // then (期待する結果): alice の状態だけが消えている
        assert_eq!(
            fixture.registry.members(&fixture.group_id).await,
            vec![bob.clone()]
        );
        assert!(fixture.sessions.get(&alice).await.is_none());
        assert!(fixture.sessions.location_of(&alice).await.is_none());
        assert!(fixture.sessions.get(&bob).await.is_some());
    }

    #[tokio::test]
    async fn test_last_member_leaving_removes_group() {
        // テスト項目: 最後のメンバーの離脱でグループのエントリが削除される
        // given (前提条件):
        let fixture = TestFixture::new();
        let alice = fixture.add_member().await;

        // when (操作):
        fixture.usecase.execute(&fixture.group_id, &alice).await;

        // then (期待する結果):
        assert!(fixture.registry.group_summaries().await.is_empty());
        assert_eq!(fixture.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        // テスト項目: 既にクリーンアップ済みの接続の離脱が no-op になる（冪等性）
        // given (前提条件):
        let fixture = TestFixture::new();
        let alice = fixture.add_member().await;
        fixture.usecase.execute(&fixture.group_id, &alice).await;

        // when (操作): もう一度離脱させる
        fixture.usecase.execute(&fixture.group_id, &alice).await;

        // then (期待する結果): エラーにならず、状態も変わらない
        assert!(fixture.registry.group_summaries().await.is_empty());
        assert_eq!(fixture.sessions.count().await, 0);
    }

    #[tokio::test]
    async fn test_leave_for_unknown_connection_is_noop() {
        // テスト項目: 一度も参加していない接続の離脱が no-op になる
        // given (前提条件):
        let fixture = TestFixture::new();
        let member = fixture.add_member().await;
        let unknown = ConnectionId::generate();

        // when (操作):
        fixture.usecase.execute(&fixture.group_id, &unknown).await;

        // then (期待する結果): 既存メンバーは影響を受けない
        assert_eq!(
            fixture.registry.members(&fixture.group_id).await,
            vec![member]
        );
        assert_eq!(fixture.sessions.count().await, 1);
    }
}
