//! UseCase: グループ参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinGroupUseCase::execute() メソッド
//! - 接続受付時の登録処理（Registry・Session・MessagePusher への登録）
//!
//! ### なぜこのテストが必要か
//! - 参加がグループの暗黙の作成を含めて常に成功することを保証
//! - Session の初期アクティビティ時刻が接続時刻に設定されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続のグループ参加
//! - エッジケース：同一グループへの複数接続の参加

use std::sync::Arc;

use caravan_shared::time::Clock;

use crate::domain::{
    ConnectionId, GroupId, GroupRegistry, MessagePusher, PusherChannel, SessionRepository,
    Timestamp,
};

/// グループ参加のユースケース
///
/// 参加は常に成功します。グループは最初のメンバーの参加で暗黙に
/// 作成され、重複チェックはありません（ConnectionId はサーバー側で
/// 生成されるため、同じ接続が二度参加することはありません）。
pub struct JoinGroupUseCase {
    /// Registry（グループメンバーシップの抽象化）
    registry: Arc<dyn GroupRegistry>,
    /// Repository（セッション状態の抽象化）
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl JoinGroupUseCase {
    /// 新しい JoinGroupUseCase を作成
    pub fn new(
        registry: Arc<dyn GroupRegistry>,
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            sessions,
            message_pusher,
            clock,
        }
    }

    /// グループ参加を実行
    ///
    /// # Arguments
    ///
    /// * `group_id` - 参加するグループの ID（Domain Model）
    /// * `connection_id` - 接続の ID（Domain Model）
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 接続時刻（初期アクティビティ時刻としても記録される）
    pub async fn execute(
        &self,
        group_id: GroupId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Timestamp {
        let connected_at = Timestamp::new(self.clock.now_utc_millis());

        // 1. Registry にメンバーとして追加（グループがなければ作成）
        self.registry.join(&group_id, connection_id.clone()).await;

        // 2. Repository にセッションを登録
        self.sessions
            .register(connection_id.clone(), group_id, connected_at)
            .await;

        // 3. MessagePusher にクライアントを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        connected_at
    }
}
