//! UseCase: アイドル接続の回収処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReapStaleSessionsUseCase::execute() メソッド
//! - アイドルタイムアウトを超えた接続の検出と強制クローズ（1サイクル分）
//!
//! ### なぜこのテストが必要か
//! - タイムアウト判定が最終アクティビティ時刻に基づいて正しく行われる
//!   ことを保証
//! - 強制クローズが sender の破棄として実装され、対象のセッションループを
//!   通常のクローズ経路に誘導することを確認
//! - 接続自身のループによる並行クローズと競合しても安全（冪等）である
//!   ことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：タイムアウト超過接続の回収
//! - エッジケース：回収対象なし
//! - 競合：既にクローズ済みの接続の回収

use std::sync::Arc;
use std::time::Duration;

use caravan_shared::time::Clock;

use crate::domain::{ConnectionId, MessagePusher, SessionRepository, Timestamp};

/// アイドル接続回収のユースケース
///
/// 1回の `execute` が Reaper の1サイクルに対応します。周期実行は
/// UI 層（`ui/server.rs`）が `tokio::time::interval` で行います。
///
/// Registry のクリーンアップはここでは行いません。sender の破棄により
/// 対象のセッションループが自身の `Closing → Closed` 経路を通り、
/// そこで正規の Leave が実行されます。
pub struct ReapStaleSessionsUseCase {
    /// Repository（セッション状態の抽象化）
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
    /// アイドルタイムアウト（これを超えて無活動の接続が回収対象）
    idle_timeout: Duration,
}

impl ReapStaleSessionsUseCase {
    /// 新しい ReapStaleSessionsUseCase を作成
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            message_pusher,
            clock,
            idle_timeout,
        }
    }

    /// 回収サイクルを1回実行
    ///
    /// # Returns
    ///
    /// 回収した接続の ID リスト
    pub async fn execute(&self) -> Vec<ConnectionId> {
        let now = Timestamp::new(self.clock.now_utc_millis());
        let stale = self
            .sessions
            .stale_connection_ids(now, self.idle_timeout.as_millis() as i64)
            .await;

        for connection_id in &stale {
            tracing::info!("Closing idle connection '{}'", connection_id);

            // sender の破棄がクローズシグナルになる。対象のセッションループは
            // 自身のクローズ経路で Registry からの Leave を行う。
            self.message_pusher.unregister_client(connection_id).await;
            self.sessions.remove(connection_id).await;
        }

        stale
    }
}
