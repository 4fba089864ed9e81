//! UseCase: 位置更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateLocationUseCase::execute() メソッド
//! - 位置の保存（last-write-wins）、アクティビティ時刻の更新、
//!   グループスナップショットの構築、ブロードキャスト対象の選定
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：位置が既知のメンバーだけがスナップショットに
//!   含まれ、送信者を含む全メンバーがブロードキャスト対象になる
//! - Reaper に先にクローズされた接続からの更新が安全に失敗することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：位置報告とグループ全体へのファンアウト
//! - 異常系：セッションが存在しない接続からの更新
//! - エッジケース：位置未報告のメンバーがいるグループ

use std::sync::Arc;

use caravan_shared::time::Clock;

use crate::domain::{
    ConnectionId, GroupRegistry, Location, MessagePushError, MessagePusher, SessionRepository,
    Timestamp,
};

use super::error::UpdateLocationError;

/// あるグループの、ある時点での位置スナップショット
///
/// `entries` は位置が既知のメンバーの位置一覧、`targets` はスナップショット
/// の送信対象（送信者自身を含むグループの全メンバー）です。順序に意味は
/// ありません。
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    /// 位置が既知のメンバーの位置一覧
    pub entries: Vec<Location>,
    /// ブロードキャスト対象の接続 ID リスト
    pub targets: Vec<ConnectionId>,
}

/// 位置更新のユースケース
pub struct UpdateLocationUseCase {
    /// Registry（グループメンバーシップの抽象化）
    registry: Arc<dyn GroupRegistry>,
    /// Repository（セッション状態の抽象化）
    sessions: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（現在時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl UpdateLocationUseCase {
    /// 新しい UpdateLocationUseCase を作成
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

    /// 位置更新を実行し、ブロードキャスト用のスナップショットを構築する
    ///
    /// メンバーリストは送信前に一度だけコピーされる点に注意。ブロード
    /// キャスト中の並行 join / leave はこのスナップショットには反映され
    /// ません（位置報告は継続的なので、次の更新で追いつきます）。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 位置を報告した接続の ID（Domain Model）
    /// * `location` - 検証済みの位置情報（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(GroupSnapshot)` - 更新成功（スナップショットと送信対象を返す）
    /// * `Err(UpdateLocationError)` - セッションが存在しない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        location: Location,
    ) -> Result<GroupSnapshot, UpdateLocationError> {
        let now = Timestamp::new(self.clock.now_utc_millis());

        // 1. 所属グループを特定
        let group_id = self
            .sessions
            .group_of(connection_id)
            .await
            .ok_or_else(|| UpdateLocationError::SessionNotFound(connection_id.to_string()))?;

        // 2. 位置を保存し、アクティビティ時刻を更新（last-write-wins）
        self.sessions
            .set_location(connection_id, location, now)
            .await
            .map_err(|_| UpdateLocationError::SessionNotFound(connection_id.to_string()))?;

        // 3. メンバーリストの時点コピーを取り、位置が既知のメンバーを集める
        let targets = self.registry.members(&group_id).await;
        let mut entries = Vec::with_capacity(targets.len());
        for member in &targets {
            if let Some(known) = self.sessions.location_of(member).await {
                entries.push(known);
            }
        }

        Ok(GroupSnapshot { entries, targets })
    }

    /// スナップショットの JSON を対象の全メンバーにブロードキャスト
    ///
    /// 個々の送信失敗は MessagePusher 側で分離されます。
    ///
    /// # Arguments
    ///
    /// * `targets` - ブロードキャスト対象の接続 ID リスト（Domain Model）
    /// * `message` - ブロードキャストするメッセージ（JSON）
    pub async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}
