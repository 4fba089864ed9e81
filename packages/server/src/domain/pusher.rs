//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信を抽象化するインターフェース。
//! WebSocket の生成は UI 層で行われ、この trait は生成済みの
//! `UnboundedSender` を受け取ってメッセージ送信に使用します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::ConnectionId;

/// クライアントへメッセージを送るためのチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信のエラー
#[derive(Debug, Error, PartialEq)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// メッセージ通知の抽象化
///
/// `unregister_client` は sender を破棄します。sender が破棄されると
/// 対応する接続の push ループが終了し、その接続自身のセッションループが
/// 通常のクローズ経路でクリーンアップを行います。Idle Reaper はこの
/// 仕組みで接続を強制クローズします。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの sender を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの sender を登録解除・破棄（存在しなければ no-op）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 対象の全クライアントへ同一ペイロードを送信
    ///
    /// 個々の送信失敗は分離されます。一部のクライアントへの送信が
    /// 失敗しても残りへの送信は継続し、呼び出し全体は成功扱いです。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
