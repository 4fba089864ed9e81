//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - グループメンバーへのスナップショット送信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。これにより、「WebSocket の生成」と「メッセージの送信」が
//! 分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、メッセージ送信
//!
//! `unregister_client` は sender を破棄します。破棄された sender に
//! 対応する接続の push ループはチャンネルのクローズを検知して終了し、
//! セッションループ全体が通常のクローズ経路に入ります。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: DashMap<ConnectionId, PusherChannel>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        self.clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        for target in targets {
            if let Some(sender) = self.clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to connection '{}'", target);
                }
            } else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のクライアントにメッセージをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;

        // when (操作):
        let targets = vec![alice, bob];
        let result = pusher.broadcast(targets, "[]").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("[]".to_string()));
        assert_eq!(rx2.recv().await, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部のクライアントの受信側が閉じていても残りへの送信は成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register_client(alice.clone(), tx1).await;
        pusher.register_client(bob.clone(), tx2).await;

        // bob の受信側を破棄して送信を失敗させる
        drop(rx2);

        // when (操作):
        let targets = vec![bob, alice.clone()];
        let result = pusher.broadcast(targets, "[]").await;

        // then (期待する結果): ブロードキャストは部分失敗を許容し、alice は受信する
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_to_unknown_connection_is_skipped() {
        // テスト項目: 登録されていない接続へのブロードキャストがスキップされる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let unknown = ConnectionId::generate();

        // when (操作):
        let result = pusher.broadcast(vec![unknown], "[]").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(vec![], "[]").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregister_closes_channel() {
        // テスト項目: 登録解除で sender が破棄され、受信側がクローズを検知する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        pusher.register_client(alice.clone(), tx).await;

        // when (操作):
        pusher.unregister_client(&alice).await;

        // then (期待する結果): チャンネルが閉じ、recv が None を返す
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        // テスト項目: 存在しない接続の登録解除が no-op になる（冪等性）
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let unknown = ConnectionId::generate();

        // when (操作):
        pusher.unregister_client(&unknown).await;

        // then (期待する結果): パニックもエラーも起きない
    }
}
