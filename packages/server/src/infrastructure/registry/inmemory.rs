//! InMemory GroupRegistry 実装
//!
//! ドメイン層が定義する GroupRegistry trait の具体的な実装。
//! `DashMap` をインメモリストアとして使用します。
//!
//! ## 同期の方針
//!
//! 同期はグローバルロックではなくエントリ（グループ）単位です。
//! join / leave は単一のエントリガードの中で完結するため、ブロードキャスト
//! 中の並行 join / leave がメンバー集合の途中状態を観測することは
//! ありません。leave で集合が空になった場合のエントリ削除も同じガード内で
//! 行うため、空のグループが読み手から観測されるのは削除の過渡期のみです。

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::{ConnectionId, GroupId, GroupRegistry};

/// インメモリ GroupRegistry 実装
pub struct InMemoryGroupRegistry {
    /// グループ識別子から所属接続の集合へのマップ
    groups: DashMap<GroupId, HashSet<ConnectionId>>,
}

impl InMemoryGroupRegistry {
    /// 新しい InMemoryGroupRegistry を作成
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }
}

impl Default for InMemoryGroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupRegistry for InMemoryGroupRegistry {
    async fn join(&self, group_id: &GroupId, connection_id: ConnectionId) {
        self.groups
            .entry(group_id.clone())
            .or_default()
            .insert(connection_id);
        tracing::debug!("Connection joined group '{}'", group_id);
    }

    async fn leave(&self, group_id: &GroupId, connection_id: &ConnectionId) {
        if let Entry::Occupied(mut occupied) = self.groups.entry(group_id.clone()) {
            occupied.get_mut().remove(connection_id);
            if occupied.get().is_empty() {
                occupied.remove();
                tracing::debug!("Group '{}' is empty and was removed", group_id);
            }
        }
    }

    async fn members(&self, group_id: &GroupId) -> Vec<ConnectionId> {
        self.groups
            .get(group_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn group_summaries(&self) -> Vec<(GroupId, usize)> {
        self.groups
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str) -> GroupId {
        GroupId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_creates_group_lazily() {
        // テスト項目: 最初の join でグループが暗黙に作成される
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();
        let g1 = group("g1");
        let conn = ConnectionId::generate();

        // when (操作):
        registry.join(&g1, conn.clone()).await;

        // then (期待する結果):
        let members = registry.members(&g1).await;
        assert_eq!(members, vec![conn]);
        assert_eq!(registry.group_summaries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_members_of_unknown_group_is_empty() {
        // テスト項目: 存在しないグループのメンバー取得は空のリストを返す
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();

        // when (操作):
        let members = registry.members(&group("nonexistent")).await;

        // then (期待する結果):
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_leave_removes_empty_group() {
        // テスト項目: 最後のメンバーの leave でグループのエントリが削除される
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();
        let g1 = group("g1");
        let conn = ConnectionId::generate();
        registry.join(&g1, conn.clone()).await;

        // when (操作):
        registry.leave(&g1, &conn).await;

        // then (期待する結果):
        assert!(registry.members(&g1).await.is_empty());
        assert!(registry.group_summaries().await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_keeps_group_with_remaining_members() {
        // テスト項目: 他のメンバーが残っている場合、leave してもグループは残る
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();
        let g1 = group("g1");
        let conn1 = ConnectionId::generate();
        let conn2 = ConnectionId::generate();
        registry.join(&g1, conn1.clone()).await;
        registry.join(&g1, conn2.clone()).await;

        // when (操作):
        registry.leave(&g1, &conn1).await;

        // then (期待する結果):
        let members = registry.members(&g1).await;
        assert_eq!(members, vec![conn2]);
        assert_eq!(registry.group_summaries().await, vec![(g1, 1)]);
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        // テスト項目: 存在しない接続・グループに対する leave が no-op になる（冪等性）
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();
        let g1 = group("g1");
        let conn = ConnectionId::generate();

        // when (操作): 登録されていない接続を leave
        registry.leave(&g1, &conn).await;
        registry.leave(&g1, &conn).await;

        // then (期待する結果): エラーにならず、グループも作られない
        assert!(registry.group_summaries().await.is_empty());
    }

    #[tokio::test]
    async fn test_groups_are_isolated() {
        // テスト項目: 異なるグループのメンバー集合が互いに独立している
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();
        let g1 = group("g1");
        let g2 = group("g2");
        let conn1 = ConnectionId::generate();
        let conn2 = ConnectionId::generate();

        // when (操作):
        registry.join(&g1, conn1.clone()).await;
        registry.join(&g2, conn2.clone()).await;

        // then (期待する結果):
        assert_eq!(registry.members(&g1).await, vec![conn1]);
        assert_eq!(registry.members(&g2).await, vec![conn2]);
    }

    #[tokio::test]
    async fn test_tracked_groups_equal_groups_with_members() {
        // テスト項目: 追跡中のグループ集合が「メンバーが1人以上いるグループ」と常に一致する
        // given (前提条件):
        let registry = InMemoryGroupRegistry::new();
        let g1 = group("g1");
        let g2 = group("g2");
        let conn1 = ConnectionId::generate();
        let conn2 = ConnectionId::generate();
        let conn3 = ConnectionId::generate();
        registry.join(&g1, conn1.clone()).await;
        registry.join(&g1, conn2.clone()).await;
        registry.join(&g2, conn3.clone()).await;

        // when (操作): g2 を空にし、g1 には1人残す
        registry.leave(&g2, &conn3).await;
        registry.leave(&g1, &conn1).await;

        // then (期待する結果): g1 だけが追跡されている
        let summaries = registry.group_summaries().await;
        assert_eq!(summaries, vec![(g1, 1)]);
    }
}
