//! InMemory SessionRepository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! `DashMap` をインメモリストアとして使用し、同期は接続エントリ単位です。
//!
//! Idle Reaper と各接続のセッションループの両方がここに触れるため、
//! 削除系の操作は全て存在しないキーに対して no-op です。どちらが先に
//! 削除しても、後から来た方は何もしません。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    ConnectionId, GroupId, Location, Session, SessionError, SessionRepository, Timestamp,
};

/// インメモリ SessionRepository 実装
pub struct InMemorySessionRepository {
    /// 接続 ID からセッション状態へのマップ
    sessions: DashMap<ConnectionId, Session>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn register(
        &self,
        connection_id: ConnectionId,
        group_id: GroupId,
        connected_at: Timestamp,
    ) {
        self.sessions
            .insert(connection_id, Session::new(group_id, connected_at));
    }

    async fn set_location(
        &self,
        connection_id: &ConnectionId,
        location: Location,
        at: Timestamp,
    ) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(connection_id)
            .ok_or_else(|| SessionError::NotRegistered(connection_id.to_string()))?;
        session.location = Some(location);
        session.last_activity = at;
        Ok(())
    }

    async fn location_of(&self, connection_id: &ConnectionId) -> Option<Location> {
        self.sessions
            .get(connection_id)
            .and_then(|session| session.location.clone())
    }

    async fn group_of(&self, connection_id: &ConnectionId) -> Option<GroupId> {
        self.sessions
            .get(connection_id)
            .map(|session| session.group_id.clone())
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions
            .get(connection_id)
            .map(|session| session.value().clone())
    }

    async fn remove(&self, connection_id: &ConnectionId) {
        self.sessions.remove(connection_id);
    }

    async fn stale_connection_ids(
        &self,
        now: Timestamp,
        idle_timeout_millis: i64,
    ) -> Vec<ConnectionId> {
        self.sessions
            .iter()
            .filter(|entry| now.millis_since(entry.value().last_activity) > idle_timeout_millis)
            .map(|entry| entry.key().clone())
            .collect()
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}
