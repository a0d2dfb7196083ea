//! Session 模块
//!
//! 服务端会话存储：登录时把令牌和 Owner 快照绑定到一个会话，
//! TTL 与令牌有效期一致；登出显式销毁，过期由后台任务清扫。
//!
//! 会话中保存的是不可变快照 ([`OwnerInfo`])，不是可变的数据库记录。

use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::db::models::OwnerInfo;

/// 单个会话：令牌 + Owner 快照 + 生命周期边界
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub session_id: String,
    pub token: String,
    pub owner: OwnerInfo,
    /// 创建时间 (epoch 秒)
    pub created_at: i64,
    /// 过期时间 (epoch 秒) = created_at + 令牌 TTL
    pub expires_at: i64,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }
}

/// 进程级会话存储，按 session id 索引
///
/// DashMap 支持无锁并发读写；存储只在登录/登出/清扫时变更。
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// 创建并绑定新会话，返回会话快照
    pub fn bind(&self, token: String, owner: OwnerInfo, ttl_seconds: i64) -> Session {
        let now = Utc::now().timestamp();
        let session = Session {
            session_id: Uuid::new_v4().to_string(),
            token,
            owner,
            created_at: now,
            expires_at: now + ttl_seconds.max(0),
        };
        self.sessions
            .insert(session.session_id.clone(), session.clone());
        session
    }

    /// 取会话；过期会话等同不存在 (顺手移除)
    pub fn get(&self, session_id: &str) -> Option<Session> {
        let expired = match self.sessions.get(session_id) {
            Some(entry) if entry.is_expired() => true,
            Some(entry) => return Some(entry.clone()),
            None => return None,
        };
        if expired {
            self.sessions.remove(session_id);
        }
        None
    }

    /// 登出：销毁会话，返回是否存在
    pub fn revoke(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// 按 Owner id 销毁全部会话 (Owner 删除时调用)
    pub fn revoke_for_owner(&self, owner_id: &str) -> usize {
        let ids: Vec<String> = self
            .sessions
            .iter()
            .filter(|e| e.owner.id == owner_id)
            .map(|e| e.session_id.clone())
            .collect();
        for id in &ids {
            self.sessions.remove(id);
        }
        ids.len()
    }

    /// 清扫过期会话，返回移除数量 (后台任务周期调用)
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired());
        before - self.sessions.len()
    }

    /// 当前会话数 (含未清扫的过期会话)
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(id: &str) -> OwnerInfo {
        OwnerInfo {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            username: "maria_lopez".to_string(),
            name: "Maria".to_string(),
            phone: "1234567890".to_string(),
        }
    }

    #[test]
    fn bind_then_get_roundtrip() {
        let store = SessionStore::new();
        let session = store.bind("tok".into(), owner("owner:1"), 7200);

        let fetched = store.get(&session.session_id).unwrap();
        assert_eq!(fetched.token, "tok");
        assert_eq!(fetched.owner.id, "owner:1");
        assert_eq!(fetched.expires_at - fetched.created_at, 7200);
    }

    #[test]
    fn expired_session_is_gone() {
        let store = SessionStore::new();
        let session = store.bind("tok".into(), owner("owner:1"), 0);

        assert!(store.get(&session.session_id).is_none());
    }

    #[test]
    fn revoke_destroys_session() {
        let store = SessionStore::new();
        let session = store.bind("tok".into(), owner("owner:1"), 7200);

        assert!(store.revoke(&session.session_id));
        assert!(store.get(&session.session_id).is_none());
        assert!(!store.revoke(&session.session_id));
    }

    #[test]
    fn purge_removes_only_expired() {
        let store = SessionStore::new();
        store.bind("a".into(), owner("owner:1"), 0);
        let live = store.bind("b".into(), owner("owner:2"), 7200);

        assert_eq!(store.purge_expired(), 1);
        assert!(store.get(&live.session_id).is_some());
    }

    #[test]
    fn revoke_for_owner_sweeps_all() {
        let store = SessionStore::new();
        store.bind("a".into(), owner("owner:1"), 7200);
        store.bind("b".into(), owner("owner:1"), 7200);
        let other = store.bind("c".into(), owner("owner:2"), 7200);

        assert_eq!(store.revoke_for_owner("owner:1"), 2);
        assert!(store.get(&other.session_id).is_some());
    }
}
