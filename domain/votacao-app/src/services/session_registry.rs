use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::domain::{SessionId, session::VotingSession};

pub type SharedSession = Arc<Mutex<VotingSession>>;

pub trait SessionRegistry {
    fn insert(&self, session: VotingSession) -> SharedSession;
    fn get(&self, id: SessionId) -> Option<SharedSession>;
}

pub struct SessionRegistryImpl {
    sessions: moka::sync::Cache<SessionId, SharedSession>,
}

impl SessionRegistryImpl {
    pub const DEFAULT_TIME_TO_IDLE: Duration = Duration::from_secs(60 * 60);
    pub const MAX_SESSIONS: u64 = 10_000;

    pub fn new(time_to_idle: Duration) -> Self {
        Self {
            sessions: moka::sync::Cache::builder()
                .max_capacity(Self::MAX_SESSIONS)
                .time_to_idle(time_to_idle)
                .build(),
        }
    }
}

impl Default for SessionRegistryImpl {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIME_TO_IDLE)
    }
}

impl SessionRegistry for SessionRegistryImpl {
    fn insert(&self, session: VotingSession) -> SharedSession {
        let id = session.id;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(id, shared.clone());
        shared
    }

    fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inserted_session_is_shared() {
        let registry = SessionRegistryImpl::default();
        let id = SessionId::new();
        let inserted = registry.insert(VotingSession::new(id, Vec::new()));

        let fetched = registry.get(id).expect("session should be registered");
        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert!(registry.get(SessionId::new()).is_none());
    }
}
