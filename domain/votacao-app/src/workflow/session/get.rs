use std::sync::Arc;

use crate::{
    domain::{SessionId, session::VotingSession},
    services::session_registry::SessionRegistry,
    workflow::session::VoteError,
};

#[async_trait::async_trait]
pub trait GetSessionUseCase {
    async fn get_session(&self, id: SessionId) -> Result<VotingSession, VoteError>;
}

pub struct GetSessionUseCaseImpl<S: SessionRegistry> {
    session_registry: Arc<S>,
}

impl<S: SessionRegistry> GetSessionUseCaseImpl<S> {
    pub fn new(session_registry: Arc<S>) -> Self {
        Self { session_registry }
    }
}

#[async_trait::async_trait]
impl<S: SessionRegistry + Send + Sync + 'static> GetSessionUseCase for GetSessionUseCaseImpl<S> {
    async fn get_session(&self, id: SessionId) -> Result<VotingSession, VoteError> {
        let session = self
            .session_registry
            .get(id)
            .ok_or(VoteError::SessionNotFound(id))?;
        let snapshot = session.lock().await.clone();
        Ok(snapshot)
    }
}
