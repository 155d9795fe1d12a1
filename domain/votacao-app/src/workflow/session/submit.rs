use std::sync::Arc;

use crate::{
    domain::{SessionId, player::PlayerRepository, update::MultiPathUpdate},
    services::session_registry::SessionRegistry,
    workflow::session::VoteError,
};

#[async_trait::async_trait]
pub trait SubmitVotesUseCase {
    /// Writes every pending rating of the session in one multi-path update
    /// and returns what was written. The session is left as it was, so a
    /// second submit appends the same ratings again.
    async fn submit_votes(&self, id: SessionId) -> Result<MultiPathUpdate, VoteError>;
}

pub struct SubmitVotesUseCaseImpl<R: PlayerRepository, S: SessionRegistry> {
    player_repository: Arc<R>,
    session_registry: Arc<S>,
}

impl<R: PlayerRepository, S: SessionRegistry> SubmitVotesUseCaseImpl<R, S> {
    pub fn new(player_repository: Arc<R>, session_registry: Arc<S>) -> Self {
        Self {
            player_repository,
            session_registry,
        }
    }
}

#[async_trait::async_trait]
impl<R, S> SubmitVotesUseCase for SubmitVotesUseCaseImpl<R, S>
where
    R: PlayerRepository + Send + Sync + 'static,
    S: SessionRegistry + Send + Sync + 'static,
{
    async fn submit_votes(&self, id: SessionId) -> Result<MultiPathUpdate, VoteError> {
        let session = self
            .session_registry
            .get(id)
            .ok_or(VoteError::SessionNotFound(id))?;
        let session = session.lock().await;
        let update = session.build_update();

        if let Err(e) = self.player_repository.apply_update(&update).await {
            log::error!("Erro ao registrar votos: {}", e);
            return Err(e.into());
        }

        log::info!(
            "Session {} registered votes for {} players",
            id,
            update.len()
        );
        Ok(update)
    }
}
