use std::sync::Arc;

use crate::{
    domain::{SessionId, player::PlayerRepository, session::VotingSession},
    services::session_registry::SessionRegistry,
};

#[async_trait::async_trait]
pub trait CreateSessionUseCase {
    /// Opens a voting session and loads the player list into it once.
    async fn create_session(&self) -> VotingSession;
}

pub struct CreateSessionUseCaseImpl<R: PlayerRepository, S: SessionRegistry> {
    player_repository: Arc<R>,
    session_registry: Arc<S>,
}

impl<R: PlayerRepository, S: SessionRegistry> CreateSessionUseCaseImpl<R, S> {
    pub fn new(player_repository: Arc<R>, session_registry: Arc<S>) -> Self {
        Self {
            player_repository,
            session_registry,
        }
    }
}

#[async_trait::async_trait]
impl<R, S> CreateSessionUseCase for CreateSessionUseCaseImpl<R, S>
where
    R: PlayerRepository + Send + Sync + 'static,
    S: SessionRegistry + Send + Sync + 'static,
{
    async fn create_session(&self) -> VotingSession {
        let id = SessionId::new();
        let session = match self.player_repository.fetch_players().await {
            Ok(Some(players)) => {
                log::info!("Session {} loaded {} players", id, players.len());
                VotingSession::new(id, players)
            }
            Ok(None) => {
                log::info!("Session {} found no player collection", id);
                VotingSession::new(id, Vec::new())
            }
            Err(e) => {
                log::error!("Erro ao buscar jogadores: {}", e);
                VotingSession::with_failed_load(id)
            }
        };
        self.session_registry.insert(session.clone());
        session
    }
}
