use std::sync::Arc;

use crate::{
    domain::{PlayerId, Rating, SessionId},
    services::session_registry::SessionRegistry,
    workflow::session::VoteError,
};

#[async_trait::async_trait]
pub trait SelectRatingUseCase {
    /// Records a pending rating for a player. Nothing is written to storage.
    async fn select_rating(
        &self,
        id: SessionId,
        player_id: PlayerId,
        rating: Rating,
    ) -> Result<(), VoteError>;
}

pub struct SelectRatingUseCaseImpl<S: SessionRegistry> {
    session_registry: Arc<S>,
}

impl<S: SessionRegistry> SelectRatingUseCaseImpl<S> {
    pub fn new(session_registry: Arc<S>) -> Self {
        Self { session_registry }
    }
}

#[async_trait::async_trait]
impl<S: SessionRegistry + Send + Sync + 'static> SelectRatingUseCase
    for SelectRatingUseCaseImpl<S>
{
    async fn select_rating(
        &self,
        id: SessionId,
        player_id: PlayerId,
        rating: Rating,
    ) -> Result<(), VoteError> {
        let session = self
            .session_registry
            .get(id)
            .ok_or(VoteError::SessionNotFound(id))?;
        log::debug!("Session {} selected {} for {}", id, rating, player_id);
        session.lock().await.select(player_id, rating);
        Ok(())
    }
}
