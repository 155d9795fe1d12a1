use std::{sync::Arc, time::Duration};

use crate::{
    domain::player::PlayerRepository,
    services::session_registry::SessionRegistryImpl,
    workflow::session::{
        create::{CreateSessionUseCase, CreateSessionUseCaseImpl},
        get::{GetSessionUseCase, GetSessionUseCaseImpl},
        select::{SelectRatingUseCase, SelectRatingUseCaseImpl},
        submit::{SubmitVotesUseCase, SubmitVotesUseCaseImpl},
    },
};

pub mod domain;
pub mod services;
pub mod workflow;

pub struct Application {
    pub session_create_use_case: Box<dyn CreateSessionUseCase + Send + Sync + 'static>,
    pub session_get_use_case: Box<dyn GetSessionUseCase + Send + Sync + 'static>,
    pub session_select_rating_use_case: Box<dyn SelectRatingUseCase + Send + Sync + 'static>,
    pub session_submit_votes_use_case: Box<dyn SubmitVotesUseCase + Send + Sync + 'static>,
}

pub fn build_application<PR: PlayerRepository + Send + Sync + 'static>(
    player_repository: Arc<PR>,
    session_time_to_idle: Duration,
) -> Application {
    let session_registry = Arc::new(SessionRegistryImpl::new(session_time_to_idle));

    Application {
        session_create_use_case: Box::new(CreateSessionUseCaseImpl::new(
            player_repository.clone(),
            session_registry.clone(),
        )),
        session_get_use_case: Box::new(GetSessionUseCaseImpl::new(session_registry.clone())),
        session_select_rating_use_case: Box::new(SelectRatingUseCaseImpl::new(
            session_registry.clone(),
        )),
        session_submit_votes_use_case: Box::new(SubmitVotesUseCaseImpl::new(
            player_repository,
            session_registry,
        )),
    }
}
