use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;
use votacao_app::domain::{
    PlayerId, Rating, player::Player, session::VotingSession, update::MultiPathUpdate,
};

use crate::{AppState, error::ApiError, parse_session_id};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSessionResponse {
    session_id: String,
    jogadores: Vec<Player>,
    votos: BTreeMap<PlayerId, Rating>,
    load_failed: bool,
}

impl From<VotingSession> for JsonSessionResponse {
    fn from(session: VotingSession) -> Self {
        Self {
            session_id: session.id.to_string(),
            jogadores: session.players().to_vec(),
            votos: session.selections().clone(),
            load_failed: session.load_failed(),
        }
    }
}

#[derive(serde::Deserialize, Validate)]
pub struct JsonVoteRequest {
    #[validate(range(min = 1, max = 5))]
    voto: i64,
}

pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<JsonSessionResponse>) {
    let session = state.app.session_create_use_case.create_session().await;
    (StatusCode::CREATED, Json(session.into()))
}

pub async fn get_session(
    Path(session): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<JsonSessionResponse>, ApiError> {
    let id = parse_session_id(&session)?;
    let session = state.app.session_get_use_case.get_session(id).await?;
    Ok(Json(session.into()))
}

pub async fn select_rating(
    Path((session, player_id)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(request): Json<JsonVoteRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&session)?;
    // `validate` reports the field-level range error. The conversion only
    // produces the domain `Rating` and cannot fail after it.
    request.validate()?;
    let rating = Rating::try_from(request.voto)?;
    state
        .app
        .session_select_rating_use_case
        .select_rating(id, PlayerId::new(player_id), rating)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn submit_votes(
    Path(session): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MultiPathUpdate>, ApiError> {
    let id = parse_session_id(&session)?;
    let update = state
        .app
        .session_submit_votes_use_case
        .submit_votes(id)
        .await?;
    Ok(Json(update))
}
