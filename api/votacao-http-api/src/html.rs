use std::collections::HashMap;

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use votacao_app::{
    domain::{PlayerId, Rating, SessionId},
    workflow::session::VoteError,
};

use crate::{
    AppState,
    error::ApiError,
    page::{self, Notice, VOTE_FIELD_PREFIX},
};

pub async fn index(State(state): State<AppState>) -> Redirect {
    let session = state.app.session_create_use_case.create_session().await;
    Redirect::to(&format!("/votacao/{}", session.id))
}

/// Sends the browser back to `/` for a fresh session.
fn restart() -> Response {
    Redirect::to("/").into_response()
}

/// Unknown or expired sessions restart at `/`.
pub async fn show(
    Path(session): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let Some(id) = SessionId::parse(&session) else {
        return Ok(restart());
    };
    match state.app.session_get_use_case.get_session(id).await {
        Ok(session) => Ok(Html(page::render(&session, None)?).into_response()),
        Err(VoteError::SessionNotFound(_)) => Ok(restart()),
        Err(e) => Err(e.into()),
    }
}

/// Reads `voto_<playerId>=<rating>` fields. Fields without the prefix are ignored.
fn parse_votes(form: HashMap<String, String>) -> Result<Vec<(PlayerId, Rating)>, ApiError> {
    form.into_iter()
        .filter_map(|(field, value)| {
            field
                .strip_prefix(VOTE_FIELD_PREFIX)
                .map(|id| (PlayerId::new(id), value))
        })
        .map(|(player_id, value)| -> Result<(PlayerId, Rating), ApiError> {
            let value: i64 = value
                .trim()
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("invalid rating {:?}", value)))?;
            Ok((player_id, Rating::try_from(value)?))
        })
        .collect()
}

pub async fn submit(
    Path(session): Path<String>,
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let Some(id) = SessionId::parse(&session) else {
        return Ok(restart());
    };
    let votes = parse_votes(form)?;
    for (player_id, rating) in votes {
        match state
            .app
            .session_select_rating_use_case
            .select_rating(id, player_id, rating)
            .await
        {
            Ok(()) => {}
            Err(VoteError::SessionNotFound(_)) => return Ok(restart()),
            Err(e) => return Err(e.into()),
        }
    }

    let (status, notice) = match state.app.session_submit_votes_use_case.submit_votes(id).await {
        Ok(_) => (StatusCode::OK, Notice::Submitted),
        Err(VoteError::SessionNotFound(_)) => return Ok(restart()),
        Err(e) => match ApiError::from(e) {
            ApiError::Storage(_) => (StatusCode::BAD_GATEWAY, Notice::SubmitFailed),
            other => return Err(other),
        },
    };

    let session = state.app.session_get_use_case.get_session(id).await?;
    Ok((status, Html(page::render(&session, Some(notice))?)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> HashMap<String, String> {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_prefixed_vote_fields_only() {
        let mut votes = parse_votes(form(&[("voto_p1", "4"), ("voto_-Nx_2", " 1 "), ("csrf", "x")]))
            .unwrap();
        votes.sort();

        assert_eq!(
            votes,
            vec![
                (PlayerId::new("-Nx_2"), Rating::try_from(1).unwrap()),
                (PlayerId::new("p1"), Rating::try_from(4).unwrap()),
            ]
        );
    }

    #[test]
    fn rejects_bad_ratings() {
        assert!(matches!(
            parse_votes(form(&[("voto_p1", "7")])),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            parse_votes(form(&[("voto_p1", "cinco")])),
            Err(ApiError::BadRequest(_))
        ));
    }
}
