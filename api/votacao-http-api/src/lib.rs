use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post, put},
};
use log::info;
use votacao_app::{Application, domain::SessionId};

use crate::error::ApiError;

mod api;
pub mod error;
mod html;
pub mod page;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

fn parse_session_id(value: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(value).ok_or_else(|| ApiError::NotFound(format!("session {}", value)))
}

pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .route("/", get(html::index))
        .route("/votacao/{session}", get(html::show).post(html::submit))
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            Router::new()
                .route("/sessions", post(api::create_session))
                .route("/sessions/{session}", get(api::get_session))
                .route(
                    "/sessions/{session}/votos/{player_id}",
                    put(api::select_rating),
                )
                .route("/sessions/{session}/submit", post(api::submit_votes)),
        )
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    address: SocketAddr,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;

    info!("Voting page listening on {}", address);
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP server shut down gracefully");
    Ok(())
}
