use std::sync::Arc;

use log::{error, info, warn};
use votacao_app::{build_application, domain::player::PlayerRepository};
use votacao_persistence_firebase::{
    firebase::FirebasePlayerRepository, memory::InMemoryPlayerRepository,
};

use crate::config::Config;

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

async fn serve<R: PlayerRepository + Send + Sync + 'static>(repository: R, config: &Config) {
    let app = Arc::new(build_application(
        Arc::new(repository),
        config.session_time_to_idle,
    ));

    if let Err(e) = votacao_http_api::run(app, config.address, shutdown_signal()).await {
        error!("HTTP server failed: {}", e);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            panic!("Failed to load .env file: {}", e);
        }
    }

    let config = Config::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {}", e));

    logs::init_logger(config.log_file.as_ref());

    match &config.firebase {
        Some(firebase) => {
            info!("Using Firebase Realtime Database at {}", firebase.base_url);
            let repository = FirebasePlayerRepository::new(firebase.clone())
                .unwrap_or_else(|e| panic!("Failed to set up Firebase client: {}", e));
            serve(repository, &config).await;
        }
        None => {
            let repository = match &config.seed_file {
                Some(path) => {
                    info!("Using in-memory players seeded from {}", path.display());
                    InMemoryPlayerRepository::from_file(path)
                        .unwrap_or_else(|e| panic!("Failed to load seed file: {}", e))
                }
                None => {
                    warn!("VOTACAO_FIREBASE_URL not set, starting with an empty in-memory store");
                    InMemoryPlayerRepository::default()
                }
            };
            serve(repository, &config).await;
        }
    }
}
