use std::time::Duration;

use serde_json::{Map, Value};
use votacao_app::domain::{
    RepoError,
    player::{PLAYERS_COLLECTION, Player, PlayerRepository},
    update::MultiPathUpdate,
};

use crate::record::players_from_snapshot;

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    /// Database root, e.g. `https://my-app-default-rtdb.firebaseio.com`.
    pub base_url: String,
    /// Database secret or ID token, sent as the `auth` query parameter.
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl FirebaseConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Player storage on the Firebase Realtime Database REST API.
pub struct FirebasePlayerRepository {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl FirebasePlayerRepository {
    pub fn new(config: FirebaseConfig) -> Result<Self, RepoError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepoError::Storage(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path.trim_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RepoError> {
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let content = response.text().await.unwrap_or_default();
            return Err(RepoError::Storage(format!(
                "firebase responded {}: {}",
                status, content
            )));
        }
        Ok(response)
    }
}

/// Body of a multi-path `PATCH` at the database root. The REST API takes
/// paths relative to the request location, so leading slashes are dropped.
pub(crate) fn patch_body(update: &MultiPathUpdate) -> Value {
    let entries: Map<String, Value> = update
        .iter()
        .map(|(path, votes)| {
            (
                path.trim_start_matches('/').to_string(),
                Value::from(votes.to_vec()),
            )
        })
        .collect();
    Value::Object(entries)
}

#[async_trait::async_trait]
impl PlayerRepository for FirebasePlayerRepository {
    async fn fetch_players(&self) -> Result<Option<Vec<Player>>, RepoError> {
        let request = self.authorize(self.client.get(self.url(PLAYERS_COLLECTION)));
        let response = request
            .send()
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        let response = Self::check_status(response).await?;
        let snapshot: Value = response
            .json()
            .await
            .map_err(|e| RepoError::Malformed(e.to_string()))?;
        players_from_snapshot(snapshot)
    }

    async fn apply_update(&self, update: &MultiPathUpdate) -> Result<(), RepoError> {
        log::debug!("Sending multi-path update with {} paths", update.len());
        let request = self.authorize(self.client.patch(self.url("")).json(&patch_body(update)));
        let response = request
            .send()
            .await
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn repository(base_url: &str) -> FirebasePlayerRepository {
        FirebasePlayerRepository::new(FirebaseConfig {
            base_url: base_url.to_string(),
            auth_token: None,
            timeout: FirebaseConfig::DEFAULT_TIMEOUT,
        })
        .unwrap()
    }

    #[test]
    fn builds_rest_urls() {
        let repo = repository("https://demo-rtdb.firebaseio.com/");
        assert_eq!(
            repo.url(PLAYERS_COLLECTION),
            "https://demo-rtdb.firebaseio.com/jogadores.json"
        );
        assert_eq!(repo.url(""), "https://demo-rtdb.firebaseio.com/.json");
    }

    #[test]
    fn patch_body_uses_relative_paths() {
        let update: MultiPathUpdate = [
            ("/jogadores/P1/votos".to_string(), vec![3, 4]),
            ("/jogadores/P2/votos".to_string(), vec![2]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            patch_body(&update),
            json!({"jogadores/P1/votos": [3, 4], "jogadores/P2/votos": [2]})
        );
        assert_eq!(patch_body(&MultiPathUpdate::new()), json!({}));
    }

    #[tokio::test]
    async fn unreachable_database_is_a_storage_error() {
        let repo = FirebasePlayerRepository::new(FirebaseConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            auth_token: Some("secret".to_string()),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        assert!(matches!(
            repo.fetch_players().await,
            Err(RepoError::Storage(_))
        ));
        assert!(matches!(
            repo.apply_update(&MultiPathUpdate::new()).await,
            Err(RepoError::Storage(_))
        ));
    }
}
