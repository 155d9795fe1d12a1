use thiserror::Error;

use crate::domain::{RepoError, SessionId};

pub mod create;
pub mod get;
pub mod select;
pub mod submit;

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use crate::domain::{
        PlayerId, RepoError,
        player::{Player, PlayerRepository},
        update::MultiPathUpdate,
    };

    /// Repository double that serves a fixed collection and records writes.
    #[derive(Default)]
    pub struct FakePlayerRepository {
        pub players: Option<Vec<Player>>,
        pub fail_fetch: bool,
        pub fail_update: bool,
        pub updates: Mutex<Vec<MultiPathUpdate>>,
    }

    impl FakePlayerRepository {
        pub fn with_players(players: Vec<Player>) -> Self {
            Self {
                players: Some(players),
                ..Default::default()
            }
        }

        pub fn recorded_updates(&self) -> Vec<MultiPathUpdate> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PlayerRepository for FakePlayerRepository {
        async fn fetch_players(&self) -> Result<Option<Vec<Player>>, RepoError> {
            if self.fail_fetch {
                return Err(RepoError::Storage("connection refused".to_string()));
            }
            Ok(self.players.clone())
        }

        async fn apply_update(&self, update: &MultiPathUpdate) -> Result<(), RepoError> {
            if self.fail_update {
                return Err(RepoError::Storage("permission denied".to_string()));
            }
            self.updates.lock().unwrap().push(update.clone());
            Ok(())
        }
    }

    pub fn player(id: &str, nome: &str, assistencias: i64, gols: i64, votos: Vec<i64>) -> Player {
        Player {
            id: PlayerId::new(id),
            nome: nome.to_string(),
            assistencias,
            gols,
            votos,
        }
    }
}
