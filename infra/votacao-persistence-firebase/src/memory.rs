use std::{path::Path, sync::RwLock};

use votacao_app::domain::{
    RepoError,
    player::{Player, PlayerRepository, parse_votes_path},
    update::MultiPathUpdate,
};

use crate::record::players_from_snapshot;

/// Player storage held in process memory. Seeded from a document shaped
/// like the `jogadores` collection.
pub struct InMemoryPlayerRepository {
    players: RwLock<Option<Vec<Player>>>,
}

impl InMemoryPlayerRepository {
    pub fn new(players: Option<Vec<Player>>) -> Self {
        Self {
            players: RwLock::new(players),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RepoError> {
        let snapshot = serde_json::from_str(json).map_err(|e| RepoError::Malformed(e.to_string()))?;
        Ok(Self::new(players_from_snapshot(snapshot)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RepoError::Storage(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    fn lock_error() -> RepoError {
        RepoError::Storage("player store lock poisoned".to_string())
    }
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait::async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    async fn fetch_players(&self) -> Result<Option<Vec<Player>>, RepoError> {
        let players = self.players.read().map_err(|_| Self::lock_error())?;
        Ok(players.clone())
    }

    async fn apply_update(&self, update: &MultiPathUpdate) -> Result<(), RepoError> {
        let targets = update
            .iter()
            .map(|(path, votes)| {
                parse_votes_path(path)
                    .map(|id| (id, votes.to_vec()))
                    .ok_or_else(|| RepoError::Malformed(format!("unsupported path {}", path)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if targets.is_empty() {
            return Ok(());
        }

        let mut players = self.players.write().map_err(|_| Self::lock_error())?;
        let players = players.get_or_insert_with(Vec::new);
        for (id, votos) in targets {
            match players.iter_mut().find(|p| p.id == id) {
                Some(player) => player.votos = votos,
                None => players.push(Player {
                    id,
                    nome: String::new(),
                    assistencias: 0,
                    gols: 0,
                    votos,
                }),
            }
        }
        Ok(())
    }
}
