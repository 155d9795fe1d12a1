use crate::domain::{PlayerId, Rating, RepoError, update::MultiPathUpdate};

pub const PLAYERS_COLLECTION: &str = "jogadores";

const VOTES_FIELD: &str = "votos";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub nome: String,
    pub assistencias: i64,
    pub gols: i64,
    /// Past ratings in the order they were cast. Only ever appended to.
    pub votos: Vec<i64>,
}

impl Player {
    /// History the player would have after `rating` is appended.
    pub fn votes_with(&self, rating: Rating) -> Vec<i64> {
        let mut votos = self.votos.clone();
        votos.push(rating.value() as i64);
        votos
    }
}

/// Storage location of a player's vote history, e.g. `/jogadores/p1/votos`.
pub fn votes_path(player_id: &PlayerId) -> String {
    format!("/{}/{}/{}", PLAYERS_COLLECTION, player_id, VOTES_FIELD)
}

/// Inverse of [`votes_path`]. The leading slash is optional.
pub fn parse_votes_path(path: &str) -> Option<PlayerId> {
    let mut segments = path.strip_prefix('/').unwrap_or(path).split('/');
    let (Some(collection), Some(id), Some(field), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };
    if collection != PLAYERS_COLLECTION || field != VOTES_FIELD || id.is_empty() {
        return None;
    }
    Some(PlayerId::new(id))
}

#[async_trait::async_trait]
pub trait PlayerRepository {
    /// Reads the whole player collection. `Ok(None)` means the collection
    /// does not exist. Players come back in the order the store reports them.
    async fn fetch_players(&self) -> Result<Option<Vec<Player>>, RepoError>;

    /// Applies every path of `update` in one atomic write.
    async fn apply_update(&self, update: &MultiPathUpdate) -> Result<(), RepoError>;
}
