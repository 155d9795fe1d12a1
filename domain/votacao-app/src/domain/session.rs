use std::collections::BTreeMap;

use crate::domain::{
    PlayerId, Rating, SessionId,
    player::{Player, votes_path},
    update::MultiPathUpdate,
};

/// State of one open voting page: the players loaded when it was opened and
/// the ratings picked since, not yet written.
#[derive(Clone, Debug)]
pub struct VotingSession {
    pub id: SessionId,
    players: Vec<Player>,
    selections: BTreeMap<PlayerId, Rating>,
    load_failed: bool,
}

impl VotingSession {
    pub fn new(id: SessionId, players: Vec<Player>) -> Self {
        Self {
            id,
            players,
            selections: BTreeMap::new(),
            load_failed: false,
        }
    }

    pub fn with_failed_load(id: SessionId) -> Self {
        Self {
            load_failed: true,
            ..Self::new(id, Vec::new())
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn selections(&self) -> &BTreeMap<PlayerId, Rating> {
        &self.selections
    }

    pub fn selection(&self, player_id: &PlayerId) -> Option<Rating> {
        self.selections.get(player_id).copied()
    }

    /// Last selection for a player wins.
    pub fn select(&mut self, player_id: PlayerId, rating: Rating) {
        self.selections.insert(player_id, rating);
    }

    /// Appends every pending rating to the locally held history of its
    /// player. Selections for players missing from the local list are left out.
    pub fn build_update(&self) -> MultiPathUpdate {
        self.selections
            .iter()
            .filter_map(|(player_id, rating)| {
                let Some(player) = self.players.iter().find(|p| &p.id == player_id) else {
                    log::debug!("Skipping vote for unknown player {}", player_id);
                    return None;
                };
                Some((votes_path(player_id), player.votes_with(*rating)))
            })
            .collect()
    }
}
