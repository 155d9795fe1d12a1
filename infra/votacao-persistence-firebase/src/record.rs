use serde::{Deserialize, Deserializer};
use serde_json::Value;
use votacao_app::domain::{PlayerId, RepoError, player::Player};

/// Shape of a player node under `jogadores/<id>`.
#[derive(Deserialize)]
pub(crate) struct PlayerRecord {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub assistencias: i64,
    #[serde(default)]
    pub gols: i64,
    #[serde(default, deserialize_with = "votes_without_holes")]
    pub votos: Vec<i64>,
}

/// Arrays with deleted entries come back with `null` holes. Those are dropped.
fn votes_without_holes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    let votes = Option::<Vec<Option<i64>>>::deserialize(deserializer)?;
    Ok(votes.into_iter().flatten().flatten().collect())
}

impl PlayerRecord {
    pub fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            nome: self.nome,
            assistencias: self.assistencias,
            gols: self.gols,
            votos: self.votos,
        }
    }
}

/// Turns the keyed `jogadores` object into a list, keeping the order in
/// which the store returned the keys. `null` means no collection. Records
/// that do not parse are skipped.
pub(crate) fn players_from_snapshot(snapshot: Value) -> Result<Option<Vec<Player>>, RepoError> {
    let entries = match snapshot {
        Value::Null => return Ok(None),
        Value::Object(entries) => entries,
        other => {
            return Err(RepoError::Malformed(format!(
                "expected an object of players, got {}",
                other
            )));
        }
    };

    let players = entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<PlayerRecord>(value) {
            Ok(record) => Some(record.into_player(PlayerId::new(key))),
            Err(e) => {
                log::warn!("Skipping malformed player {}: {}", key, e);
                None
            }
        })
        .collect();
    Ok(Some(players))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_snapshot_means_no_collection() {
        assert_eq!(players_from_snapshot(Value::Null), Ok(None));
    }

    #[test]
    fn keeps_key_order_and_fills_missing_fields() {
        let snapshot: Value = serde_json::from_str(
            r#"{"zeca": {"nome": "Zeca", "gols": 4},
                "ana": {"nome": "Ana", "assistencias": 2, "gols": 1, "votos": [5]}}"#,
        )
        .unwrap();

        let players = players_from_snapshot(snapshot).unwrap().unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, PlayerId::new("zeca"));
        assert_eq!(players[0].assistencias, 0);
        assert_eq!(players[0].gols, 4);
        assert!(players[0].votos.is_empty());
        assert_eq!(players[1].id, PlayerId::new("ana"));
        assert_eq!(players[1].nome, "Ana");
        assert_eq!(players[1].votos, vec![5]);
    }

    #[test]
    fn rejects_non_object_snapshot() {
        let result = players_from_snapshot(json!([1, 2, 3]));
        assert!(matches!(result, Err(RepoError::Malformed(_))));
    }

    #[test]
    fn skips_malformed_players_and_keeps_the_rest() {
        let snapshot: Value = serde_json::from_str(
            r#"{"p1": {"nome": "Ana", "gols": 1, "votos": [5, null, 3]},
                "p2": {"nome": "Bia", "gols": "3"},
                "p3": 7,
                "p4": {"nome": "Caio", "votos": null}}"#,
        )
        .unwrap();

        let players = players_from_snapshot(snapshot).unwrap().unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, PlayerId::new("p1"));
        assert_eq!(players[0].votos, vec![5, 3]);
        assert_eq!(players[1].id, PlayerId::new("p4"));
        assert!(players[1].votos.is_empty());
    }
}
