use askama::Template;
use votacao_app::domain::{Rating, session::VotingSession};

pub const VOTE_FIELD_PREFIX: &str = "voto_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    SubmitFailed,
}

impl Notice {
    fn message(self) -> &'static str {
        match self {
            Notice::Submitted => "Votos registrados com sucesso!",
            Notice::SubmitFailed => "Erro ao registrar votos.",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Notice::Submitted => "notice success",
            Notice::SubmitFailed => "notice error",
        }
    }
}

pub fn star_label(rating: Rating) -> String {
    if rating.value() > 1 {
        format!("{} Estrelas", rating)
    } else {
        format!("{} Estrela", rating)
    }
}

struct RatingOption {
    value: u8,
    label: String,
    checked: bool,
}

struct PlayerCard<'a> {
    id: &'a str,
    nome: &'a str,
    assistencias: i64,
    gols: i64,
    field_name: String,
    options: Vec<RatingOption>,
}

/// The voting page: one card per loaded player, in load order.
#[derive(Template)]
#[template(path = "votacao.html")]
pub struct VotacaoPage<'a> {
    session_id: String,
    cards: Vec<PlayerCard<'a>>,
    notice: Option<Notice>,
    load_failed: bool,
}

impl<'a> VotacaoPage<'a> {
    pub fn new(session: &'a VotingSession, notice: Option<Notice>) -> Self {
        let cards = session
            .players()
            .iter()
            .map(|player| {
                let selected = session.selection(&player.id);
                PlayerCard {
                    id: player.id.as_str(),
                    nome: &player.nome,
                    assistencias: player.assistencias,
                    gols: player.gols,
                    field_name: format!("{}{}", VOTE_FIELD_PREFIX, player.id),
                    options: Rating::all()
                        .map(|rating| RatingOption {
                            value: rating.value(),
                            label: star_label(rating),
                            checked: selected == Some(rating),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            session_id: session.id.to_string(),
            cards,
            notice,
            load_failed: session.load_failed(),
        }
    }
}

pub fn render(session: &VotingSession, notice: Option<Notice>) -> Result<String, askama::Error> {
    VotacaoPage::new(session, notice).render()
}

#[cfg(test)]
mod tests {
    use votacao_app::domain::{PlayerId, SessionId, player::Player};

    use super::*;

    fn session_with(players: Vec<Player>) -> VotingSession {
        VotingSession::new(SessionId::new(), players)
    }

    fn ana() -> Player {
        Player {
            id: PlayerId::new("p1"),
            nome: "Ana".to_string(),
            assistencias: 2,
            gols: 1,
            votos: vec![5],
        }
    }

    #[test]
    fn labels_are_singular_then_plural() {
        let labels: Vec<String> = Rating::all().map(star_label).collect();
        assert_eq!(
            labels,
            vec!["1 Estrela", "2 Estrelas", "3 Estrelas", "4 Estrelas", "5 Estrelas"]
        );
    }

    #[test]
    fn renders_one_card_per_player() {
        let mut bia = ana();
        bia.id = PlayerId::new("p2");
        bia.nome = "Bia".to_string();
        let html = render(&session_with(vec![ana(), bia]), None).unwrap();

        assert!(html.contains("<h1>Votação de Jogadores</h1>"));
        assert_eq!(html.matches("<section class=\"card\">").count(), 2);
        assert!(html.contains("<h2 class=\"card-title\">Ana</h2>"));
        assert!(html.contains("<h2 class=\"card-title\">Bia</h2>"));
        assert!(html.contains("Assistências: 2 | Gols: 1"));
        assert_eq!(html.matches("type=\"radio\"").count(), 10);
        assert!(html.contains("id=\"rp1-1\""));
        assert!(html.contains("<label for=\"rp2-5\">5 Estrelas</label>"));
        assert!(html.contains("<button type=\"submit\">Enviar Votos</button>"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn escapes_player_text() {
        let mut player = ana();
        player.nome = "<script>\"x\" & 'y'</script>".to_string();
        let html = render(&session_with(vec![player]), None).unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("'y'"));
        assert!(html.contains("<h2 class=\"card-title\">&lt;script&gt;"));
        assert!(html.contains(" &amp; "));
    }

    #[test]
    fn marks_pending_selection_as_checked() {
        let mut session = session_with(vec![ana()]);
        session.select(PlayerId::new("p1"), Rating::try_from(3).unwrap());
        let html = render(&session, None).unwrap();

        assert_eq!(html.matches(" checked").count(), 1);
        assert!(html.contains("name=\"voto_p1\" value=\"3\" checked"));
    }

    #[test]
    fn shows_notices() {
        let session = session_with(vec![ana()]);
        let submitted = render(&session, Some(Notice::Submitted)).unwrap();
        assert!(submitted.contains("<p class=\"notice success\" role=\"alert\">Votos registrados com sucesso!</p>"));
        let failed_submit = render(&session, Some(Notice::SubmitFailed)).unwrap();
        assert!(failed_submit.contains("<p class=\"notice error\" role=\"alert\">Erro ao registrar votos.</p>"));

        let failed = VotingSession::with_failed_load(SessionId::new());
        let html = render(&failed, None).unwrap();
        assert!(html.contains("Erro ao buscar jogadores."));
        assert!(!html.contains("<section"));
    }
}
