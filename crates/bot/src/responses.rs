use wordle_api::models::{PuzzleScore, SubmittedScore};

/// Title and body of a reply embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedText {
    pub title: Option<String>,
    pub description: String,
}

pub fn submission_embed(score: &SubmittedScore) -> EmbedText {
    EmbedText {
        title: Some(format!(
            "{}'s Wordle {} Score",
            score.player_name, score.puzzle
        )),
        description: format!(
            "Score: {}\nCalculated Score: {}\nHard Mode: {}",
            score.score,
            score.calculated_score,
            score.hard_mode.as_flag()
        ),
    }
}

pub fn score_embed(player: &str, score: &PuzzleScore) -> EmbedText {
    EmbedText {
        title: Some(format!("{}'s Wordle {} Score", player, score.puzzle)),
        description: format!(
            "{}\n\nWith a raw score of {}, their calculated score is: {}",
            score.raw_score, score.score, score.calculated_score
        ),
    }
}

pub fn blame_embed(player: &str, puzzle: u32, msg: Option<&str>) -> EmbedText {
    EmbedText {
        title: None,
        description: msg.map(str::to_string).unwrap_or_else(|| {
            format!(
                "Error while processing blame data for {} in Wordle {}",
                player, puzzle
            )
        }),
    }
}

/// Reply for an error status: the server's own message when it sent one.
pub fn server_error(status: u16, msg: Option<&str>) -> String {
    msg.map(str::to_string).unwrap_or_else(|| {
        format!(
            "Error {} from server, please contact a Wordle admin.",
            status
        )
    })
}

pub fn did_not_play(player: &str, puzzle: u32) -> String {
    format!("{} did not play Wordle #{}", player, puzzle)
}

pub fn already_registered(author: &str) -> String {
    format!("@{} is already registered to play Wordle!", author)
}

pub fn registered(uuid: &str, name: &str) -> String {
    format!("Successfully registered @{} as {}", uuid, name)
}

pub fn updated(uuid: &str, name: &str) -> String {
    format!("Successfully updated @{} to {}", uuid, name)
}

pub const UPDATE_USAGE: &str =
    "Please include a name to update the registration to, ex: `!update WordleBot`";

pub fn thread_opened(puzzle: i64) -> String {
    format!(
        "Thread for Wordle {} created! Please keep all spoilers to this thread.",
        puzzle
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_embed() {
        let score: SubmittedScore = serde_json::from_str(
            r#"{"player_name": "alice", "puzzle": 1546, "score": 4, "calculated_score": 4.5, "hard_mode": 1}"#,
        )
        .unwrap();

        let embed = submission_embed(&score);
        assert_eq!(embed.title.as_deref(), Some("alice's Wordle 1546 Score"));
        assert_eq!(
            embed.description,
            "Score: 4\nCalculated Score: 4.5\nHard Mode: Y"
        );
    }

    #[test]
    fn test_score_embed() {
        let score: PuzzleScore = serde_json::from_str(
            r#"{"puzzle": 1546, "raw_score": "Wordle 1,546 X/6", "score": "X", "calculated_score": 8}"#,
        )
        .unwrap();

        let embed = score_embed("bob", &score);
        assert_eq!(embed.title.as_deref(), Some("bob's Wordle 1546 Score"));
        assert_eq!(
            embed.description,
            "Wordle 1,546 X/6\n\nWith a raw score of X, their calculated score is: 8"
        );
    }

    #[test]
    fn test_server_error_prefers_server_message() {
        assert_eq!(
            server_error(409, Some("You already submitted today")),
            "You already submitted today"
        );
        assert_eq!(
            server_error(500, None),
            "Error 500 from server, please contact a Wordle admin."
        );
    }

    #[test]
    fn test_blame_fallback() {
        assert_eq!(blame_embed("bob", 12, Some("CRANE")).description, "CRANE");
        assert_eq!(
            blame_embed("bob", 12, None).description,
            "Error while processing blame data for bob in Wordle 12"
        );
    }
}
