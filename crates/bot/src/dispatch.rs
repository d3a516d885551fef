use lazy_static::lazy_static;
use regex::Regex;

/// Only the head of a message is inspected for the share header.
const SUBMISSION_WINDOW: usize = 16;

pub const COMMAND_PREFIX: char = '!';

lazy_static! {
    static ref SUBMISSION_PATTERN: Regex = Regex::new(r"^Wordle ([\d,]+) ([\dX])/6(\*?)").unwrap();
}

/// Header of a Wordle share message, e.g. `Wordle 1,546 4/6*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHeader {
    pub puzzle: Option<u32>,
    /// `None` for a failed (`X/6`) game.
    pub guesses: Option<u8>,
}

pub fn match_submission(text: &str) -> Option<SubmissionHeader> {
    let head: String = text.chars().take(SUBMISSION_WINDOW).collect();
    let captures = SUBMISSION_PATTERN.captures(&head)?;

    Some(SubmissionHeader {
        puzzle: captures[1].replace(',', "").parse().ok(),
        guesses: captures[2].parse().ok(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Score { puzzle: u32, player: Option<String> },
    Blame { puzzle: u32, player: Option<String> },
    Register { name: Option<String> },
    Update { name: Option<String> },
}

pub const SCORE_USAGE: &str = "Usage: `!score <puzzle> [player]`";
pub const BLAME_USAGE: &str = "Usage: `!blame <puzzle> [player]`";

/// Parses a `!command`. Returns `None` for anything that is not a known command and
/// `Some(Err(usage))` when a known command has malformed arguments.
pub fn parse_command(text: &str) -> Option<Result<Command, &'static str>> {
    let body = text.trim().strip_prefix(COMMAND_PREFIX)?;
    let mut words = body.split_whitespace();
    let name = words.next()?;

    let command = match name {
        "score" | "blame" => {
            let usage = if name == "score" { SCORE_USAGE } else { BLAME_USAGE };
            let Some(puzzle) = words.next().and_then(|p| p.replace(',', "").parse::<u32>().ok()) else {
                return Some(Err(usage));
            };
            let player = words.next().map(str::to_string);
            if name == "score" {
                Command::Score { puzzle, player }
            } else {
                Command::Blame { puzzle, player }
            }
        }
        "register" => Command::Register {
            name: words.next().map(str::to_string),
        },
        "update" => Command::Update {
            name: words.next().map(str::to_string),
        },
        _ => return None,
    };

    Some(Ok(command))
}

/// What to do with an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Command(Command),
    Usage(&'static str),
    Submission(SubmissionHeader),
    Ignore,
}

/// Commands are answered in any channel; score shares are only taken from the general channel.
pub fn route(text: &str, in_general_channel: bool) -> Route {
    match parse_command(text) {
        Some(Ok(command)) => Route::Command(command),
        Some(Err(usage)) => Route::Usage(usage),
        None if in_general_channel => match_submission(text)
            .map(Route::Submission)
            .unwrap_or(Route::Ignore),
        None => Route::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_matches() {
        let header = match_submission("Wordle 1,546 4/6*\n\n⬛🟨⬛⬛⬛").unwrap();
        assert_eq!(header.puzzle, Some(1546));
        assert_eq!(header.guesses, Some(4));

        let failed = match_submission("Wordle 1546 X/6").unwrap();
        assert_eq!(failed.guesses, None);
    }

    #[test]
    fn test_submission_rejects() {
        assert!(match_submission("wordle 1546 4/6").is_none());
        assert!(match_submission("Wordle X/6").is_none());
        assert!(match_submission("I got Wordle 1546 4/6").is_none());
        assert!(match_submission("Wordle 1546 7/7").is_none());
        assert!(match_submission("").is_none());
    }

    #[test]
    fn test_submission_window_is_sixteen_chars() {
        // the header has to fit in the first 16 characters
        assert!(match_submission("Wordle 1,234,567 4/6").is_none());
        assert!(match_submission("Wordle 12,345 4/6").is_none());
        assert!(match_submission("Wordle 1,234 4/6").is_some());
    }

    #[test]
    fn test_parse_score_and_blame() {
        assert_eq!(
            parse_command("!score 1546"),
            Some(Ok(Command::Score { puzzle: 1546, player: None }))
        );
        assert_eq!(
            parse_command("!blame 1,546 alice"),
            Some(Ok(Command::Blame {
                puzzle: 1546,
                player: Some("alice".to_string())
            }))
        );
        assert_eq!(parse_command("!score"), Some(Err(SCORE_USAGE)));
        assert_eq!(parse_command("!blame abc"), Some(Err(BLAME_USAGE)));
    }

    #[test]
    fn test_parse_registration() {
        assert_eq!(
            parse_command("!register"),
            Some(Ok(Command::Register { name: None }))
        );
        assert_eq!(
            parse_command("!update  Wordle  Bot "),
            Some(Ok(Command::Update {
                name: Some("Wordle".to_string())
            }))
        );
        assert_eq!(
            parse_command("!register Wordle Bot"),
            Some(Ok(Command::Register {
                name: Some("Wordle".to_string())
            }))
        );
        assert_eq!(parse_command("!update"), Some(Ok(Command::Update { name: None })));
    }

    #[test]
    fn test_parse_ignores_other_text() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("!dance"), None);
        assert_eq!(parse_command("!"), None);
        assert_eq!(parse_command("Wordle 1546 4/6"), None);
    }

    #[test]
    fn test_route_submission_only_in_general_channel() {
        let share = "Wordle 1,546 4/6\n\n🟩🟩🟩🟩🟩";

        assert_eq!(
            route(share, true),
            Route::Submission(SubmissionHeader {
                puzzle: Some(1546),
                guesses: Some(4)
            })
        );
        assert_eq!(route(share, false), Route::Ignore);
        assert_eq!(route("good morning", true), Route::Ignore);
    }

    #[test]
    fn test_route_commands_anywhere() {
        let score = Route::Command(Command::Score {
            puzzle: 1546,
            player: None,
        });

        assert_eq!(route("!score 1546", true), score);
        assert_eq!(route("!score 1546", false), score);
        assert_eq!(route("!blame", false), Route::Usage(BLAME_USAGE));
        assert_eq!(route("!dance", true), Route::Ignore);
    }
}
