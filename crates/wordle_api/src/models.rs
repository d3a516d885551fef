use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Body of `/register` and `/update-registration`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub player_name: String,
    pub player_platform: String,
    pub player_uuid: String,
}

impl Registration {
    pub fn discord(player_name: impl Into<String>, player_uuid: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            player_platform: "discord".to_string(),
            player_uuid: player_uuid.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredPlayer {
    pub player_name: String,
    pub player_uuid: String,
    #[serde(default)]
    pub player_platform: Option<String>,
}

/// A raw Wordle share message and the platform identity that posted it.
#[derive(Debug, Clone, Serialize)]
pub struct ScorePuzzleSubmission {
    #[serde(rename = "score")]
    pub raw_text: String,
    #[serde(rename = "uuid")]
    pub player_identity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedScore {
    pub player_name: String,
    pub puzzle: Scalar,
    pub score: Scalar,
    pub calculated_score: Scalar,
    pub hard_mode: HardMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleScore {
    pub puzzle: Scalar,
    pub raw_score: String,
    pub score: Scalar,
    pub calculated_score: Scalar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Blame {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Rating snapshot of one player as served by `/leaderboard`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "player_name")]
    pub name: String,
    #[serde(rename = "player_ord", default)]
    pub ordinal: Option<f64>,
    #[serde(rename = "ord_delta", default)]
    pub ordinal_delta: Option<f64>,
    #[serde(rename = "player_elo", default)]
    pub elo: Option<f64>,
    #[serde(default)]
    pub elo_delta: Option<f64>,
    #[serde(rename = "player_mu", default)]
    pub mu: Option<f64>,
    #[serde(default)]
    pub mu_delta: Option<f64>,
    #[serde(rename = "player_sigma", default)]
    pub sigma: Option<f64>,
    #[serde(default)]
    pub sigma_delta: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyRanks {
    pub raw_data: Vec<DailyRank>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyRank {
    pub rank: u32,
    pub player_name: String,
    pub hard_mode: HardMode,
}

/// Daily or weekly rating movement, one entry per player in ranking order.
#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    #[serde(deserialize_with = "ordered_entries")]
    pub sorted_player_stats: Vec<(String, SummaryStats)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    pub start_ord: Option<f64>,
    pub end_ord: Option<f64>,
    pub ord_change: Option<f64>,
    pub start_elo: Option<f64>,
    pub end_elo: Option<f64>,
    pub elo_change: Option<f64>,
    pub average_score: Option<f64>,
}

/// The server reports hard mode either as a boolean or as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HardMode {
    Bool(bool),
    Int(i64),
}

impl HardMode {
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Int(value) => *value == 1,
        }
    }

    pub fn as_flag(&self) -> &'static str {
        if self.is_enabled() { "Y" } else { "N" }
    }
}

/// A display-only value that may arrive as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
        }
    }
}

// Keeps the object's key order, which carries the server's ranking.
fn ordered_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of player statistics")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_server_order() {
        let body = r#"{
            "sorted_player_stats": {
                "zed": {"end_ord": 12.5, "ord_change": 1.0},
                "amy": {"end_ord": 11.0, "ord_change": null},
                "mid": {"end_ord": 3.0}
            }
        }"#;

        let summary: Summary = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = summary
            .sorted_player_stats
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();

        assert_eq!(names, vec!["zed", "amy", "mid"]);
        assert_eq!(summary.sorted_player_stats[1].1.ord_change, None);
        assert_eq!(summary.sorted_player_stats[2].1.start_elo, None);
    }

    #[test]
    fn test_player_record_wire_names() {
        let body = r#"{
            "player_name": "alice",
            "player_ord": 21.123456,
            "ord_delta": -0.5,
            "player_elo": 1512.0,
            "elo_delta": 12.0,
            "player_mu": 25.0,
            "mu_delta": null,
            "player_sigma": 8.3
        }"#;

        let record: PlayerRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.name, "alice");
        assert_eq!(record.ordinal, Some(21.123456));
        assert_eq!(record.mu_delta, None);
        assert_eq!(record.sigma_delta, None);
    }

    #[test]
    fn test_hard_mode_accepts_bool_and_int() {
        let ranks: DailyRanks = serde_json::from_str(
            r#"{"raw_data": [
                {"rank": 1, "player_name": "a", "hard_mode": true},
                {"rank": 2, "player_name": "b", "hard_mode": 0}
            ]}"#,
        )
        .unwrap();

        assert_eq!(ranks.raw_data[0].hard_mode.as_flag(), "Y");
        assert_eq!(ranks.raw_data[1].hard_mode.as_flag(), "N");
    }

    #[test]
    fn test_submission_wire_names() {
        let submission = ScorePuzzleSubmission {
            raw_text: "Wordle 1,546 4/6*".to_string(),
            player_identity: "alice".to_string(),
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["score"], "Wordle 1,546 4/6*");
        assert_eq!(json["uuid"], "alice");
    }

    #[test]
    fn test_scalar_display() {
        let score: SubmittedScore = serde_json::from_str(
            r#"{"player_name": "a", "puzzle": 1546, "score": "X", "calculated_score": 7.5, "hard_mode": 1}"#,
        )
        .unwrap();

        assert_eq!(score.puzzle.to_string(), "1546");
        assert_eq!(score.score.to_string(), "X");
        assert_eq!(score.calculated_score.to_string(), "7.5");
    }
}
