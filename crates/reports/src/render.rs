use chrono::NaiveDate;
use wordle_api::models::{DailyRanks, PlayerRecord, Summary};

use crate::{
    payload::{Embed, ReportPayload},
    ranking::{ValueFormatter, competition_rank},
};

// Discord rejects empty field values.
const BLANK_FIELD: &str = "\u{200b}";

/// Turns scoring-service payloads into ranked webhook payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    values: ValueFormatter,
}

impl ReportRenderer {
    pub fn new(values: ValueFormatter) -> Self {
        Self { values }
    }

    fn delta(&self, value: Option<f64>) -> String {
        format!("Δ {}", self.values.format(value))
    }

    pub fn daily_ranks(&self, date: NaiveDate, ranks: DailyRanks) -> ReportPayload {
        let mut payload = ReportPayload::new(format!("**{}: Wordle Rankings**", date));

        for entry in competition_rank(ranks.raw_data, |player| player.rank) {
            let player = entry.record;
            payload.push(
                Embed::new(format!("{}. {}", entry.display_rank, player.player_name))
                    .description(format!("Hard Mode: {}", player.hard_mode.as_flag())),
            );
        }

        payload
    }

    pub fn daily_summary(&self, date: NaiveDate, summary: Summary) -> ReportPayload {
        let mut payload = ReportPayload::new(format!("**{}: Wordle Rankings**", date));

        let ranked = competition_rank(summary.sorted_player_stats, |(_, stats)| {
            self.values.format(stats.end_ord)
        });
        for entry in ranked {
            let (player, stats) = entry.record;
            payload.push(
                Embed::new(format!("{}. {}", entry.display_rank, player))
                    .field(
                        format!("Ordinal: {}", self.values.format(stats.end_ord)),
                        self.delta(stats.ord_change),
                    )
                    .field(
                        format!("ELO: {}", self.values.format(stats.end_elo)),
                        self.delta(stats.elo_change),
                    ),
            );
        }

        payload
    }

    pub fn weekly_summary(&self, date: NaiveDate, summary: Summary) -> ReportPayload {
        let mut payload = ReportPayload::new(format!("**{}: Weekly Wordle Rankings**", date));

        let ranked = competition_rank(summary.sorted_player_stats, |(_, stats)| {
            self.values.format(stats.end_ord)
        });
        for entry in ranked {
            let (player, stats) = entry.record;
            payload.push(
                Embed::new(format!("{}. {}", entry.display_rank, player))
                    .field(
                        format!(
                            "Ordinal: {} -> {}",
                            self.values.format(stats.start_ord),
                            self.values.format(stats.end_ord)
                        ),
                        self.delta(stats.ord_change),
                    )
                    .field(
                        format!(
                            "ELO: {} -> {}",
                            self.values.format(stats.start_elo),
                            self.values.format(stats.end_elo)
                        ),
                        self.delta(stats.elo_change),
                    )
                    .field(
                        format!("Average Score: {}", self.values.format(stats.average_score)),
                        BLANK_FIELD,
                    ),
            );
        }

        payload
    }

    pub fn leaderboard(&self, date: NaiveDate, records: Vec<PlayerRecord>) -> ReportPayload {
        let mut payload = ReportPayload::new(format!("Wordle Leaderboard ({})", date));

        for entry in competition_rank(records, |record| self.values.format(record.ordinal)) {
            let record = entry.record;
            payload.push(
                Embed::new(format!("{}. {}", entry.display_rank, record.name))
                    .field(
                        format!("Ordinal: {}", self.values.format(record.ordinal)),
                        self.delta(record.ordinal_delta),
                    )
                    .field(
                        format!("ELO: {}", self.values.format(record.elo)),
                        self.delta(record.elo_delta),
                    )
                    .field(
                        format!("Mu: {}", self.values.format(record.mu)),
                        self.delta(record.mu_delta),
                    )
                    .field(
                        format!("Sigma: {}", self.values.format(record.sigma)),
                        self.delta(record.sigma_delta),
                    ),
            );
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordle_api::models::{DailyRank, HardMode, SummaryStats};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    fn titles(payload: &ReportPayload) -> Vec<&str> {
        payload.embeds.iter().map(|embed| embed.title.as_str()).collect()
    }

    fn record(name: &str, ordinal: Option<f64>) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            ordinal,
            elo: Some(1500.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_leaderboard_ties_on_rounded_ordinal() {
        let records = vec![
            record("alice", Some(10.0001)),
            record("bob", Some(10.0)),
            record("carol", Some(8.0)),
            record("dave", Some(7.0)),
            record("erin", Some(7.0)),
            record("frank", Some(7.0)),
        ];

        let payload = ReportRenderer::default().leaderboard(date(), records);

        assert_eq!(payload.title, "Wordle Leaderboard (2025-03-09)");
        assert_eq!(
            titles(&payload),
            vec!["1. alice", "1. bob", "3. carol", "4. dave", "4. erin", "4. frank"]
        );
    }

    #[test]
    fn test_leaderboard_fields() {
        let mut alice = record("alice", Some(21.123456));
        alice.ordinal_delta = Some(-0.4444);
        alice.sigma = Some(3.14159);

        let payload = ReportRenderer::default().leaderboard(date(), vec![alice]);
        let fields = &payload.embeds[0].fields;

        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].name, "Ordinal: 21.123");
        assert_eq!(fields[0].value, "Δ -0.444");
        assert_eq!(fields[1].name, "ELO: 1500");
        assert_eq!(fields[2].name, "Mu: 0");
        assert_eq!(fields[2].value, "Δ 0");
        assert_eq!(fields[3].name, "Sigma: 3.142");
    }

    #[test]
    fn test_daily_ranks_reuse_server_rank_for_ties() {
        let ranks = DailyRanks {
            raw_data: vec![
                DailyRank {
                    rank: 1,
                    player_name: "alice".to_string(),
                    hard_mode: HardMode::Bool(true),
                },
                DailyRank {
                    rank: 1,
                    player_name: "bob".to_string(),
                    hard_mode: HardMode::Int(0),
                },
                DailyRank {
                    rank: 3,
                    player_name: "carol".to_string(),
                    hard_mode: HardMode::Int(1),
                },
            ],
        };

        let payload = ReportRenderer::default().daily_ranks(date(), ranks);

        assert_eq!(payload.title, "**2025-03-09: Wordle Rankings**");
        assert_eq!(titles(&payload), vec!["1. alice", "1. bob", "3. carol"]);
        assert_eq!(payload.embeds[0].description.as_deref(), Some("Hard Mode: Y"));
        assert_eq!(payload.embeds[1].description.as_deref(), Some("Hard Mode: N"));
        assert!(payload.embeds[0].fields.is_empty());
    }

    fn summary() -> Summary {
        Summary {
            sorted_player_stats: vec![
                (
                    "alice".to_string(),
                    SummaryStats {
                        start_ord: Some(18.0),
                        end_ord: Some(20.5),
                        ord_change: Some(2.5),
                        start_elo: Some(1490.0),
                        end_elo: Some(1510.25),
                        elo_change: Some(20.25),
                        average_score: Some(3.6666667),
                    },
                ),
                (
                    "bob".to_string(),
                    SummaryStats {
                        end_ord: Some(20.5),
                        ..Default::default()
                    },
                ),
                (
                    "carol".to_string(),
                    SummaryStats {
                        end_ord: Some(15.0),
                        ..Default::default()
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_daily_summary() {
        let payload = ReportRenderer::default().daily_summary(date(), summary());

        assert_eq!(payload.title, "**2025-03-09: Wordle Rankings**");
        assert_eq!(titles(&payload), vec!["1. alice", "1. bob", "3. carol"]);

        let fields = &payload.embeds[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Ordinal: 20.5");
        assert_eq!(fields[0].value, "Δ 2.5");
        assert_eq!(fields[1].name, "ELO: 1510.25");
        assert_eq!(payload.embeds[1].fields[1].value, "Δ 0");
    }

    #[test]
    fn test_weekly_summary() {
        let payload = ReportRenderer::default().weekly_summary(date(), summary());

        assert_eq!(payload.title, "**2025-03-09: Weekly Wordle Rankings**");
        assert_eq!(titles(&payload), vec!["1. alice", "1. bob", "3. carol"]);

        let fields = &payload.embeds[0].fields;
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "Ordinal: 18 -> 20.5");
        assert_eq!(fields[1].name, "ELO: 1490 -> 1510.25");
        assert_eq!(fields[1].value, "Δ 20.25");
        assert_eq!(fields[2].name, "Average Score: 3.667");
        assert_eq!(fields[2].value, BLANK_FIELD);
    }

    #[test]
    fn test_precision_is_configurable() {
        let renderer = ReportRenderer::new(ValueFormatter::new(1));
        let payload = renderer.leaderboard(date(), vec![record("alice", Some(3.14159))]);

        assert_eq!(payload.embeds[0].fields[0].name, "Ordinal: 3.1");
    }
}
