use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use wordle_api::WordleApiConfig;

use crate::{
    delivery::WebhookUrls,
    ranking::DEFAULT_PRECISION,
    reports::ReportKind,
    schedule::{DailySchedule, ScheduledReport},
};

pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

#[derive(Debug, Clone, Copy)]
pub struct ReportTimes {
    pub calculate_daily: NaiveTime,
    pub daily_ranks: NaiveTime,
    pub summary: NaiveTime,
    pub leaderboard: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub api: WordleApiConfig,
    pub webhooks: WebhookUrls,
    pub leaderboard_message: Option<String>,
    pub time_zone: Tz,
    pub precision: u32,
    pub times: ReportTimes,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api: api_config_from_env()?,
            webhooks: WebhookUrls {
                general: required_var("GENERAL_WEBHOOK")?,
                report: required_var("REPORT_WEBHOOK")?,
                leaderboard: required_var("LEADERBOARD_WEBHOOK")?,
            },
            leaderboard_message: std::env::var("LEADERBOARD_MESSAGE_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
            time_zone: time_zone_from_env()?,
            precision: match std::env::var("REPORT_PRECISION") {
                Ok(value) => value
                    .parse()
                    .context("REPORT_PRECISION must be a non-negative number")?,
                Err(_) => DEFAULT_PRECISION,
            },
            times: ReportTimes {
                calculate_daily: time_var("CALCULATE_DAILY_AT", "00:05")?,
                daily_ranks: time_var("DAILY_RANKS_AT", "23:50")?,
                summary: time_var("SUMMARY_AT", "00:10")?,
                leaderboard: time_var("LEADERBOARD_AT", "00:15")?,
            },
        })
    }

    /// The current date in the configured time zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.time_zone).date_naive()
    }

    pub fn scheduled_reports(&self) -> Vec<ScheduledReport> {
        let at = |time| DailySchedule::new(time, self.time_zone);
        vec![
            ScheduledReport::new(ReportKind::CalculateDaily, at(self.times.calculate_daily)),
            ScheduledReport::new(ReportKind::DailyRanks, at(self.times.daily_ranks)),
            // ratings for a day are only final once calculate-daily has run after midnight
            ScheduledReport::for_previous_day(ReportKind::Summary, at(self.times.summary)),
            ScheduledReport::new(ReportKind::Leaderboard, at(self.times.leaderboard)),
        ]
    }
}

pub fn api_config_from_env() -> Result<WordleApiConfig> {
    Ok(WordleApiConfig {
        base_url: required_var("WORDLE_BASE_URL")?,
        username: required_var("WORDLE_USERNAME")?,
        password: required_var("WORDLE_PASSWORD")?,
    })
}

pub fn time_zone_from_env() -> Result<Tz> {
    let name = std::env::var("TIME_ZONE").unwrap_or_else(|_| DEFAULT_TIME_ZONE.to_string());
    parse_time_zone(&name)
}

pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow!("Invalid TIME_ZONE '{}': {}", name, e))
}

/// Reads an `HH:MM` wall-clock time, falling back to `default` when unset.
pub fn time_var(name: &str, default: &str) -> Result<NaiveTime> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    parse_time(&value).with_context(|| format!("{} must be a HH:MM time, got '{}'", name, value))
}

pub fn parse_time(value: &str) -> Result<NaiveTime> {
    Ok(NaiveTime::parse_from_str(value.trim(), "%H:%M")?)
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("Cannot load {} env variable", name))
}
