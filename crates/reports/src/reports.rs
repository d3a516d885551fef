use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::info;
use wordle_api::{ApiResponse, ScoringService, WordleApi};

use crate::{
    config::ReportConfig,
    delivery::{Channel, Delivery, WebhookClient},
    error::{ReportError, Result},
    payload::ReportPayload,
    ranking::ValueFormatter,
    render::ReportRenderer,
};

/// Weekday index (Monday = 0) on which the weekly summary replaces the daily one.
pub const WEEK_END_DAY: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    CalculateDaily,
    DailyRanks,
    DailySummary,
    WeeklySummary,
    /// Daily or weekly summary, picked from the report date.
    Summary,
    Leaderboard,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CalculateDaily => "calculate-daily",
            Self::DailyRanks => "daily-ranks",
            Self::DailySummary => "daily-summary",
            Self::WeeklySummary => "weekly-summary",
            Self::Summary => "summary",
            Self::Leaderboard => "leaderboard",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn summary_kind_for(date: NaiveDate) -> ReportKind {
    if date.weekday().num_days_from_monday() == WEEK_END_DAY {
        ReportKind::WeeklySummary
    } else {
        ReportKind::DailySummary
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Posted(Channel),
    Updated(Channel),
    /// The service had no data for the date; nothing was sent.
    Skipped,
    Calculated,
}

impl std::fmt::Display for ReportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posted(channel) => write!(f, "posted to {}", channel),
            Self::Updated(channel) => write!(f, "updated on {}", channel),
            Self::Skipped => write!(f, "skipped (no data)"),
            Self::Calculated => write!(f, "calculation triggered"),
        }
    }
}

/// Everything a report run needs, built once at startup and shared between jobs.
pub struct ReportContext {
    scoring: Arc<dyn ScoringService>,
    delivery: Arc<dyn Delivery>,
    renderer: ReportRenderer,
    leaderboard_message: Option<String>,
}

impl ReportContext {
    pub fn new(
        scoring: Arc<dyn ScoringService>,
        delivery: Arc<dyn Delivery>,
        renderer: ReportRenderer,
        leaderboard_message: Option<String>,
    ) -> Self {
        Self {
            scoring,
            delivery,
            renderer,
            leaderboard_message,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            Arc::new(WordleApi::new(config.api.clone())),
            Arc::new(WebhookClient::new(config.webhooks.clone())),
            ReportRenderer::new(ValueFormatter::new(config.precision)),
            config.leaderboard_message.clone(),
        )
    }

    /// Runs one report for `date` (the local date the report is about).
    pub async fn run(&self, kind: ReportKind, date: NaiveDate) -> Result<ReportOutcome> {
        match kind {
            ReportKind::CalculateDaily => self.calculate_daily(date).await,
            ReportKind::DailyRanks => self.daily_ranks(date).await,
            ReportKind::DailySummary => self.daily_summary(date).await,
            ReportKind::WeeklySummary => self.weekly_summary(date).await,
            ReportKind::Summary => match summary_kind_for(date) {
                ReportKind::WeeklySummary => self.weekly_summary(date).await,
                _ => self.daily_summary(date).await,
            },
            ReportKind::Leaderboard => self.leaderboard(date).await,
        }
    }

    /// Ratings are computed for the day that just ended.
    async fn calculate_daily(&self, today: NaiveDate) -> Result<ReportOutcome> {
        let day = today.pred_opt().unwrap_or(today);
        let response = self.scoring.calculate_daily(day).await?;
        if let ApiResponse::Error { status, msg } = response {
            return Err(ReportError::StatusError {
                status,
                msg: msg.unwrap_or_default(),
            });
        }

        info!("Daily calculation triggered for {}", day);
        Ok(ReportOutcome::Calculated)
    }

    async fn daily_ranks(&self, date: NaiveDate) -> Result<ReportOutcome> {
        let response = self.scoring.get_daily_ranks(date).await?;
        let Some(ranks) = payload_or_skip(ReportKind::DailyRanks, response)? else {
            return Ok(ReportOutcome::Skipped);
        };

        self.post(Channel::General, self.renderer.daily_ranks(date, ranks))
            .await
    }

    async fn daily_summary(&self, date: NaiveDate) -> Result<ReportOutcome> {
        let response = self.scoring.get_daily_summary(date).await?;
        let Some(summary) = payload_or_skip(ReportKind::DailySummary, response)? else {
            return Ok(ReportOutcome::Skipped);
        };

        self.post(Channel::Report, self.renderer.daily_summary(date, summary))
            .await
    }

    async fn weekly_summary(&self, date: NaiveDate) -> Result<ReportOutcome> {
        let response = self.scoring.get_weekly_summary(date).await?;
        let Some(summary) = payload_or_skip(ReportKind::WeeklySummary, response)? else {
            return Ok(ReportOutcome::Skipped);
        };

        self.post(Channel::Report, self.renderer.weekly_summary(date, summary))
            .await
    }

    /// Rewrites the pinned leaderboard message when one is configured, so repeated runs
    /// never stack up messages.
    async fn leaderboard(&self, date: NaiveDate) -> Result<ReportOutcome> {
        let response = self.scoring.get_leaderboard().await?;
        let Some(records) = payload_or_skip(ReportKind::Leaderboard, response)? else {
            return Ok(ReportOutcome::Skipped);
        };
        let payload = self.renderer.leaderboard(date, records);

        match &self.leaderboard_message {
            Some(message_id) => {
                self.delivery
                    .update(Channel::Leaderboard, message_id, &payload)
                    .await?;
                Ok(ReportOutcome::Updated(Channel::Leaderboard))
            }
            None => self.post(Channel::Leaderboard, payload).await,
        }
    }

    async fn post(&self, channel: Channel, payload: ReportPayload) -> Result<ReportOutcome> {
        self.delivery.post(channel, &payload).await?;
        Ok(ReportOutcome::Posted(channel))
    }
}

fn payload_or_skip<T>(kind: ReportKind, response: ApiResponse<T>) -> Result<Option<T>> {
    match response {
        ApiResponse::Ok(payload) => Ok(Some(payload)),
        ApiResponse::Error { status, .. } if status == wordle_api::response::STATUS_NOT_FOUND => {
            info!("No data for {} report, skipping", kind);
            Ok(None)
        }
        ApiResponse::Error { status, msg } => Err(ReportError::StatusError {
            status,
            msg: msg.unwrap_or_default(),
        }),
    }
}
