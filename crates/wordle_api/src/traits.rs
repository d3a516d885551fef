use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    ApiResponse, Result,
    models::{
        Blame, DailyRanks, PlayerRecord, PuzzleScore, RegisteredPlayer, Registration,
        ScorePuzzleSubmission, SubmittedScore, Summary,
    },
};

/// Operations offered by the remote scoring service.
#[async_trait::async_trait]
pub trait ScoringService: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<ApiResponse<RegisteredPlayer>>;

    async fn update_registration(
        &self,
        registration: &Registration,
    ) -> Result<ApiResponse<RegisteredPlayer>>;

    async fn submit_score(
        &self,
        submission: &ScorePuzzleSubmission,
    ) -> Result<ApiResponse<SubmittedScore>>;

    async fn get_score(&self, uuid: &str, puzzle: u32) -> Result<ApiResponse<PuzzleScore>>;

    async fn get_blame(&self, uuid: &str, puzzle: u32) -> Result<ApiResponse<Blame>>;

    async fn get_leaderboard(&self) -> Result<ApiResponse<Vec<PlayerRecord>>>;

    async fn get_daily_ranks(&self, date: NaiveDate) -> Result<ApiResponse<DailyRanks>>;

    async fn get_daily_summary(&self, date: NaiveDate) -> Result<ApiResponse<Summary>>;

    async fn get_weekly_summary(&self, date: NaiveDate) -> Result<ApiResponse<Summary>>;

    /// Asks the service to compute ratings for `date`.
    async fn calculate_daily(&self, date: NaiveDate) -> Result<ApiResponse<Value>>;
}
