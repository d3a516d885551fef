use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    ApiResponse, ScoringService,
    error::{ApiError, Result},
    models::{
        Blame, DailyRanks, PlayerRecord, PuzzleScore, RegisteredPlayer, Registration,
        ScorePuzzleSubmission, SubmittedScore, Summary,
    },
};

#[derive(Debug, Clone)]
pub struct WordleApiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Client for the ranked Wordle scoring service.
///
/// A fresh bearer token is requested for every call; nothing is cached between requests.
pub struct WordleApi {
    base_url: String,
    username: String,
    password: String,
    client: Client,
}

impl WordleApi {
    pub fn new(config: WordleApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn token(&self) -> Result<String> {
        let form = [
            ("grant_type", "password"),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];

        let response = self.client.post(self.url("/token")).form(&form).send().await?;
        let status = response.status();
        let token: TokenResponse = response.json().await?;

        token.access_token.ok_or_else(|| {
            ApiError::AuthError(format!("no access_token in /token response ({})", status))
        })
    }

    async fn fetch(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let token = self.token().await?;
        let response = request.bearer_auth(token).send().await?;
        tracing::debug!("{} {}", response.status(), response.url());

        Ok(response.bytes().await?.to_vec())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        ApiResponse::from_slice(&self.fetch(request).await?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }
}

fn date_query(date: NaiveDate) -> [(&'static str, String); 1] {
    [("date", date.format("%Y-%m-%d").to_string())]
}

#[async_trait::async_trait]
impl ScoringService for WordleApi {
    async fn register(&self, registration: &Registration) -> Result<ApiResponse<RegisteredPlayer>> {
        self.post("/register", registration).await
    }

    async fn update_registration(
        &self,
        registration: &Registration,
    ) -> Result<ApiResponse<RegisteredPlayer>> {
        self.post("/update-registration", registration).await
    }

    async fn submit_score(
        &self,
        submission: &ScorePuzzleSubmission,
    ) -> Result<ApiResponse<SubmittedScore>> {
        // a submission only counts when the service confirms it with status 200
        let request = self.client.post(self.url("/add-score")).json(submission);
        ApiResponse::from_slice_checked(&self.fetch(request).await?)
    }

    async fn get_score(&self, uuid: &str, puzzle: u32) -> Result<ApiResponse<PuzzleScore>> {
        self.get(&format!("/score/{}", uuid), &[("puzzle", puzzle.to_string())])
            .await
    }

    async fn get_blame(&self, uuid: &str, puzzle: u32) -> Result<ApiResponse<Blame>> {
        self.get(&format!("/blame/{}", uuid), &[("puzzle", puzzle.to_string())])
            .await
    }

    async fn get_leaderboard(&self) -> Result<ApiResponse<Vec<PlayerRecord>>> {
        self.get("/leaderboard", &[]).await
    }

    async fn get_daily_ranks(&self, date: NaiveDate) -> Result<ApiResponse<DailyRanks>> {
        self.get("/daily-ranks", &date_query(date)).await
    }

    async fn get_daily_summary(&self, date: NaiveDate) -> Result<ApiResponse<Summary>> {
        self.get("/daily-summary", &date_query(date)).await
    }

    async fn get_weekly_summary(&self, date: NaiveDate) -> Result<ApiResponse<Summary>> {
        self.get("/weekly-summary", &date_query(date)).await
    }

    async fn calculate_daily(&self, date: NaiveDate) -> Result<ApiResponse<Value>> {
        let body = json!({ "date": date.format("%Y-%m-%d").to_string() });
        self.post("/calculate-daily", &body).await
    }
}
