use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Scoring service request failed: {0}")]
    ScoringError(#[from] wordle_api::ApiError),

    #[error("Webhook delivery failed: {0}")]
    DeliveryError(#[from] reqwest::Error),

    #[error("Scoring service returned status {status}: {msg}")]
    StatusError { status: u16, msg: String },
}
