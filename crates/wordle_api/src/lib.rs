pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod traits;

pub use client::{WordleApi, WordleApiConfig};
pub use error::{ApiError, Result};
pub use response::ApiResponse;
pub use traits::ScoringService;
