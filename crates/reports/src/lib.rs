pub mod config;
pub mod delivery;
pub mod error;
pub mod payload;
pub mod ranking;
pub mod render;
pub mod reports;
pub mod schedule;

pub use config::ReportConfig;
pub use delivery::{Channel, Delivery, WebhookClient, WebhookUrls};
pub use error::{ReportError, Result};
pub use payload::{Embed, EmbedField, ReportPayload};
pub use ranking::{RankedEntry, ValueFormatter, competition_rank};
pub use render::ReportRenderer;
pub use reports::{ReportContext, ReportKind, ReportOutcome, summary_kind_for};
pub use schedule::{DailySchedule, ScheduledReport, run_daily, spawn_reports};
