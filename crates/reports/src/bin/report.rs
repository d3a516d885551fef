use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use reports::{ReportConfig, ReportContext, ReportKind, spawn_reports};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "wordle-report")]
#[command(about = "Competitive Ranked Wordle report runner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the scoring service to compute ratings for the previous day
    CalculateDaily(DateArg),
    DailyRanks(DateArg),
    DailySummary(DateArg),
    WeeklySummary(DateArg),
    /// Weekly summary on the week-end day, daily summary otherwise
    Summary(DateArg),
    Leaderboard(DateArg),
    /// Run every report on its daily timetable until interrupted
    Schedule,
}

#[derive(clap::Args)]
struct DateArg {
    /// Report date (YYYY-MM-DD), defaults to today in TIME_ZONE
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl Commands {
    fn report(&self) -> Option<(ReportKind, Option<NaiveDate>)> {
        let (kind, arg) = match self {
            Self::CalculateDaily(arg) => (ReportKind::CalculateDaily, arg),
            Self::DailyRanks(arg) => (ReportKind::DailyRanks, arg),
            Self::DailySummary(arg) => (ReportKind::DailySummary, arg),
            Self::WeeklySummary(arg) => (ReportKind::WeeklySummary, arg),
            Self::Summary(arg) => (ReportKind::Summary, arg),
            Self::Leaderboard(arg) => (ReportKind::Leaderboard, arg),
            Self::Schedule => return None,
        };
        Some((kind, arg.date))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "wordle_report={},reports={},wordle_api={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ReportConfig::from_env().context("Failed to load report configuration")?;
    let context = Arc::new(ReportContext::from_config(&config));

    match cli.command.report() {
        Some((kind, date)) => {
            let date = date.unwrap_or_else(|| config.today());
            tracing::info!("Running {} report for {}", kind, date);

            let outcome = context
                .run(kind, date)
                .await
                .with_context(|| format!("{} report failed", kind))?;
            tracing::info!("✓ {}", outcome);
        }
        None => {
            tracing::info!("Starting report scheduler ({})", config.time_zone);
            let handles = spawn_reports(context, config.scheduled_reports());

            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutting down report scheduler");
            for handle in handles {
                handle.abort();
            }
        }
    }

    Ok(())
}
