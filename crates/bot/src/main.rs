mod config;
mod dispatch;
mod error;
mod handler;
mod puzzle;
mod responses;
mod threads;

use std::sync::Arc;

use anyhow::Context;
use reports::{DailySchedule, ReportConfig, ReportContext, run_daily, spawn_reports};
use serenity::all::{Client, GatewayIntents};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordle_api::WordleApi;

use crate::{
    config::Config,
    handler::{BotContext, Handler},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wordle_bot=info,reports=info,wordle_api=info,serenity=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load bot configuration")?;
    let scoring = Arc::new(WordleApi::new(config.api.clone()));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let context = Arc::new(BotContext::new(config.clone(), scoring));
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(context))
        .await
        .context("Failed to create Discord client")?;

    let http = client.http.clone();
    let general_channel = config.general_channel;
    tokio::spawn(run_daily(
        "spoiler-thread".to_string(),
        DailySchedule::new(config.thread_rollover_at, config.time_zone),
        move |today| {
            let http = http.clone();
            async move {
                if let Err(e) = threads::open_daily_thread(&http, general_channel, today).await {
                    error!("Failed to open spoiler thread for {}: {}", today, e);
                }
            }
        },
    ));

    match ReportConfig::from_env() {
        Ok(report_config) => {
            let reports = Arc::new(ReportContext::from_config(&report_config));
            spawn_reports(reports, report_config.scheduled_reports());
        }
        Err(e) => warn!("Scheduled reports disabled: {:#}", e),
    }

    info!("Starting Discord client");
    client.start().await.context("Discord client stopped")?;

    Ok(())
}
