use anyhow::{Context, Result};
use chrono::NaiveTime;
use chrono_tz::Tz;
use reports::config::{api_config_from_env, time_var, time_zone_from_env};
use serenity::all::ChannelId;
use wordle_api::WordleApiConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub general_channel: ChannelId,
    pub api: WordleApiConfig,
    pub time_zone: Tz,
    pub thread_rollover_at: NaiveTime,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            discord_token: std::env::var("DISCORD_TOKEN")
                .context("Cannot load DISCORD_TOKEN env variable")?,
            general_channel: ChannelId::new(
                std::env::var("GENERAL_CHANNEL_ID")
                    .context("Cannot load GENERAL_CHANNEL_ID env variable")?
                    .parse()
                    .context("GENERAL_CHANNEL_ID must be a number")?,
            ),
            api: api_config_from_env()?,
            time_zone: time_zone_from_env()?,
            thread_rollover_at: time_var("THREAD_ROLLOVER_AT", "00:01")?,
        })
    }
}
