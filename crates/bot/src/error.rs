use serenity::all::ChannelId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Discord error: {0}")]
    DiscordError(#[from] serenity::Error),

    #[error("Scoring service error: {0}")]
    ApiError(#[from] wordle_api::ApiError),

    #[error("Channel {0} is not a guild channel")]
    NotAGuildChannel(ChannelId),
}
