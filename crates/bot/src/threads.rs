use chrono::NaiveDate;
use serenity::all::{
    AutoArchiveDuration, ChannelId, ChannelType, CreateThread, EditThread, GuildChannel, GuildId,
    Http,
};
use tracing::info;

use crate::{
    error::{BotError, Result},
    puzzle::{puzzle_number, thread_name},
    responses::thread_opened,
};

const LOCK_REASON: &str =
    "This Wordle is now over, you are free to talk about spoilers in the general chat.";

async fn find_thread(http: &Http, guild_id: GuildId, name: &str) -> Result<Option<GuildChannel>> {
    let active = guild_id.get_active_threads(http).await?;
    Ok(active.threads.into_iter().find(|thread| thread.name == name))
}

/// Locks yesterday's spoiler thread and opens today's.
pub async fn open_daily_thread(
    http: &Http,
    channel: ChannelId,
    today: NaiveDate,
) -> Result<GuildChannel> {
    let guild_id = channel
        .to_channel(http)
        .await?
        .guild()
        .map(|guild_channel| guild_channel.guild_id)
        .ok_or(BotError::NotAGuildChannel(channel))?;

    if let Some(yesterday) = today.pred_opt()
        && let Some(previous) = find_thread(http, guild_id, &thread_name(yesterday)).await?
    {
        previous
            .id
            .edit_thread(http, EditThread::new().locked(true).audit_log_reason(LOCK_REASON))
            .await?;
        info!("Locked spoiler thread '{}'", previous.name);
    }

    let thread = channel
        .create_thread(
            http,
            CreateThread::new(thread_name(today))
                .kind(ChannelType::PrivateThread)
                .invitable(false)
                .auto_archive_duration(AutoArchiveDuration::OneDay)
                .audit_log_reason("Starting spoiler thread"),
        )
        .await?;
    thread.id.say(http, thread_opened(puzzle_number(today))).await?;
    info!("Opened spoiler thread '{}'", thread.name);

    Ok(thread)
}

/// Returns today's spoiler thread, opening it when it does not exist yet.
pub async fn ensure_daily_thread(
    http: &Http,
    channel: ChannelId,
    guild_id: GuildId,
    today: NaiveDate,
) -> Result<GuildChannel> {
    match find_thread(http, guild_id, &thread_name(today)).await? {
        Some(thread) => Ok(thread),
        None => open_daily_thread(http, channel, today).await,
    }
}
