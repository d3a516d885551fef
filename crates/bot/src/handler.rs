use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serenity::all::{Context, CreateEmbed, CreateMessage, EventHandler, Message, Ready};
use serenity::async_trait;
use tracing::{error, info, warn};
use wordle_api::{
    ApiResponse, ScoringService,
    models::{Registration, ScorePuzzleSubmission, SubmittedScore},
    response::{STATUS_CONFLICT, STATUS_NOT_FOUND, STATUS_SERVER_ERROR},
};

use crate::{
    config::Config,
    dispatch::{Command, Route, SubmissionHeader, route},
    error::{BotError, Result},
    responses::{self, EmbedText},
    threads,
};

/// Shared, read-only state of the bot, built once at startup.
pub struct BotContext {
    pub config: Config,
    pub scoring: Arc<dyn ScoringService>,
}

impl BotContext {
    pub fn new(config: Config, scoring: Arc<dyn ScoringService>) -> Self {
        Self { config, scoring }
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.config.time_zone).date_naive()
    }
}

pub struct Handler {
    context: Arc<BotContext>,
}

impl Handler {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    async fn dispatch(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let in_general_channel = msg.channel_id == self.context.config.general_channel;

        match route(&msg.content, in_general_channel) {
            Route::Command(command) => self.run_command(ctx, msg, command).await,
            Route::Usage(usage) => {
                msg.channel_id.say(&ctx.http, usage).await?;
                Ok(())
            }
            Route::Submission(header) => self.submit(ctx, msg, header).await,
            Route::Ignore => Ok(()),
        }
    }

    async fn submit(&self, ctx: &Context, msg: &Message, header: SubmissionHeader) -> Result<()> {
        info!(
            "Submitting Wordle {:?} result ({:?} guesses) from {}",
            header.puzzle, header.guesses, msg.author.name
        );
        let submission = ScorePuzzleSubmission {
            raw_text: msg.content.clone(),
            player_identity: msg.author.name.clone(),
        };

        let score = match submission_outcome(self.context.scoring.submit_score(&submission).await) {
            Ok(score) => score,
            Err(reply) => {
                msg.channel_id.say(&ctx.http, reply).await?;
                return Ok(());
            }
        };

        let guild_id = msg
            .guild_id
            .ok_or(BotError::NotAGuildChannel(msg.channel_id))?;
        let thread = threads::ensure_daily_thread(
            &ctx.http,
            self.context.config.general_channel,
            guild_id,
            self.context.today(),
        )
        .await?;

        thread.id.add_thread_member(&ctx.http, msg.author.id).await?;
        thread
            .id
            .send_message(
                &ctx.http,
                CreateMessage::new().embed(to_embed(responses::submission_embed(&score))),
            )
            .await?;

        Ok(())
    }

    async fn run_command(&self, ctx: &Context, msg: &Message, command: Command) -> Result<()> {
        let author = msg.author.name.as_str();
        let scoring = &self.context.scoring;

        let reply = match command {
            Command::Score { puzzle, player } => {
                let player = player.unwrap_or_else(|| author.to_string());
                match scoring.get_score(&player, puzzle).await? {
                    ApiResponse::Ok(score) => {
                        Reply::Embed(responses::score_embed(&player, &score))
                    }
                    ApiResponse::Error { status, .. } if status == STATUS_NOT_FOUND => {
                        Reply::Text(responses::did_not_play(&player, puzzle))
                    }
                    ApiResponse::Error { status, msg } => {
                        Reply::Text(responses::server_error(status, msg.as_deref()))
                    }
                }
            }
            Command::Blame { puzzle, player } => {
                let player = player.unwrap_or_else(|| author.to_string());
                let response = scoring.get_blame(&player, puzzle).await?;
                let msg = match &response {
                    ApiResponse::Ok(blame) => blame.msg.as_deref(),
                    ApiResponse::Error { msg, .. } => msg.as_deref(),
                };
                Reply::Embed(responses::blame_embed(&player, puzzle, msg))
            }
            Command::Register { name } => {
                let name = name.unwrap_or_else(|| author.to_string());
                match scoring.register(&Registration::discord(name, author)).await? {
                    ApiResponse::Ok(player) => Reply::Text(responses::registered(
                        &player.player_uuid,
                        &player.player_name,
                    )),
                    ApiResponse::Error { status, .. } if status == STATUS_CONFLICT => {
                        Reply::Text(responses::already_registered(author))
                    }
                    ApiResponse::Error { status, msg } => {
                        Reply::Text(responses::server_error(status, msg.as_deref()))
                    }
                }
            }
            Command::Update { name: None } => Reply::Text(responses::UPDATE_USAGE.to_string()),
            Command::Update { name: Some(name) } => {
                match scoring
                    .update_registration(&Registration::discord(name, author))
                    .await?
                {
                    ApiResponse::Ok(player) => Reply::Text(responses::updated(
                        &player.player_uuid,
                        &player.player_name,
                    )),
                    ApiResponse::Error { status, msg } => {
                        Reply::Text(responses::server_error(status, msg.as_deref()))
                    }
                }
            }
        };

        match reply {
            Reply::Text(text) => {
                msg.channel_id.say(&ctx.http, text).await?;
            }
            Reply::Embed(embed) => {
                msg.channel_id
                    .send_message(&ctx.http, CreateMessage::new().embed(to_embed(embed)))
                    .await?;
            }
        }

        Ok(())
    }
}

/// The score to announce, or the reply telling the player the submission failed.
fn submission_outcome(
    result: wordle_api::Result<ApiResponse<SubmittedScore>>,
) -> std::result::Result<SubmittedScore, String> {
    match result {
        Ok(ApiResponse::Ok(score)) => Ok(score),
        Ok(ApiResponse::Error { status, msg }) => {
            Err(responses::server_error(status, msg.as_deref()))
        }
        Err(e) => {
            warn!("Score submission failed: {}", e);
            Err(responses::server_error(STATUS_SERVER_ERROR, None))
        }
    }
}

enum Reply {
    Text(String),
    Embed(EmbedText),
}

fn to_embed(text: EmbedText) -> CreateEmbed {
    let embed = CreateEmbed::new().description(text.description);
    match text.title {
        Some(title) => embed.title(title),
        None => embed,
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.dispatch(&ctx, &msg).await {
            error!("Failed to handle message {}: {}", msg.id, e);
        }
    }
}
