use reqwest::Client;

use crate::{
    error::Result,
    payload::{MAX_EMBEDS, ReportPayload},
};

/// Destination of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    General,
    Report,
    Leaderboard,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Report => "report",
            Self::Leaderboard => "leaderboard",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    /// Sends the payload as a new message.
    async fn post(&self, channel: Channel, payload: &ReportPayload) -> Result<()>;

    /// Overwrites a message previously sent through the same channel.
    async fn update(&self, channel: Channel, message_id: &str, payload: &ReportPayload)
    -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct WebhookUrls {
    pub general: String,
    pub report: String,
    pub leaderboard: String,
}

impl WebhookUrls {
    pub fn url(&self, channel: Channel) -> &str {
        match channel {
            Channel::General => &self.general,
            Channel::Report => &self.report,
            Channel::Leaderboard => &self.leaderboard,
        }
    }
}

/// Delivers reports through Discord-style webhooks.
pub struct WebhookClient {
    urls: WebhookUrls,
    client: Client,
}

impl WebhookClient {
    pub fn new(urls: WebhookUrls) -> Self {
        Self {
            urls,
            client: Client::new(),
        }
    }

    fn message_url(&self, channel: Channel, message_id: &str) -> String {
        format!(
            "{}/messages/{}",
            self.urls.url(channel).trim_end_matches('/'),
            message_id
        )
    }
}

#[async_trait::async_trait]
impl Delivery for WebhookClient {
    async fn post(&self, channel: Channel, payload: &ReportPayload) -> Result<()> {
        for message in payload.clone().into_messages(MAX_EMBEDS) {
            tracing::debug!("POST {} embeds to {} webhook", message.embeds.len(), channel);

            self.client
                .post(self.urls.url(channel))
                .json(&message)
                .send()
                .await?
                .error_for_status()?;
        }

        Ok(())
    }

    async fn update(
        &self,
        channel: Channel,
        message_id: &str,
        payload: &ReportPayload,
    ) -> Result<()> {
        tracing::debug!("PATCH message {} on {} webhook", message_id, channel);

        // a single message can be edited, so embeds past the limit are dropped
        let mut payload = payload.clone();
        if payload.embeds.len() > MAX_EMBEDS {
            tracing::warn!(
                "Message {} holds {} of {} embeds",
                message_id,
                MAX_EMBEDS,
                payload.embeds.len()
            );
            payload.embeds.truncate(MAX_EMBEDS);
        }

        self.client
            .patch(self.message_url(channel, message_id))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
