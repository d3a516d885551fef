use rand::Rng;
use serde::Serialize;
use serde_json::Value;

/// Discord rejects webhook messages carrying more embeds than this.
pub const MAX_EMBEDS: usize = 10;

/// Webhook body for one report: a headline plus one embed per ranked player.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    #[serde(rename = "content")]
    pub title: String,
    pub embeds: Vec<Embed>,
    pub attachments: Vec<Value>,
}

impl ReportPayload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            embeds: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn push(&mut self, embed: Embed) {
        self.embeds.push(embed);
    }

    /// Splits the report into messages of at most `max_embeds` embeds each. Only the first
    /// message carries the headline. A report without embeds stays one message.
    pub fn into_messages(self, max_embeds: usize) -> Vec<ReportPayload> {
        if self.embeds.len() <= max_embeds {
            return vec![self];
        }

        let Self {
            title,
            embeds,
            attachments,
        } = self;
        embeds
            .chunks(max_embeds.max(1))
            .enumerate()
            .map(|(i, chunk)| Self {
                title: if i == 0 { title.clone() } else { String::new() },
                embeds: chunk.to_vec(),
                attachments: attachments.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            color: random_color(),
            fields: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

fn random_color() -> u32 {
    rand::thread_rng().gen_range(0..=0xFF_FFFF)
}
