use crate::*;
use serde::{Deserialize, Serialize};

enum_number!(InteractionType: u8 {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
});

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Interaction {
    ///id of the interaction
    pub id: InteractionId,
    ///id of the application this interaction is for
    pub application_id: ApplicationId,
    #[serde(rename = "type")]
    pub typ: InteractionType,
    ///the command data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    ///the guild it was sent from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    ///the channel it was sent from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    ///guild member data for the invoking user, including permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<GuildMember>,
    ///user object for the invoking user, if invoked in a DM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    ///a continuation token for responding to the interaction
    pub token: String,
    ///read-only property, always 1
    pub version: u8,
    ///for components, the message they were attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Box<Message>>,
    ///the selected language of the invoking user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Interaction {
    ///the user who triggered the interaction, whether it came from a guild or a DM
    pub fn invoker(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or_else(|| self.user.as_ref())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InteractionData {
    ///the id of the invoked command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CommandId>,
    ///the name of the invoked command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<ApplicationCommandType>,
    ///the params + values from the user
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    ///for components, the custom_id of the component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    ///for components, the type of the component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u8>,
    ///converted users, roles, channels and attachments keyed by id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InteractionDataOption {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: ApplicationCommandOptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    ///present if this option is a group or subcommand
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    ///true if this option is the currently focused option for autocomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

enum_number!(InteractionCallbackType: u8 {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
});

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct InteractionCallbackData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    ///message content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    ///supports up to 10 embeds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    ///only SUPPRESS_EMBEDS and EPHEMERAL can be set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub typ: InteractionCallbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            typ: InteractionCallbackType::Pong,
            data: None,
        }
    }

    pub fn message<S: Into<String>>(content: S) -> Self {
        Self {
            typ: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(InteractionCallbackData {
                content: Some(content.into()),
                ..Default::default()
            }),
        }
    }

    ///acknowledge now, edit the original response later
    pub fn deferred() -> Self {
        Self {
            typ: InteractionCallbackType::DeferredChannelMessageWithSource,
            data: None,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        let data = self.data.get_or_insert_with(Default::default);
        data.flags = Some(data.flags.unwrap_or_else(MessageFlags::empty) | MessageFlags::EPHEMERAL);
        self
    }
}
