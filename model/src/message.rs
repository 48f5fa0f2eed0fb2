use crate::*;
use bitflags::bitflags;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

enum_number!(MessageType: u8 {
    Default = 0,
    RecipientAdd = 1,
    RecipientRemove = 2,
    Call = 3,
    ChannelNameChange = 4,
    ChannelIconChange = 5,
    ChannelPinnedMessage = 6,
    UserJoin = 7,
    GuildBoost = 8,
    GuildBoostTier1 = 9,
    GuildBoostTier2 = 10,
    GuildBoostTier3 = 11,
    ChannelFollowAdd = 12,
    ThreadCreated = 18,
    Reply = 19,
    ChatInputCommand = 20,
    ThreadStarterMessage = 21,
    ContextMenuCommand = 23,
});

bitflags! {
    pub struct MessageFlags: u64 {
        ///this message has been published to subscribed channels (via Channel Following)
        const CROSSPOSTED = 1 << 0;
        ///this message originated from a message in another channel (via Channel Following)
        const IS_CROSSPOST = 1 << 1;
        ///do not include any embeds when serializing this message
        const SUPPRESS_EMBEDS = 1 << 2;
        ///the source message for this crosspost has been deleted
        const SOURCE_MESSAGE_DELETED = 1 << 3;
        ///this message came from the urgent message system
        const URGENT = 1 << 4;
        ///this message has an associated thread, with the same id as the message
        const HAS_THREAD = 1 << 5;
        ///this message is only visible to the user who invoked the Interaction
        const EPHEMERAL = 1 << 6;
        ///this message is an Interaction Response and the bot is "thinking"
        const LOADING = 1 << 7;
        ///this message will not trigger push and desktop notifications
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
    }
}

impl<'de> Deserialize<'de> for MessageFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        Ok(Self::from_bits_truncate(u64::deserialize(deserializer)?))
    }
}

impl Serialize for MessageFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Message {
    ///id of the message
    pub id: MessageId,
    ///id of the channel the message was sent in
    pub channel_id: ChannelId,
    ///the author of this message (not guaranteed to be a valid user if the message was created by a webhook)
    pub author: User,
    ///contents of the message
    #[serde(default)]
    pub content: String,
    ///when this message was sent
    pub timestamp: DateTime<FixedOffset>,
    ///when this message was edited (or null if never)
    pub edited_timestamp: Option<DateTime<FixedOffset>>,
    ///whether this was a TTS message
    pub tts: bool,
    ///whether this message mentions everyone
    pub mention_everyone: bool,
    ///users specifically mentioned in the message
    pub mentions: Vec<User>,
    ///roles specifically mentioned in this message
    pub mention_roles: Vec<RoleId>,
    ///any attached files
    pub attachments: Vec<Attachment>,
    ///any embedded content
    pub embeds: Vec<Embed>,
    ///reactions to the message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    ///whether this message is pinned
    pub pinned: bool,
    ///if the message is generated by a webhook, this is the webhook's id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<WebhookId>,
    ///type of message
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    ///if the message is an Interaction or application-owned webhook, this is the id of the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    ///data showing the source of a crosspost, channel follow add, pin, or reply message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    ///message flags combined as a bitfield
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    ///the message associated with the message_reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_message: Option<Box<Message>>,
    ///the thread that was started from this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Channel>,
    ///sent if the message contains components like buttons, action rows, or other interactive components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<serde_json::Value>,
}

impl Message {
    pub fn is_own(&self, user_id: UserId) -> bool {
        self.author.id == user_id
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Attachment {
    pub id: AttachmentId,
    ///name of file attached
    pub filename: String,
    ///the attachment's media type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    ///size of file in bytes
    pub size: u64,
    ///source url of file
    pub url: String,
    ///a proxied url of file
    pub proxy_url: String,
    ///height of file (if image)
    #[serde(default)]
    pub height: Option<u64>,
    ///width of file (if image)
    #[serde(default)]
    pub width: Option<u64>,
    ///whether this attachment is ephemeral
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Reaction {
    ///times this emoji has been used to react
    pub count: u64,
    ///whether the current user reacted using this emoji
    pub me: bool,
    pub emoji: Emoji,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MessageReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<MessageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    ///when sending, whether to error if the referenced message doesn't exist instead of sending as a normal (non-reply) message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_if_not_exists: Option<bool>,
}

impl MessageReference {
    pub fn reply_to(message_id: MessageId) -> Self {
        Self {
            message_id: Some(message_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AllowedMentionType {
    Roles,
    Users,
    Everyone,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AllowedMentions {
    ///which kinds of mentions to parse from the content
    #[serde(default)]
    pub parse: Vec<AllowedMentionType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserId>,
    ///for replies, whether to mention the author of the message being replied to
    #[serde(default)]
    pub replied_user: bool,
}

impl AllowedMentions {
    ///suppresses every mention in the message
    pub fn none() -> Self {
        Self::default()
    }
}

///an emoji used to react to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionType {
    Unicode(String),
    Custom { name: String, id: EmojiId },
}

impl ReactionType {
    ///the un-encoded form the api expects in reaction routes, `name:id` for custom emoji
    pub fn api_name(&self) -> String {
        match self {
            ReactionType::Unicode(emoji) => emoji.clone(),
            ReactionType::Custom { name, id } => format!("{}:{}", name, id),
        }
    }
}

impl From<char> for ReactionType {
    fn from(c: char) -> Self {
        ReactionType::Unicode(c.to_string())
    }
}

impl From<&str> for ReactionType {
    fn from(s: &str) -> Self {
        ReactionType::Unicode(s.to_owned())
    }
}
