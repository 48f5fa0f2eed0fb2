use crate::model::{
    ApplicationId, ChannelId, CommandId, GuildId, InteractionId, MessageId, ReactionType, RoleId, UserId, WebhookId,
};
use http::Method;
use std::fmt;

/// Every endpoint the client can call, with the ids needed to build its url.
///
/// Besides the path, each route knows which ratelimit bucket it belongs to. The api buckets
/// routes by their shape plus their "major" parameter (channel, guild, webhook, application or
/// interaction id), so those stay literal in the bucket key while other ids become `{}`. Webhook
/// and interaction tokens are never put in keys. Every reaction route in a channel shares one
/// key ending in `/reactions/` per http method, which is what the reaction custom limit matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    GetGateway,
    GetGatewayBot,

    GetCurrentUser,
    GetUser { user_id: UserId },
    ModifyCurrentUser,
    GetCurrentUserGuilds,
    LeaveGuild { guild_id: GuildId },
    CreateDm,

    GetChannel { channel_id: ChannelId },
    ModifyChannel { channel_id: ChannelId },
    DeleteChannel { channel_id: ChannelId },
    GetMessages { channel_id: ChannelId },
    GetMessage { channel_id: ChannelId, message_id: MessageId },
    CreateMessage { channel_id: ChannelId },
    EditMessage { channel_id: ChannelId, message_id: MessageId },
    DeleteMessage { channel_id: ChannelId, message_id: MessageId },
    BulkDeleteMessages { channel_id: ChannelId },
    TriggerTyping { channel_id: ChannelId },
    GetPinnedMessages { channel_id: ChannelId },
    PinMessage { channel_id: ChannelId, message_id: MessageId },
    UnpinMessage { channel_id: ChannelId, message_id: MessageId },
    CreateReaction { channel_id: ChannelId, message_id: MessageId, emoji: ReactionType },
    DeleteOwnReaction { channel_id: ChannelId, message_id: MessageId, emoji: ReactionType },
    DeleteUserReaction {
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: ReactionType,
        user_id: UserId,
    },
    GetReactions { channel_id: ChannelId, message_id: MessageId, emoji: ReactionType },
    DeleteAllReactions { channel_id: ChannelId, message_id: MessageId },
    GetChannelWebhooks { channel_id: ChannelId },
    CreateWebhook { channel_id: ChannelId },

    GetGuild { guild_id: GuildId },
    GetGuildChannels { guild_id: GuildId },
    CreateGuildChannel { guild_id: GuildId },
    GetMember { guild_id: GuildId, user_id: UserId },
    ListMembers { guild_id: GuildId },
    RemoveMember { guild_id: GuildId, user_id: UserId },
    AddMemberRole { guild_id: GuildId, user_id: UserId, role_id: RoleId },
    RemoveMemberRole { guild_id: GuildId, user_id: UserId, role_id: RoleId },
    GetRoles { guild_id: GuildId },
    GetBans { guild_id: GuildId },
    CreateBan { guild_id: GuildId, user_id: UserId },
    RemoveBan { guild_id: GuildId, user_id: UserId },

    GetWebhook { webhook_id: WebhookId },
    DeleteWebhook { webhook_id: WebhookId },
    ExecuteWebhook { webhook_id: WebhookId, token: String },

    GetGlobalCommands { application_id: ApplicationId },
    CreateGlobalCommand { application_id: ApplicationId },
    BulkOverwriteGlobalCommands { application_id: ApplicationId },
    DeleteGlobalCommand { application_id: ApplicationId, command_id: CommandId },
    GetGuildCommands { application_id: ApplicationId, guild_id: GuildId },
    CreateGuildCommand { application_id: ApplicationId, guild_id: GuildId },
    DeleteGuildCommand { application_id: ApplicationId, guild_id: GuildId, command_id: CommandId },

    CreateInteractionResponse { interaction_id: InteractionId, token: String },
    GetOriginalResponse { application_id: ApplicationId, token: String },
    EditOriginalResponse { application_id: ApplicationId, token: String },
    DeleteOriginalResponse { application_id: ApplicationId, token: String },
    CreateFollowupMessage { application_id: ApplicationId, token: String },
}

enum Segment {
    Literal(&'static str),
    //kept in the bucket key
    Major(String),
    //replaced by {} in the bucket key
    Minor(String),
}

use Segment::*;

fn major<T: fmt::Display>(value: T) -> Segment {
    Major(value.to_string())
}

fn minor<T: fmt::Display>(value: T) -> Segment {
    Minor(value.to_string())
}

fn emoji_segment(emoji: &ReactionType) -> Segment {
    Minor(url::form_urlencoded::byte_serialize(emoji.api_name().as_bytes()).collect())
}

impl Route {
    fn shape(&self) -> (Method, Vec<Segment>) {
        use Route::*;
        let channels = Literal("channels");
        let guilds = Literal("guilds");
        let messages = Literal("messages");
        let reactions = Literal("reactions");
        let applications = Literal("applications");
        let webhooks = Literal("webhooks");
        match self {
            GetGateway => (Method::GET, vec![Literal("gateway")]),
            GetGatewayBot => (Method::GET, vec![Literal("gateway"), Literal("bot")]),

            GetCurrentUser => (Method::GET, vec![Literal("users"), Literal("@me")]),
            GetUser { user_id } => (Method::GET, vec![Literal("users"), minor(user_id)]),
            ModifyCurrentUser => (Method::PATCH, vec![Literal("users"), Literal("@me")]),
            GetCurrentUserGuilds => (Method::GET, vec![Literal("users"), Literal("@me"), guilds]),
            LeaveGuild { guild_id } => (
                Method::DELETE,
                vec![Literal("users"), Literal("@me"), guilds, major(guild_id)],
            ),
            CreateDm => (Method::POST, vec![Literal("users"), Literal("@me"), channels]),

            GetChannel { channel_id } => (Method::GET, vec![channels, major(channel_id)]),
            ModifyChannel { channel_id } => (Method::PATCH, vec![channels, major(channel_id)]),
            DeleteChannel { channel_id } => (Method::DELETE, vec![channels, major(channel_id)]),
            GetMessages { channel_id } => (Method::GET, vec![channels, major(channel_id), messages]),
            GetMessage { channel_id, message_id } => (
                Method::GET,
                vec![channels, major(channel_id), messages, minor(message_id)],
            ),
            CreateMessage { channel_id } => (Method::POST, vec![channels, major(channel_id), messages]),
            EditMessage { channel_id, message_id } => (
                Method::PATCH,
                vec![channels, major(channel_id), messages, minor(message_id)],
            ),
            DeleteMessage { channel_id, message_id } => (
                Method::DELETE,
                vec![channels, major(channel_id), messages, minor(message_id)],
            ),
            BulkDeleteMessages { channel_id } => (
                Method::POST,
                vec![channels, major(channel_id), messages, Literal("bulk-delete")],
            ),
            TriggerTyping { channel_id } => (
                Method::POST,
                vec![channels, major(channel_id), Literal("typing")],
            ),
            GetPinnedMessages { channel_id } => (
                Method::GET,
                vec![channels, major(channel_id), Literal("pins")],
            ),
            PinMessage { channel_id, message_id } => (
                Method::PUT,
                vec![channels, major(channel_id), Literal("pins"), minor(message_id)],
            ),
            UnpinMessage { channel_id, message_id } => (
                Method::DELETE,
                vec![channels, major(channel_id), Literal("pins"), minor(message_id)],
            ),
            CreateReaction { channel_id, message_id, emoji } => (
                Method::PUT,
                vec![
                    channels,
                    major(channel_id),
                    messages,
                    minor(message_id),
                    reactions,
                    emoji_segment(emoji),
                    Literal("@me"),
                ],
            ),
            DeleteOwnReaction { channel_id, message_id, emoji } => (
                Method::DELETE,
                vec![
                    channels,
                    major(channel_id),
                    messages,
                    minor(message_id),
                    reactions,
                    emoji_segment(emoji),
                    Literal("@me"),
                ],
            ),
            DeleteUserReaction { channel_id, message_id, emoji, user_id } => (
                Method::DELETE,
                vec![
                    channels,
                    major(channel_id),
                    messages,
                    minor(message_id),
                    reactions,
                    emoji_segment(emoji),
                    minor(user_id),
                ],
            ),
            GetReactions { channel_id, message_id, emoji } => (
                Method::GET,
                vec![
                    channels,
                    major(channel_id),
                    messages,
                    minor(message_id),
                    reactions,
                    emoji_segment(emoji),
                ],
            ),
            DeleteAllReactions { channel_id, message_id } => (
                Method::DELETE,
                vec![channels, major(channel_id), messages, minor(message_id), reactions],
            ),
            GetChannelWebhooks { channel_id } => (Method::GET, vec![channels, major(channel_id), webhooks]),
            CreateWebhook { channel_id } => (Method::POST, vec![channels, major(channel_id), webhooks]),

            GetGuild { guild_id } => (Method::GET, vec![guilds, major(guild_id)]),
            GetGuildChannels { guild_id } => (Method::GET, vec![guilds, major(guild_id), channels]),
            CreateGuildChannel { guild_id } => (Method::POST, vec![guilds, major(guild_id), channels]),
            GetMember { guild_id, user_id } => (
                Method::GET,
                vec![guilds, major(guild_id), Literal("members"), minor(user_id)],
            ),
            ListMembers { guild_id } => (Method::GET, vec![guilds, major(guild_id), Literal("members")]),
            RemoveMember { guild_id, user_id } => (
                Method::DELETE,
                vec![guilds, major(guild_id), Literal("members"), minor(user_id)],
            ),
            AddMemberRole { guild_id, user_id, role_id } => (
                Method::PUT,
                vec![
                    guilds,
                    major(guild_id),
                    Literal("members"),
                    minor(user_id),
                    Literal("roles"),
                    minor(role_id),
                ],
            ),
            RemoveMemberRole { guild_id, user_id, role_id } => (
                Method::DELETE,
                vec![
                    guilds,
                    major(guild_id),
                    Literal("members"),
                    minor(user_id),
                    Literal("roles"),
                    minor(role_id),
                ],
            ),
            GetRoles { guild_id } => (Method::GET, vec![guilds, major(guild_id), Literal("roles")]),
            GetBans { guild_id } => (Method::GET, vec![guilds, major(guild_id), Literal("bans")]),
            CreateBan { guild_id, user_id } => (
                Method::PUT,
                vec![guilds, major(guild_id), Literal("bans"), minor(user_id)],
            ),
            RemoveBan { guild_id, user_id } => (
                Method::DELETE,
                vec![guilds, major(guild_id), Literal("bans"), minor(user_id)],
            ),

            GetWebhook { webhook_id } => (Method::GET, vec![webhooks, major(webhook_id)]),
            DeleteWebhook { webhook_id } => (Method::DELETE, vec![webhooks, major(webhook_id)]),
            ExecuteWebhook { webhook_id, token } => (
                Method::POST,
                vec![webhooks, major(webhook_id), minor(token)],
            ),

            GetGlobalCommands { application_id } => (
                Method::GET,
                vec![applications, major(application_id), Literal("commands")],
            ),
            CreateGlobalCommand { application_id } => (
                Method::POST,
                vec![applications, major(application_id), Literal("commands")],
            ),
            BulkOverwriteGlobalCommands { application_id } => (
                Method::PUT,
                vec![applications, major(application_id), Literal("commands")],
            ),
            DeleteGlobalCommand { application_id, command_id } => (
                Method::DELETE,
                vec![applications, major(application_id), Literal("commands"), minor(command_id)],
            ),
            GetGuildCommands { application_id, guild_id } => (
                Method::GET,
                vec![applications, major(application_id), guilds, major(guild_id), Literal("commands")],
            ),
            CreateGuildCommand { application_id, guild_id } => (
                Method::POST,
                vec![applications, major(application_id), guilds, major(guild_id), Literal("commands")],
            ),
            DeleteGuildCommand { application_id, guild_id, command_id } => (
                Method::DELETE,
                vec![
                    applications,
                    major(application_id),
                    guilds,
                    major(guild_id),
                    Literal("commands"),
                    minor(command_id),
                ],
            ),

            CreateInteractionResponse { interaction_id, token } => (
                Method::POST,
                vec![Literal("interactions"), major(interaction_id), minor(token), Literal("callback")],
            ),
            GetOriginalResponse { application_id, token } => (
                Method::GET,
                vec![webhooks, major(application_id), minor(token), messages, Literal("@original")],
            ),
            EditOriginalResponse { application_id, token } => (
                Method::PATCH,
                vec![webhooks, major(application_id), minor(token), messages, Literal("@original")],
            ),
            DeleteOriginalResponse { application_id, token } => (
                Method::DELETE,
                vec![webhooks, major(application_id), minor(token), messages, Literal("@original")],
            ),
            CreateFollowupMessage { application_id, token } => (
                Method::POST,
                vec![webhooks, major(application_id), minor(token)],
            ),
        }
    }

    pub fn method(&self) -> Method {
        self.shape().0
    }

    /// The path below the api base url, with every id filled in.
    pub fn path(&self) -> String {
        let (_method, segments) = self.shape();
        segments.iter().fold(String::new(), |mut path, segment| {
            path.push('/');
            match segment {
                Literal(s) => path.push_str(s),
                Major(s) | Minor(s) => path.push_str(s),
            }
            path
        })
    }

    /// The key of the ratelimit bucket this route is counted against.
    pub fn bucket_key(&self) -> String {
        let (method, segments) = self.shape();
        let mut key = method.to_string();
        key.push(' ');
        for segment in &segments {
            key.push('/');
            match segment {
                Literal("reactions") => {
                    key.push_str("reactions/");
                    return key;
                }
                Literal(s) => key.push_str(s),
                Major(s) => key.push_str(s),
                Minor(_) => key.push_str("{}"),
            }
        }
        key
    }
}
