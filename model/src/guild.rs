use crate::*;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PartialGuild {
    ///guild id
    pub id: GuildId,
    ///guild name (2-100 characters)
    pub name: String,
    ///icon hash
    pub icon: Option<String>,
    ///whether or not the user is the owner of the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<bool>,
    ///total permissions for the user in the guild (does not include channel overrides)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    ///enabled guild features
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Guild {
    ///guild id
    pub id: GuildId,
    ///guild name (2-100 characters)
    pub name: String,
    ///icon hash
    pub icon: Option<String>,
    ///splash hash
    pub splash: Option<String>,
    ///discovery splash hash, only present for guilds with the "DISCOVERABLE" feature
    #[serde(default)]
    pub discovery_splash: Option<String>,
    ///id of owner
    pub owner_id: UserId,
    ///id of afk channel
    pub afk_channel_id: Option<ChannelId>,
    ///afk timeout in seconds
    pub afk_timeout: u64,
    ///whether the server widget is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_enabled: Option<bool>,
    ///the channel id that the widget will generate an invite to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_channel_id: Option<ChannelId>,
    ///verification level required for the guild
    pub verification_level: u8,
    ///default message notifications level
    pub default_message_notifications: u8,
    ///explicit content filter level
    pub explicit_content_filter: u8,
    ///roles in the guild
    pub roles: Vec<Role>,
    ///custom guild emojis
    pub emojis: Vec<Emoji>,
    ///enabled guild features
    pub features: Vec<String>,
    ///required MFA level for the guild
    pub mfa_level: u8,
    ///application id of the guild creator if it is bot-created
    pub application_id: Option<ApplicationId>,
    ///the id of the channel where guild notices such as welcome messages and boost events are posted
    pub system_channel_id: Option<ChannelId>,
    ///the id of the channel where community guilds can display rules
    #[serde(default)]
    pub rules_channel_id: Option<ChannelId>,
    ///the vanity url code for the guild
    #[serde(default)]
    pub vanity_url_code: Option<String>,
    ///the description of a guild
    #[serde(default)]
    pub description: Option<String>,
    ///premium tier (Server Boost level)
    #[serde(default)]
    pub premium_tier: u8,
    ///the number of boosts this guild currently has
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_subscription_count: Option<u64>,
    ///the preferred locale of a Community guild
    #[serde(default)]
    pub preferred_locale: Option<String>,
    ///approximate number of members in this guild, returned when `with_counts` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_member_count: Option<u64>,
    ///approximate number of non-offline members in this guild, returned when `with_counts` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_presence_count: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Role {
    ///role id
    pub id: RoleId,
    ///role name
    pub name: String,
    ///integer representation of hexadecimal color code
    pub color: u32,
    ///if this role is pinned in the user listing
    pub hoist: bool,
    ///role icon hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    ///position of this role
    pub position: i64,
    ///permission bit set
    pub permissions: Permissions,
    ///whether this role is managed by an integration
    pub managed: bool,
    ///whether this role is mentionable
    pub mentionable: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Emoji {
    ///emoji id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmojiId>,
    ///emoji name (can be null only in reaction emoji objects)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    ///roles allowed to use this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleId>>,
    ///user that created this emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    ///whether this emoji must be wrapped in colons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_colons: Option<bool>,
    ///whether this emoji is managed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,
    ///whether this emoji is animated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    ///whether this emoji can be used, may be false due to loss of Server Boosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GuildMember {
    ///the user this guild member represents, missing in message create events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    ///this users guild nickname (if one is set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    ///the member's guild avatar hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    ///array of role object ids
    pub roles: Vec<RoleId>,
    ///when the user joined the guild
    pub joined_at: DateTime<FixedOffset>,
    ///when the user started boosting the guild
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_since: Option<DateTime<FixedOffset>>,
    ///whether the user is deafened in voice channels
    #[serde(default)]
    pub deaf: bool,
    ///whether the user is muted in voice channels
    #[serde(default)]
    pub mute: bool,
    ///whether the user has not yet passed the guild's Membership Screening requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    ///total permissions of the member in the channel, only present in interaction payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    ///when the user's timeout will expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_disabled_until: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Ban {
    ///the reason for the ban
    pub reason: Option<String>,
    ///the banned user
    pub user: User,
}

#[derive(Debug, Default, Serialize, Clone)]
pub struct CreateBan {
    ///number of seconds to delete messages for, between 0 and 604800 (7 days)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_message_seconds: Option<u32>,
}
