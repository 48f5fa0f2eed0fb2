use crate::*;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

enum_number!(ChannelType: u8 {
    GuildText = 0,
    Dm = 1,
    GuildVoice = 2,
    GroupDm = 3,
    GuildCategory = 4,
    GuildAnnouncement = 5,
    AnnouncementThread = 10,
    PublicThread = 11,
    PrivateThread = 12,
    GuildStageVoice = 13,
    GuildDirectory = 14,
    GuildForum = 15,
});

impl ChannelType {
    pub fn is_thread(&self) -> bool {
        matches!(
            self,
            ChannelType::AnnouncementThread | ChannelType::PublicThread | ChannelType::PrivateThread
        )
    }
}

enum_number!(OverwriteType: u8 {
    Role = 0,
    Member = 1,
});

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Overwrite {
    ///role or user id
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub typ: OverwriteType,
    pub allow: Permissions,
    pub deny: Permissions,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Channel {
    ///the id of this channel
    pub id: ChannelId,
    ///the type of channel
    #[serde(rename = "type")]
    pub typ: ChannelType,
    ///the id of the guild (may be missing for some channel objects received over gateway guild dispatches)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    ///sorting position of the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    ///explicit permission overwrites for members and roles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_overwrites: Vec<Overwrite>,
    ///the name of the channel (1-100 characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    ///the channel topic (0-4096 characters for forum channels, 0-1024 characters for all others)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    ///the id of the last message sent in this channel (may not point to an existing or valid message)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_id: Option<MessageId>,
    ///the bitrate (in bits) of the voice channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    ///the user limit of the voice channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u64>,
    ///amount of seconds a user has to wait before sending another message (0-21600)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u64>,
    ///the recipients of the DM
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<User>,
    ///icon hash of the group DM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    ///id of the creator of the group DM or thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    ///application id of the group DM creator if it is bot-created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    ///for guild channels: id of the parent category, for threads: id of the channel the thread was created in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    ///when the last pinned message was pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pin_timestamp: Option<DateTime<FixedOffset>>,
    ///voice region id for the voice channel, automatic when set to null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtc_region: Option<String>,
    ///number of messages (not including the initial message or deleted messages) in a thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
    ///an approximate count of users in a thread, stops counting at 50
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    ///default duration, in minutes, that the clients use for newly created threads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_auto_archive_duration: Option<u64>,
    ///computed permissions for the invoking user in the channel, only included in interaction payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

impl Channel {
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

///body of a modify channel or create guild channel request
#[derive(Debug, Default, Serialize, Clone)]
pub struct ChannelSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub typ: Option<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ChannelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_overwrites: Option<Vec<Overwrite>>,
}

impl ChannelSettings {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_text_channel() {
        let channel: Channel = serde_json::from_str(
            r#"{
                "id": "41771983423143937",
                "guild_id": "41771983423143937",
                "name": "general",
                "type": 0,
                "position": 6,
                "permission_overwrites": [
                    {"id": "41771983423143936", "type": 0, "allow": "1024", "deny": "0"}
                ],
                "rate_limit_per_user": 2,
                "nsfw": true,
                "topic": "24/7 chat about how to gank Mike #2",
                "last_message_id": "155117677105512449",
                "parent_id": "399942396007890945",
                "default_auto_archive_duration": 60
            }"#,
        )
        .unwrap();
        assert_eq!(channel.typ, ChannelType::GuildText);
        assert_eq!(channel.permission_overwrites[0].typ, OverwriteType::Role);
        assert!(channel.permission_overwrites[0].allow.contains(Permissions::VIEW_CHANNEL));
        assert_eq!(channel.mention(), "<#41771983423143937>");
    }

    #[test]
    fn unknown_channel_types_survive() {
        let typ: ChannelType = serde_json::from_str("99").unwrap();
        assert_eq!(typ, ChannelType::Unknown(99));
        assert!(!typ.is_thread());
    }
}
