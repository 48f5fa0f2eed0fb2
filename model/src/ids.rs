use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, UNIX_EPOCH};

/// Milliseconds between the unix epoch and the first second of 2015, which snowflakes count from.
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

#[derive(Hash, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[serde(transparent)]
pub struct Snowflake(
    #[serde(
        deserialize_with = "crate::custom_serialization::u64_from_string",
        serialize_with = "crate::custom_serialization::u64_to_string"
    )]
    pub u64,
);

impl Snowflake {
    ///when the object this id belongs to was created
    pub fn timestamp(&self) -> DateTime<Utc> {
        let millis = (self.0 >> 22) + DISCORD_EPOCH;
        DateTime::<Utc>::from(UNIX_EPOCH + Duration::from_millis(millis))
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Snowflake(id)
    }
}

macro_rules! snowflake_id {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Hash, Debug, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
            #[serde(transparent)]
            pub struct $name(pub Snowflake);

            impl $name {
                pub fn get(&self) -> u64 {
                    (self.0).0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl From<u64> for $name {
                fn from(id: u64) -> Self {
                    $name(Snowflake(id))
                }
            }
        )*
    };
}

snowflake_id!(
    ChannelId,
    RoleId,
    GuildId,
    MessageId,
    UserId,
    EmojiId,
    ApplicationId,
    WebhookId,
    InteractionId,
    CommandId,
    AttachmentId,
);
