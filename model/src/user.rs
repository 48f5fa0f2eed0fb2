use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    ///the user's id
    pub id: UserId,
    ///the user's username, not unique across the platform
    pub username: String,
    ///the user's discord-tag, "0" for users that migrated to unique usernames
    #[serde(default)]
    pub discriminator: String,
    ///the user's display name, if it is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    ///the user's avatar hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    ///whether the user belongs to an OAuth2 application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    ///whether the user is an Official Discord System user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    ///whether the user has two factor enabled on their account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mfa_enabled: Option<bool>,
    ///the user's banner hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    ///the user's banner color as an integer representation of a hex color code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<u32>,
    ///the user's chosen language option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    ///whether the email on this account has been verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    ///the user's email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    ///the flags on a user's account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    ///the type of Nitro subscription on a user's account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<u8>,
    ///the public flags on a user's account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
}

impl User {
    ///the name to show for this user, preferring the display name
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    ///a mention that pings this user when included in message content
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PartialUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
}

///body of a modify current user request, only set fields are changed
#[derive(Debug, Default, Serialize, Clone)]
pub struct ModifyCurrentUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    ///image data uri, or `Some(None)` to remove the avatar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_user() {
        let user: User = serde_json::from_str(
            r#"{
                "id": "80351110224678912",
                "username": "Nelly",
                "discriminator": "1337",
                "avatar": "8342729096ea3675442027381ff50dfe",
                "verified": true,
                "email": "nelly@discord.com",
                "flags": 64,
                "premium_type": 1,
                "public_flags": 64
            }"#,
        )
        .unwrap();
        assert_eq!(user.id, UserId::from(80351110224678912));
        assert_eq!(user.display_name(), "Nelly");
        assert_eq!(user.mention(), "<@80351110224678912>");
        assert_eq!(user.bot, None);
    }
}
