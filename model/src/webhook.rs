use crate::*;
use serde::{Deserialize, Serialize};

enum_number!(WebhookType: u8 {
    Incoming = 1,
    ChannelFollower = 2,
    Application = 3,
});

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Webhook {
    ///the id of the webhook
    pub id: WebhookId,
    #[serde(rename = "type")]
    pub typ: WebhookType,
    ///the guild id this webhook is for, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    ///the channel id this webhook is for, if any
    pub channel_id: Option<ChannelId>,
    ///the user this webhook was created by (not returned when getting a webhook with its token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    ///the default name of the webhook
    pub name: Option<String>,
    ///the default user avatar hash of the webhook
    pub avatar: Option<String>,
    ///the secure token of the webhook (returned for Incoming Webhooks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    ///the bot/OAuth2 application that created this webhook
    pub application_id: Option<ApplicationId>,
    ///the url used for executing the webhook (returned by the webhooks OAuth2 flow)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct NewWebhook {
    ///name of the webhook (1-80 characters)
    pub name: String,
    ///image data uri for the default webhook avatar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_webhook() {
        let hook: Webhook = serde_json::from_str(
            r#"{
                "name": "test webhook",
                "type": 1,
                "channel_id": "199737254929760256",
                "token": "3d89bb7572e0fb30d8128367b3b1b44fecd1726de135cbe28a41f8b2f777c372ba2939e72279b94526ff5d1bd4358d65cf11",
                "avatar": null,
                "guild_id": "199737254929760256",
                "id": "223704706495545344",
                "application_id": null
            }"#,
        )
        .unwrap();
        assert_eq!(hook.typ, WebhookType::Incoming);
        assert!(hook.user.is_none());
        assert!(hook.token.is_some());
    }
}
