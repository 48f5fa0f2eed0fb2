use super::{Client, Query, Route};
use crate::model::*;
use crate::Error;
use serde::Serialize;

///body of an execute webhook request
#[derive(Debug, Default, Serialize, Clone)]
pub struct ExecuteWebhook {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    ///override the default username of the webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    ///override the default avatar of the webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl ExecuteWebhook {
    pub fn text<S: Into<String>>(s: S) -> Self {
        Self {
            content: s.into(),
            ..Default::default()
        }
    }

    pub fn with_embed<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Embed),
    {
        let mut embed = Embed::default();
        f(&mut embed);
        self.embeds.push(embed);
        self
    }

    pub fn enforce_embed_limits(&self) -> Result<(), EmbedTooBigError> {
        for embed in &self.embeds {
            embed.enforce_embed_limits()?;
        }
        Ok(())
    }
}

impl Client {
    pub async fn get_channel_webhooks(&self, channel_id: ChannelId) -> Result<Vec<Webhook>, Error> {
        self.request_json(Route::GetChannelWebhooks { channel_id }, Query::new(), None)
            .await
    }

    pub async fn create_webhook(&self, channel_id: ChannelId, webhook: &NewWebhook) -> Result<Webhook, Error> {
        self.request_json(
            Route::CreateWebhook { channel_id },
            Query::new(),
            Self::json_body(webhook)?,
        )
        .await
    }

    pub async fn get_webhook(&self, webhook_id: WebhookId) -> Result<Webhook, Error> {
        self.request_json(Route::GetWebhook { webhook_id }, Query::new(), None).await
    }

    pub async fn delete_webhook(&self, webhook_id: WebhookId) -> Result<(), Error> {
        self.request_empty(Route::DeleteWebhook { webhook_id }, Query::new(), None).await
    }

    /// Executes a webhook. With `wait` the api returns the created message, without it nothing is returned.
    pub async fn execute_webhook(
        &self,
        webhook_id: WebhookId,
        token: &str,
        body: &ExecuteWebhook,
        wait: bool,
    ) -> Result<Option<Message>, Error> {
        body.enforce_embed_limits()?;
        let route = Route::ExecuteWebhook {
            webhook_id,
            token: token.to_owned(),
        };
        let body = Self::json_body(body)?;
        if wait {
            let query = vec![("wait", "true".to_owned())];
            self.request_json(route, query, body).await.map(Some)
        } else {
            self.request_empty(route, Query::new(), body).await.map(|()| None)
        }
    }
}
