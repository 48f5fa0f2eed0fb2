use super::{Client, Query, Route};
use crate::model::*;
use crate::Error;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Default, Serialize, Clone)]
pub struct NewMessage {
    ///the message contents (up to 2000 characters)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    ///a nonce that can be used for optimistic message sending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    ///true if this is a TTS message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    ///up to 10 rich embeds
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    ///makes this message a reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl NewMessage {
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

    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.message_reference = Some(MessageReference::reply_to(message_id));
        self
    }

    pub fn enforce_embed_limits(&self) -> Result<(), EmbedTooBigError> {
        for embed in &self.embeds {
            embed.enforce_embed_limits()?;
        }
        Ok(())
    }

    pub async fn send(self, channel_id: ChannelId, client: &Client) -> Result<Message, Error> {
        client.send_message(channel_id, &self).await
    }
}

///body of an edit message request, only set fields are changed
#[derive(Debug, Default, Serialize, Clone)]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
}

impl EditMessage {
    pub fn text<S: Into<String>>(s: S) -> Self {
        Self {
            content: Some(s.into()),
            ..Default::default()
        }
    }

    pub fn enforce_embed_limits(&self) -> Result<(), EmbedTooBigError> {
        for embed in self.embeds.iter().flatten() {
            embed.enforce_embed_limits()?;
        }
        Ok(())
    }

    pub async fn update(self, channel_id: ChannelId, message_id: MessageId, client: &Client) -> Result<Message, Error> {
        client.edit_message(channel_id, message_id, &self).await
    }
}

/// Which page of a channel's history to fetch.
#[derive(Debug, Clone, Copy)]
pub enum GetMessages {
    Around(MessageId),
    Before(MessageId),
    After(MessageId),
    MostRecent,
}

impl GetMessages {
    fn to_query(self, query: &mut Query) {
        match self {
            GetMessages::Around(msg_id) => query.push(("around", msg_id.to_string())),
            GetMessages::Before(msg_id) => query.push(("before", msg_id.to_string())),
            GetMessages::After(msg_id) => query.push(("after", msg_id.to_string())),
            GetMessages::MostRecent => {
                //this is represented by the absence of the other fields
            }
        }
    }
}

impl Client {
    pub async fn get_channel(&self, channel_id: ChannelId) -> Result<Channel, Error> {
        self.request_json(Route::GetChannel { channel_id }, Query::new(), None).await
    }

    pub async fn modify_channel(&self, channel_id: ChannelId, settings: &ChannelSettings) -> Result<Channel, Error> {
        self.request_json(Route::ModifyChannel { channel_id }, Query::new(), Self::json_body(settings)?)
            .await
    }

    pub async fn delete_channel(&self, channel_id: ChannelId) -> Result<Channel, Error> {
        self.request_json(Route::DeleteChannel { channel_id }, Query::new(), None).await
    }

    pub async fn get_messages(
        &self,
        channel_id: ChannelId,
        position: GetMessages,
        limit: Option<u32>,
    ) -> Result<Vec<Message>, Error> {
        let mut query = Query::new();
        position.to_query(&mut query);
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.request_json(Route::GetMessages { channel_id }, query, None).await
    }

    pub async fn get_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<Message, Error> {
        self.request_json(Route::GetMessage { channel_id, message_id }, Query::new(), None)
            .await
    }

    pub async fn send_message(&self, channel_id: ChannelId, new_message: &NewMessage) -> Result<Message, Error> {
        new_message.enforce_embed_limits()?;
        self.request_json(
            Route::CreateMessage { channel_id },
            Query::new(),
            Self::json_body(new_message)?,
        )
        .await
    }

    pub async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        edit: &EditMessage,
    ) -> Result<Message, Error> {
        edit.enforce_embed_limits()?;
        self.request_json(
            Route::EditMessage { channel_id, message_id },
            Query::new(),
            Self::json_body(edit)?,
        )
        .await
    }

    pub async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), Error> {
        self.request_empty(Route::DeleteMessage { channel_id, message_id }, Query::new(), None)
            .await
    }

    /// Deletes 2-100 messages at once. Messages older than two weeks are refused by the api.
    pub async fn delete_messages(&self, channel_id: ChannelId, message_ids: &[MessageId]) -> Result<(), Error> {
        self.request_empty(
            Route::BulkDeleteMessages { channel_id },
            Query::new(),
            Self::json_body(&json!({ "messages": message_ids }))?,
        )
        .await
    }

    pub async fn trigger_typing(&self, channel_id: ChannelId) -> Result<(), Error> {
        self.request_empty(Route::TriggerTyping { channel_id }, Query::new(), None).await
    }

    pub async fn get_pinned_messages(&self, channel_id: ChannelId) -> Result<Vec<Message>, Error> {
        self.request_json(Route::GetPinnedMessages { channel_id }, Query::new(), None).await
    }

    pub async fn pin_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), Error> {
        self.request_empty(Route::PinMessage { channel_id, message_id }, Query::new(), None)
            .await
    }

    pub async fn unpin_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), Error> {
        self.request_empty(Route::UnpinMessage { channel_id, message_id }, Query::new(), None)
            .await
    }

    pub async fn create_reaction<E: Into<ReactionType>>(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: E,
    ) -> Result<(), Error> {
        let emoji = emoji.into();
        self.request_empty(
            Route::CreateReaction { channel_id, message_id, emoji },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn delete_own_reaction<E: Into<ReactionType>>(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: E,
    ) -> Result<(), Error> {
        let emoji = emoji.into();
        self.request_empty(
            Route::DeleteOwnReaction { channel_id, message_id, emoji },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn delete_user_reaction<E: Into<ReactionType>>(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: E,
        user_id: UserId,
    ) -> Result<(), Error> {
        let emoji = emoji.into();
        self.request_empty(
            Route::DeleteUserReaction { channel_id, message_id, emoji, user_id },
            Query::new(),
            None,
        )
        .await
    }

    /// Users who reacted with `emoji`, `after` and `limit` are passed through as paging parameters.
    pub async fn get_reactions<E: Into<ReactionType>>(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: E,
        after: Option<UserId>,
        limit: Option<u32>,
    ) -> Result<Vec<User>, Error> {
        let emoji = emoji.into();
        let mut query = Query::new();
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.request_json(Route::GetReactions { channel_id, message_id, emoji }, query, None)
            .await
    }

    pub async fn delete_all_reactions(&self, channel_id: ChannelId, message_id: MessageId) -> Result<(), Error> {
        self.request_empty(
            Route::DeleteAllReactions { channel_id, message_id },
            Query::new(),
            None,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_message_body() {
        let msg = NewMessage::text("hello")
            .reply_to(MessageId::from(5))
            .with_embed(|e| {
                e.set_title("title");
            });
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["content"], "hello");
        assert_eq!(value["message_reference"]["message_id"], "5");
        assert_eq!(value["embeds"][0]["title"], "title");
        assert!(value.get("tts").is_none());
    }

    #[test]
    fn oversized_embeds_are_caught_before_sending() {
        let msg = NewMessage::default().with_embed(|e| {
            e.set_title("t".repeat(300));
        });
        assert!(msg.enforce_embed_limits().is_err());
    }

    #[test]
    fn message_position_query() {
        let mut query = Query::new();
        GetMessages::Before(MessageId::from(10)).to_query(&mut query);
        assert_eq!(query, vec![("before", "10".to_owned())]);
        let mut query = Query::new();
        GetMessages::MostRecent.to_query(&mut query);
        assert!(query.is_empty());
    }

    #[test]
    fn edit_only_sends_changed_fields() {
        let value = serde_json::to_value(&EditMessage::text("new")).unwrap();
        assert_eq!(value, json!({"content": "new"}));
    }
}
