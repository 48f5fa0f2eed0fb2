use crate::model::{ChannelId, Message};
use crate::*;
use async_trait::async_trait;

#[async_trait]
pub trait MessageExt {
    /// Edits the message to contain `s` if there is one, otherwise sends `s` as a new message.
    async fn create_or_update_text<S: Into<String> + Send>(
        self,
        s: S,
        channel_id: ChannelId,
        client: &Client,
    ) -> Result<Message, Error>;
}

#[async_trait]
impl MessageExt for Option<Message> {
    async fn create_or_update_text<S: Into<String> + Send>(
        self,
        s: S,
        channel_id: ChannelId,
        client: &Client,
    ) -> Result<Message, Error> {
        Ok(if let Some(message) = self {
            EditMessage::text(s).update(channel_id, message.id, client).await?
        } else {
            NewMessage::text(s).send(channel_id, client).await?
        })
    }
}
