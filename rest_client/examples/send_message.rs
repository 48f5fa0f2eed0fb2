use discord_rest::model::{ChannelId, EmbedField};
use discord_rest::{Client, MessageExt, NewMessage};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct EnvVars {
    channel_id: ChannelId,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let vars = envy::from_env::<EnvVars>()?;
    let client = Client::from_env()?;

    let message = NewMessage::text("Message test")
        .with_embed(|e| {
            e.set_title("Embed test")
                .push_field(EmbedField::inline("remaining", "?"));
        })
        .send(vars.channel_id, &client)
        .await?;
    println!("message sent: {}", message.id);

    //reactions share a bucket and are spaced out by the client
    for emoji in ['1', '2', '3'].iter() {
        let emoji = format!("{}\u{fe0f}\u{20e3}", emoji);
        client.create_reaction(vars.channel_id, message.id, emoji.as_str()).await?;
    }

    let edited = Some(message)
        .create_or_update_text("Message test (edited)", vars.channel_id, &client)
        .await?;
    println!("message edited: {}", edited.id);

    let key = discord_rest::Route::CreateMessage {
        channel_id: vars.channel_id,
    }
    .bucket_key();
    println!("{}: {:?}", key, client.rate_limiter().bucket_snapshot(&key).await);
    Ok(())
}
