use crate::{Error, DEFAULT_API_BASE};
use serde::Deserialize;
use std::fmt;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

fn default_user_agent() -> String {
    format!(
        "DiscordBot ({}, {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

fn default_max_retries() -> u16 {
    3
}

fn default_retry_on_rate_limit() -> bool {
    true
}

/// Settings for a [`Client`](crate::Client).
///
/// Can be read from the environment with [`from_env`](ClientConfig::from_env), where each field
/// maps to an upper case `DISCORD_` prefixed variable, eg. `DISCORD_BOT_TOKEN`.
#[derive(Deserialize, Clone)]
pub struct ClientConfig {
    pub bot_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    ///how many times a request is retried after a 429 or 502 before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u16,
    ///whether a 429 is waited out and retried, or returned straight away as an error
    #[serde(default = "default_retry_on_rate_limit")]
    pub retry_on_rate_limit: bool,
}

impl ClientConfig {
    pub fn new<S: Into<String>>(bot_token: S) -> Self {
        ClientConfig {
            bot_token: bot_token.into(),
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            retry_on_rate_limit: default_retry_on_rate_limit(),
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(std::env::vars())
    }

    fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config: ClientConfig = envy::prefixed("DISCORD_").from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks `api_base` is a usable url, and drops any trailing `/` so paths can be appended.
    pub fn validate(&mut self) -> Result<(), Error> {
        url::Url::parse(&self.api_base)?;
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("bot_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_on_rate_limit", &self.retry_on_rate_limit)
            .finish()
    }
}
