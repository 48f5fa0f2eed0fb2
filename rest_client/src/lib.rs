//! An async client for the Discord http api which keeps to its ratelimits.
//!
//! Each request is assigned a ratelimit bucket by its [`Route`], waits until that bucket (and
//! the global limit) allows it, and feeds the response headers back to the bucket.

use thiserror::Error;

pub use discord_rest_model as model;

mod client;
pub use client::*;
mod config;
pub use config::ClientConfig;
mod util;
pub use util::MessageExt;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

#[derive(Debug, Error)]
pub enum Error {
    #[error("An http error occurred {0:?}")]
    Http(#[from] reqwest::Error),
    #[error("An error occured while parsing a url {0:?}")]
    Url(#[from] url::ParseError),
    #[error("An error occured during (de)serialization {0:?}")]
    Json(#[from] serde_json::Error),
    #[error("An embed was too big {0:?}")]
    EmbedTooBig(#[from] model::EmbedTooBigError),
    #[error("A ratelimit header could not be understood: {0}")]
    RateLimitHeader(#[from] HeaderError),
    #[error("Was rate limited: {0:?}")]
    RateLimited(model::TooManyRequests),
    #[error("Gave up after {0} retries while executing: {1}")]
    TooManyRetries(u16, String),
    #[error("A non success response code was returned from an http request: {0:?} {1:?}")]
    UnsuccessfulHttp(http::StatusCode, Option<model::ApiError>),
    #[error("Could not load the client configuration {0}")]
    Config(#[from] envy::Error),
}
