use crate::model::*;
use crate::{ClientConfig, Error};
use http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::StatusCode;
use itertools::Itertools;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use tracing::*;

mod ratelimiter;
pub use ratelimiter::*;
mod routes;
pub use routes::Route;

mod channels;
pub use channels::*;
mod guilds;
mod interactions;
mod users;
pub use users::*;
mod webhooks;
pub use webhooks::*;

pub(crate) type Query = Vec<(&'static str, String)>;

/// An http client for the api.
///
/// Cloning is cheap and clones share the connection pool and ratelimiter.
#[derive(Clone, Debug)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
    rate_limiter: RateLimiter,
}

fn query_string(query: &[(&'static str, String)]) -> String {
    if query.is_empty() {
        return String::new();
    }
    let pairs = query
        .iter()
        .map(|(key, value)| {
            let value: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{}={}", key, value)
        })
        .join("&");
    format!("?{}", pairs)
}

fn retry_delay(retry_after: f64) -> Duration {
    if retry_after <= 0.0 {
        return Duration::from_secs(0);
    }
    Duration::try_from_secs_f64(retry_after).unwrap_or_else(|_e| Duration::from_secs(1))
}

impl Client {
    pub fn new<S: Into<String>>(bot_token: S) -> Self {
        Self::with_config(ClientConfig::new(bot_token))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Builds a client from `DISCORD_*` environment variables, see [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    /// Uses `rate_limiter` in place of this client's own, eg. to share one between clients
    /// authenticated as the same bot.
    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn get_gateway(&self) -> Result<GatewayInfo, Error> {
        self.request_json(Route::GetGateway, Query::new(), None).await
    }

    pub async fn get_gateway_bot(&self) -> Result<GatewayBotInfo, Error> {
        self.request_json(Route::GetGatewayBot, Query::new(), None).await
    }

    pub(crate) fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<Option<Vec<u8>>, Error> {
        Ok(Some(serde_json::to_vec(body)?))
    }

    pub(crate) async fn request_json<T>(&self, route: Route, query: Query, body: Option<Vec<u8>>) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let res = self.execute_request(&route, &query, body).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn request_empty(&self, route: Route, query: Query, body: Option<Vec<u8>>) -> Result<(), Error> {
        self.execute_request(&route, &query, body).await?;
        Ok(())
    }

    /// Sends one request, holding its ratelimit bucket for the duration, and retries it on 429 or
    /// 502 responses up to the configured number of times.
    async fn execute_request(
        &self,
        route: &Route,
        query: &[(&'static str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, Error> {
        let method = route.method();
        let bucket_key = route.bucket_key();
        let url = format!("{}{}{}", self.config.api_base, route.path(), query_string(query));
        let max_retries = self.config.max_retries;
        let mut retries = 0;

        loop {
            let guard = self.rate_limiter.acquire(&bucket_key).await;

            let mut req_builder = self
                .http_client
                .request(method.clone(), &url)
                .header(AUTHORIZATION, format!("Bot {}", self.config.bot_token))
                .header(USER_AGENT, self.config.user_agent.as_str());
            if let Some(body) = body.as_ref() {
                req_builder = req_builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            trace!("request: {} (attempt {})", bucket_key, retries + 1);

            let res = match req_builder.send().await {
                Ok(res) => res,
                Err(e) => {
                    //no response, so nothing to learn about the bucket
                    guard.release(None)?;
                    return Err(e.into());
                }
            };

            guard.release(Some(res.headers()))?;

            match res.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    let bytes = res.bytes().await?;
                    let rate_limited: TooManyRequests = serde_json::from_slice(&bytes)?;
                    warn!(
                        "Rate limited on {} (global: {}), retry after {}s",
                        bucket_key, rate_limited.global, rate_limited.retry_after
                    );
                    let delay = retry_delay(rate_limited.retry_after);
                    if rate_limited.global {
                        //every other bucket has to stop too, not just this request
                        self.rate_limiter.block_globally(delay);
                    }
                    if !self.config.retry_on_rate_limit || retries >= max_retries {
                        return Err(Error::RateLimited(rate_limited));
                    }
                    retries += 1;
                    if !rate_limited.global {
                        //global waits are served by the next acquire
                        tokio::time::sleep(delay).await;
                    }
                }
                StatusCode::BAD_GATEWAY => {
                    if retries >= max_retries {
                        return Err(Error::TooManyRetries(max_retries, bucket_key));
                    }
                    warn!("Bad gateway on {}, retrying", bucket_key);
                    retries += 1;
                }
                status if !status.is_success() => {
                    let api_error = res
                        .bytes()
                        .await
                        .ok()
                        .and_then(|bytes| serde_json::from_slice::<ApiError>(&bytes).ok());
                    debug!("{} failed with {}: {:?}", bucket_key, status, api_error);
                    return Err(Error::UnsuccessfulHttp(status, api_error));
                }
                _ => return Ok(res),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn builds_query_strings() {
        assert_eq!(query_string(&[]), "");
        let query = vec![("limit", "50".to_owned()), ("after", "1 2".to_owned())];
        assert_eq!(query_string(&query), "?limit=50&after=1+2");
    }

    #[test]
    fn retry_delay_handles_odd_values() {
        assert_eq!(retry_delay(-1.0), Duration::from_secs(0));
        assert_eq!(retry_delay(0.25), Duration::from_millis(250));
        assert_eq!(retry_delay(f64::INFINITY), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn clients_can_share_a_rate_limiter() {
        let limiter = RateLimiter::new();
        let a = Client::new("a").with_rate_limiter(limiter.clone());
        let b = Client::new("b").with_rate_limiter(limiter);
        let separate = Client::new("c");

        let key = Route::GetCurrentUser.bucket_key();
        a.rate_limiter().acquire(&key).await.release(None).unwrap();
        assert_eq!(b.rate_limiter().bucket_count(), 1);
        assert_eq!(separate.rate_limiter().bucket_count(), 0);
    }

    struct Scripted {
        status: u16,
        headers: Vec<(&'static str, &'static str)>,
        body: &'static str,
    }

    fn reply(status: u16, headers: &[(&'static str, &'static str)], body: &'static str) -> Scripted {
        Scripted {
            status,
            headers: headers.to_vec(),
            body,
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Received {
        method: String,
        path: String,
        authorization: Option<String>,
    }

    /// A stand in for the api that answers with scripted responses in order.
    #[derive(Clone, Default)]
    struct MockApi {
        script: Arc<Mutex<VecDeque<Scripted>>>,
        received: Arc<Mutex<Vec<Received>>>,
    }

    impl MockApi {
        fn new(script: Vec<Scripted>) -> Self {
            MockApi {
                script: Arc::new(Mutex::new(script.into())),
                received: Arc::default(),
            }
        }

        fn received(&self) -> Vec<Received> {
            self.received.lock().unwrap().clone()
        }

        async fn serve(&self) -> ClientConfig {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let app = axum::Router::new().fallback(respond).with_state(self.clone());
            tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

            let mut config = ClientConfig::new("test-token");
            config.api_base = format!("http://{}/api", addr);
            config
        }
    }

    async fn respond(
        axum::extract::State(api): axum::extract::State<MockApi>,
        req: axum::extract::Request,
    ) -> axum::response::Response {
        api.received.lock().unwrap().push(Received {
            method: req.method().to_string(),
            path: req.uri().path().to_owned(),
            authorization: req
                .headers()
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        });
        let scripted = api
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| reply(500, &[], "script ran out"));
        let mut builder = axum::http::Response::builder().status(scripted.status);
        for (name, value) in scripted.headers {
            builder = builder.header(name, value);
        }
        builder.body(axum::body::Body::from(scripted.body)).unwrap()
    }

    const GATEWAY: &str = r#"{"url": "wss://gateway.discord.gg"}"#;
    const RATE_LIMITED: &str = r#"{"message": "You are being rate limited.", "retry_after": 0.05, "global": false}"#;

    #[tokio::test]
    async fn sends_the_request_and_updates_the_bucket() {
        let api = MockApi::new(vec![reply(
            200,
            &[(REMAINING, "0"), (RESET_AFTER, "30")],
            GATEWAY,
        )]);
        let client = Client::with_config(api.serve().await);

        let gateway = client.get_gateway().await.unwrap();
        assert_eq!(gateway.url, "wss://gateway.discord.gg");
        assert_eq!(
            api.received(),
            vec![Received {
                method: "GET".to_owned(),
                path: "/api/gateway".to_owned(),
                authorization: Some("Bot test-token".to_owned()),
            }]
        );

        let snapshot = client.rate_limiter().bucket_snapshot("GET /gateway").await.unwrap();
        assert_eq!(snapshot.remaining, 0);
        assert!(snapshot.reset_in.unwrap() > Duration::from_secs(25));
    }

    #[tokio::test]
    async fn response_headers_reach_a_shared_limiter() {
        let api = MockApi::new(vec![reply(200, &[(REMAINING, "0"), (RESET_AFTER, "30")], GATEWAY)]);
        let config = api.serve().await;
        let limiter = RateLimiter::new();
        let first = Client::with_config(config.clone()).with_rate_limiter(limiter.clone());
        let second = Client::with_config(config).with_rate_limiter(limiter);

        first.get_gateway().await.unwrap();
        let blocked = tokio::time::timeout(
            Duration::from_millis(50),
            second.rate_limiter().acquire("GET /gateway"),
        )
        .await;
        assert!(blocked.is_err());
    }

    #[tokio::test]
    async fn empty_responses_are_accepted() {
        let api = MockApi::new(vec![reply(204, &[], "")]);
        let client = Client::with_config(api.serve().await);
        client
            .delete_message(ChannelId::from(1), MessageId::from(2))
            .await
            .unwrap();
        assert_eq!(api.received()[0].method, "DELETE");
        assert_eq!(api.received()[0].path, "/api/channels/1/messages/2");
    }

    #[tokio::test]
    async fn transport_errors_unlock_the_bucket() {
        //bind then drop a listener to get a port nothing listens on
        let addr = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap()
            .local_addr()
            .unwrap();
        let mut config = ClientConfig::new("test-token");
        config.api_base = format!("http://{}/api", addr);
        let client = Client::with_config(config);

        let result = client.get_gateway().await;
        assert!(matches!(result, Err(Error::Http(_))));

        let guard = tokio::time::timeout(
            Duration::from_millis(50),
            client.rate_limiter().acquire("GET /gateway"),
        )
        .await
        .expect("bucket was left locked");
        assert_eq!(guard.remaining(), -1);
        guard.release(None).unwrap();
    }

    #[tokio::test]
    async fn malformed_ratelimit_headers_are_errors() {
        let api = MockApi::new(vec![reply(200, &[(REMAINING, "lots")], GATEWAY)]);
        let client = Client::with_config(api.serve().await);
        let result = client.get_gateway().await;
        assert!(matches!(
            result,
            Err(Error::RateLimitHeader(HeaderError::InvalidInteger { .. }))
        ));
    }

    #[tokio::test]
    async fn rate_limited_requests_are_retried_after_the_delay() {
        let api = MockApi::new(vec![reply(429, &[], RATE_LIMITED), reply(200, &[], GATEWAY)]);
        let client = Client::with_config(api.serve().await);

        let start = Instant::now();
        client.get_gateway().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(api.received().len(), 2);
    }

    #[tokio::test]
    async fn rate_limits_are_returned_when_retrying_is_off() {
        let api = MockApi::new(vec![reply(429, &[], RATE_LIMITED)]);
        let mut config = api.serve().await;
        config.retry_on_rate_limit = false;
        let client = Client::with_config(config);

        match client.get_gateway().await {
            Err(Error::RateLimited(body)) => {
                assert_eq!(body.retry_after, 0.05);
                assert!(!body.global);
            }
            other => panic!("expected a ratelimit error, got {:?}", other),
        }
        assert_eq!(api.received().len(), 1);
    }

    #[tokio::test]
    async fn rate_limits_are_returned_once_retries_run_out() {
        let api = MockApi::new(vec![reply(429, &[], RATE_LIMITED), reply(429, &[], RATE_LIMITED)]);
        let mut config = api.serve().await;
        config.max_retries = 1;
        let client = Client::with_config(config);

        assert!(matches!(client.get_gateway().await, Err(Error::RateLimited(_))));
        assert_eq!(api.received().len(), 2);
    }

    #[tokio::test]
    async fn global_rate_limit_body_blocks_every_bucket() {
        let api = MockApi::new(vec![reply(
            429,
            &[],
            r#"{"message": "You are being rate limited.", "retry_after": 5, "global": true}"#,
        )]);
        let mut config = api.serve().await;
        config.retry_on_rate_limit = false;
        let client = Client::with_config(config);

        assert!(matches!(client.get_gateway().await, Err(Error::RateLimited(_))));
        assert!(client.rate_limiter().global_reset_in().unwrap() > Duration::from_secs(4));
        let other_bucket = tokio::time::timeout(
            Duration::from_millis(50),
            client.rate_limiter().acquire("GET /users/@me"),
        )
        .await;
        assert!(other_bucket.is_err());
    }

    #[tokio::test]
    async fn bad_gateway_is_retried() {
        let api = MockApi::new(vec![reply(502, &[], ""), reply(200, &[], GATEWAY)]);
        let client = Client::with_config(api.serve().await);
        client.get_gateway().await.unwrap();
        assert_eq!(api.received().len(), 2);
    }

    #[tokio::test]
    async fn bad_gateway_gives_up_after_max_retries() {
        let api = MockApi::new(vec![reply(502, &[], ""), reply(502, &[], ""), reply(502, &[], "")]);
        let mut config = api.serve().await;
        config.max_retries = 2;
        let client = Client::with_config(config);

        match client.get_gateway().await {
            Err(Error::TooManyRetries(retries, key)) => {
                assert_eq!(retries, 2);
                assert_eq!(key, "GET /gateway");
            }
            other => panic!("expected TooManyRetries, got {:?}", other),
        }
        assert_eq!(api.received().len(), 3);
    }

    #[tokio::test]
    async fn api_errors_are_parsed() {
        let api = MockApi::new(vec![reply(404, &[], r#"{"code": 10003, "message": "Unknown Channel"}"#)]);
        let client = Client::with_config(api.serve().await);

        match client.get_channel(ChannelId::from(7)).await {
            Err(Error::UnsuccessfulHttp(status, Some(error))) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(error.code, 10003);
                assert_eq!(error.message, "Unknown Channel");
            }
            other => panic!("expected an api error, got {:?}", other),
        }
    }
}
