//! Per route ratelimiting.
//!
//! Every request belongs to a bucket, identified by its route key. A request first
//! [`acquire`](RateLimiter::acquire)s its bucket, which waits out the bucket's reset (and any
//! global ratelimit) if the bucket is exhausted, then [`release`](BucketGuard::release)s it
//! with the response headers so the next request in that bucket knows what it is allowed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use tracing::*;

mod bucket;
mod headers;

use bucket::{BucketState, GlobalThrottle};
pub use bucket::BucketGuard;
pub use headers::{HeaderError, ReleaseOutcome, GLOBAL, REMAINING, RESET, RESET_AFTER, RESET_MARGIN};

/// A client enforced limit for buckets whose key ends with `suffix`, used in place of the
/// response headers for endpoints where the headers don't tell the whole story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRateLimit {
    pub suffix: String,
    pub requests: u32,
    pub window: Duration,
}

impl CustomRateLimit {
    pub fn new<S: Into<String>>(suffix: S, requests: u32, window: Duration) -> Self {
        CustomRateLimit {
            suffix: suffix.into(),
            requests,
            window,
        }
    }

    /// Reactions advertise a generous bucket but start failing if sent faster than this.
    pub fn reactions() -> Self {
        Self::new("/reactions/", 1, Duration::from_millis(200))
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::reactions()]
    }

    fn matches(&self, key: &str) -> bool {
        key.ends_with(&self.suffix)
    }
}

/// A point in time view of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSnapshot {
    pub remaining: i64,
    /// `None` if the bucket has no reset pending.
    pub reset_in: Option<Duration>,
    pub custom_rule: Option<CustomRateLimit>,
}

type SharedBucket = Arc<tokio::sync::Mutex<BucketState>>;

#[derive(Debug)]
struct Inner {
    buckets: Mutex<HashMap<String, SharedBucket>>,
    global: Arc<GlobalThrottle>,
    custom_limits: Vec<CustomRateLimit>,
}

/// Registry of buckets plus the global throttle. Cloning shares the same state.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    inner: Arc<Inner>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_custom_limits(CustomRateLimit::defaults())
    }

    pub fn with_custom_limits(custom_limits: Vec<CustomRateLimit>) -> Self {
        RateLimiter {
            inner: Arc::new(Inner {
                buckets: Mutex::new(HashMap::new()),
                global: Arc::new(GlobalThrottle::new()),
                custom_limits,
            }),
        }
    }

    fn bucket(&self, key: &str) -> SharedBucket {
        //the map is only ever locked for a lookup or insert, never across an await
        let mut buckets = self
            .inner
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(bucket) = buckets.get(key) {
            return bucket.clone();
        }
        let custom_rule = self
            .inner
            .custom_limits
            .iter()
            .find(|rule| rule.matches(key))
            .cloned();
        debug!("Creating ratelimit bucket {} (custom rule: {:?})", key, custom_rule);
        let bucket = Arc::new(tokio::sync::Mutex::new(BucketState::new(key.to_owned(), custom_rule)));
        buckets.insert(key.to_owned(), bucket.clone());
        bucket
    }

    /// Waits until a request may be sent in the bucket for `key`, then claims one request from it.
    ///
    /// Callers for the same key queue up behind each other until the returned guard is released.
    /// The wait is cancel safe: dropping this future (eg. from a `tokio::time::timeout`) gives up
    /// the place in the queue without touching the bucket.
    pub async fn acquire(&self, key: &str) -> BucketGuard {
        let bucket = self.bucket(key);
        let mut state = bucket.lock_owned().await;

        //a global limit can be set or extended by another bucket while we sleep, so keep
        //checking both until neither asks for a wait
        loop {
            if let Some(wait) = state.wait_time(Instant::now()) {
                trace!("Bucket {} exhausted, waiting {:?}", key, wait);
                tokio::time::sleep(wait).await;
                continue;
            }
            if let Some(wait) = self.inner.global.wait_time(Instant::now()) {
                trace!("Globally ratelimited, {} waiting {:?}", key, wait);
                tokio::time::sleep(wait).await;
                continue;
            }
            break;
        }

        state.remaining -= 1;
        BucketGuard {
            state,
            global: self.inner.global.clone(),
        }
    }

    /// The current state of a bucket, or `None` if nothing has used it yet.
    ///
    /// Waits for any in flight request on that bucket to be released first.
    pub async fn bucket_snapshot(&self, key: &str) -> Option<BucketSnapshot> {
        let bucket = self
            .inner
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()?;
        let state = bucket.lock().await;
        Some(BucketSnapshot {
            remaining: state.remaining,
            reset_in: state.reset_in(Instant::now()),
            custom_rule: state.custom_rule.clone(),
        })
    }

    /// Blocks every bucket for `duration`, eg. after a 429 whose body reports a global limit.
    ///
    /// Never shortens a global block that is already in effect.
    pub fn block_globally(&self, duration: Duration) {
        warn!("Pausing all requests for {:?}", duration);
        self.inner.global.block_for(Instant::now(), duration);
    }

    /// Time left on the global ratelimit, if one is in effect.
    pub fn global_reset_in(&self) -> Option<Duration> {
        self.inner.global.wait_time(Instant::now())
    }

    pub fn bucket_count(&self) -> usize {
        self.inner
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderMap, HeaderValue};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MESSAGES: &str = "POST /channels/41771983423143937/messages";
    const REACTIONS: &str = "PUT /channels/41771983423143937/messages/{}/reactions/";

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    async fn prime(limiter: &RateLimiter, key: &str, pairs: &[(&'static str, &str)]) {
        limiter.acquire(key).await.release(Some(&headers(pairs))).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_bucket_does_not_wait() {
        let limiter = RateLimiter::new();
        let start = Instant::now();
        let guard = limiter.acquire(MESSAGES).await;
        assert_eq!(start.elapsed(), Duration::from_secs(0));
        assert_eq!(guard.remaining(), 0);
        assert_eq!(guard.key(), MESSAGES);

        let outcome = guard
            .release(Some(&headers(&[(REMAINING, "5"), (RESET_AFTER, "2.5")])))
            .unwrap();
        assert_eq!(
            outcome,
            ReleaseOutcome::BucketReset {
                resume_after: Duration::from_millis(2500),
                remaining: Some(5),
            }
        );
        let snapshot = limiter.bucket_snapshot(MESSAGES).await.unwrap();
        assert_eq!(snapshot.remaining, 5);
        assert_eq!(snapshot.reset_in, Some(Duration::from_millis(2500)));
        assert_eq!(snapshot.custom_rule, None);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_bucket_waits_for_reset() {
        let limiter = RateLimiter::new();
        prime(&limiter, MESSAGES, &[(REMAINING, "0"), (RESET_AFTER, "3")]).await;

        let start = Instant::now();
        let guard = limiter.acquire(MESSAGES).await;
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(guard.remaining(), -1);
        guard.release(None).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn bucket_with_requests_left_does_not_wait_for_reset() {
        let limiter = RateLimiter::new();
        prime(&limiter, MESSAGES, &[(REMAINING, "2"), (RESET_AFTER, "30")]).await;

        let start = Instant::now();
        limiter.acquire(MESSAGES).await.release(None).unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(0));
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_decrements_by_one_per_acquire() {
        let limiter = RateLimiter::new();
        prime(&limiter, MESSAGES, &[(REMAINING, "3"), (RESET_AFTER, "5")]).await;

        for expected in [2, 1, 0].iter() {
            let guard = limiter.acquire(MESSAGES).await;
            assert_eq!(guard.remaining(), *expected);
            guard.release(None).unwrap();
        }
        assert_eq!(limiter.bucket_snapshot(MESSAGES).await.unwrap().remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn global_reset_blocks_every_bucket() {
        let limiter = RateLimiter::new();
        let other = "GET /guilds/81384788765712384/channels";
        prime(&limiter, other, &[(REMAINING, "5"), (RESET_AFTER, "1")]).await;

        let outcome = limiter
            .acquire(MESSAGES)
            .await
            .release(Some(&headers(&[(GLOBAL, "true"), (RESET_AFTER, "10")])))
            .unwrap();
        assert!(matches!(outcome, ReleaseOutcome::GlobalReset { .. }));
        assert_eq!(limiter.global_reset_in(), Some(Duration::from_secs(10)));
        //the global reset doesn't belong to the bucket that reported it
        assert_eq!(limiter.bucket_snapshot(MESSAGES).await.unwrap().reset_in, None);

        let start = Instant::now();
        let guard = limiter.acquire(other).await;
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert_eq!(guard.remaining(), 4);
        guard.release(None).unwrap();
        assert_eq!(limiter.global_reset_in(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn global_reset_is_not_shortened_by_older_responses() {
        let limiter = RateLimiter::new();
        let first = limiter.acquire(MESSAGES).await;
        let second = limiter.acquire("GET /users/@me").await;
        first
            .release(Some(&headers(&[(GLOBAL, "true"), (RESET_AFTER, "10")])))
            .unwrap();
        second
            .release(Some(&headers(&[(GLOBAL, "true"), (RESET_AFTER, "1")])))
            .unwrap();
        assert_eq!(limiter.global_reset_in(), Some(Duration::from_secs(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn global_reset_set_during_a_global_wait_is_honoured() {
        let limiter = RateLimiter::new();
        let held = limiter.acquire("GET /channels/1").await;
        prime(&limiter, MESSAGES, &[(GLOBAL, "true"), (RESET_AFTER, "1")]).await;

        let start = Instant::now();
        let waiter = {
            let limiter = limiter.clone();
            tokio::spawn(async move {
                limiter.acquire("GET /users/@me").await.release(None).unwrap();
                Instant::now()
            })
        };

        tokio::time::sleep(Duration::from_millis(500)).await;
        held.release(Some(&headers(&[(GLOBAL, "true"), (RESET_AFTER, "10")])))
            .unwrap();

        let done = waiter.await.unwrap();
        assert!(done - start >= Duration::from_millis(10_500));
        assert_eq!(limiter.global_reset_in(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn block_globally_never_shortens_a_block() {
        let limiter = RateLimiter::new();
        limiter.block_globally(Duration::from_secs(5));
        limiter.block_globally(Duration::from_secs(2));
        assert_eq!(limiter.global_reset_in(), Some(Duration::from_secs(5)));

        let start = Instant::now();
        limiter.acquire(MESSAGES).await.release(None).unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_after_wins_over_absolute_reset() {
        let limiter = RateLimiter::new();
        prime(
            &limiter,
            MESSAGES,
            &[
                (REMAINING, "0"),
                (RESET_AFTER, "1"),
                (RESET, "1470173083"),
                ("date", "Tue, 02 Aug 2016 21:23:00 GMT"),
            ],
        )
        .await;
        let snapshot = limiter.bucket_snapshot(MESSAGES).await.unwrap();
        assert_eq!(snapshot.reset_in, Some(Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn absolute_reset_is_corrected_for_clock_skew() {
        let limiter = RateLimiter::new();
        //the server's clock is years away from ours, only the difference between the two headers matters
        prime(
            &limiter,
            MESSAGES,
            &[
                (REMAINING, "0"),
                (RESET, "1470172982"),
                ("date", "Tue, 02 Aug 2016 21:23:00 GMT"),
            ],
        )
        .await;
        let snapshot = limiter.bucket_snapshot(MESSAGES).await.unwrap();
        assert_eq!(snapshot.reset_in, Some(Duration::from_secs(2) + RESET_MARGIN));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_headers_are_reported() {
        let limiter = RateLimiter::new();
        let result = limiter
            .acquire(MESSAGES)
            .await
            .release(Some(&headers(&[(REMAINING, "lots")])));
        assert!(matches!(result, Err(HeaderError::InvalidInteger { .. })));
        //the bucket was still unlocked
        let guard = tokio::time::timeout(Duration::from_millis(1), limiter.acquire(MESSAGES)).await;
        assert!(guard.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_headers_leave_the_bucket_alone() {
        let limiter = RateLimiter::new();
        prime(&limiter, MESSAGES, &[(REMAINING, "4"), (RESET_AFTER, "6")]).await;
        let outcome = limiter.acquire(MESSAGES).await.release(None).unwrap();
        assert_eq!(outcome, ReleaseOutcome::NoUpdate);
        let snapshot = limiter.bucket_snapshot(MESSAGES).await.unwrap();
        assert_eq!(snapshot.remaining, 3);
        assert_eq!(snapshot.reset_in, Some(Duration::from_secs(6)));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_rule_ignores_response_headers() {
        let limiter = RateLimiter::new();
        let guard = limiter.acquire(REACTIONS).await;
        assert!(guard.has_custom_rule());
        let outcome = guard
            .release(Some(&headers(&[(REMAINING, "10"), (RESET_AFTER, "0")])))
            .unwrap();
        assert_eq!(outcome, ReleaseOutcome::CustomRule);

        let snapshot = limiter.bucket_snapshot(REACTIONS).await.unwrap();
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.reset_in, Some(Duration::from_millis(200)));
        assert_eq!(snapshot.custom_rule, Some(CustomRateLimit::reactions()));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_rule_spaces_out_requests() {
        let limiter = RateLimiter::with_custom_limits(vec![CustomRateLimit::new(
            "/reactions/",
            1,
            Duration::from_millis(200),
        )]);

        let start = Instant::now();
        limiter.acquire(REACTIONS).await.release(None).unwrap();
        assert_eq!(start.elapsed(), Duration::from_secs(0));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = Instant::now();
        limiter.acquire(REACTIONS).await.release(None).unwrap();
        assert!(second.elapsed() >= Duration::from_millis(150));
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_rule_only_matches_suffix() {
        let limiter = RateLimiter::new();
        limiter.acquire(MESSAGES).await.release(None).unwrap();
        limiter.acquire(REACTIONS).await.release(None).unwrap();
        assert_eq!(limiter.bucket_snapshot(MESSAGES).await.unwrap().custom_rule, None);
        assert!(limiter.bucket_snapshot(REACTIONS).await.unwrap().custom_rule.is_some());
        assert_eq!(limiter.bucket_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn same_bucket_requests_never_overlap() {
        let limiter = RateLimiter::new();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));

        let tasks = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                let in_flight = in_flight.clone();
                let max_in_flight = max_in_flight.clone();
                tokio::spawn(async move {
                    let guard = limiter.acquire(MESSAGES).await;
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_in_flight.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    guard.release(None).unwrap();
                })
            })
            .collect::<Vec<_>>();
        for result in futures::future::join_all(tasks).await {
            result.unwrap();
        }
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(limiter.bucket_snapshot(MESSAGES).await.unwrap().remaining, -7);
    }

    #[tokio::test(start_paused = true)]
    async fn different_buckets_do_not_block_each_other() {
        let limiter = RateLimiter::new();
        let held = limiter.acquire(MESSAGES).await;

        let other = tokio::time::timeout(
            Duration::from_millis(1),
            limiter.acquire("GET /channels/41771983423143937"),
        )
        .await
        .expect("unrelated bucket was blocked");
        other.release(None).unwrap();

        let start = Instant::now();
        let guards = futures::future::join_all(
            (0..10).map(|i| {
                let limiter = limiter.clone();
                async move { limiter.acquire(&format!("GET /guilds/{}", i)).await }
            }),
        )
        .await;
        assert_eq!(start.elapsed(), Duration::from_secs(0));
        assert_eq!(guards.len(), 10);
        held.release(None).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_acquire_does_not_consume() {
        let limiter = RateLimiter::new();
        prime(&limiter, MESSAGES, &[(REMAINING, "0"), (RESET_AFTER, "5")]).await;

        let timed_out = tokio::time::timeout(Duration::from_secs(1), limiter.acquire(MESSAGES)).await;
        assert!(timed_out.is_err());
        let snapshot = limiter.bucket_snapshot(MESSAGES).await.unwrap();
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.reset_in, Some(Duration::from_secs(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_buckets() {
        let limiter = RateLimiter::new();
        let clone = limiter.clone();
        prime(&clone, MESSAGES, &[(REMAINING, "9")]).await;
        assert_eq!(limiter.bucket_snapshot(MESSAGES).await.unwrap().remaining, 9);
        assert!(RateLimiter::new().bucket_snapshot(MESSAGES).await.is_none());
    }
}
