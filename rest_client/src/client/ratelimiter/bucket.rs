use http::header::HeaderMap;
use std::convert::TryFrom;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OwnedMutexGuard;
use tokio::time::Instant;

use tracing::*;

use super::headers::{HeaderError, ReleaseOutcome};
use super::CustomRateLimit;

#[derive(Debug)]
pub(crate) struct BucketState {
    pub(crate) key: String,
    pub(crate) remaining: i64,
    pub(crate) reset_at: Option<Instant>,
    //only used by buckets with a custom rule
    pub(crate) last_reset: Option<Instant>,
    pub(crate) custom_rule: Option<CustomRateLimit>,
}

impl BucketState {
    pub(crate) fn new(key: String, custom_rule: Option<CustomRateLimit>) -> Self {
        BucketState {
            key,
            //assume we have at least one request until the api tells us otherwise
            remaining: 1,
            reset_at: None,
            last_reset: None,
            custom_rule,
        }
    }

    /// How long until this bucket permits another request, if it is exhausted.
    pub(crate) fn wait_time(&self, now: Instant) -> Option<Duration> {
        if self.remaining >= 1 {
            return None;
        }
        self.reset_at
            .and_then(|reset_at| reset_at.checked_duration_since(now))
            .filter(|wait| *wait > Duration::from_secs(0))
    }

    pub(crate) fn reset_in(&self, now: Instant) -> Option<Duration> {
        self.reset_at
            .and_then(|reset_at| reset_at.checked_duration_since(now))
            .filter(|wait| *wait > Duration::from_secs(0))
    }

    fn apply_custom_rule(&mut self, rule: &CustomRateLimit, now: Instant) {
        let window_passed = match self.last_reset {
            Some(last_reset) => now.duration_since(last_reset) >= rule.window,
            None => true,
        };
        if window_passed {
            self.remaining = i64::from(rule.requests) - 1;
            self.last_reset = Some(now);
        }
        if self.remaining < 1 {
            self.reset_at = Some(now + rule.window);
        }
    }

    pub(crate) fn apply(&mut self, outcome: &ReleaseOutcome, global: &GlobalThrottle, now: Instant) {
        match *outcome {
            ReleaseOutcome::CustomRule => {
                if let Some(rule) = self.custom_rule.clone() {
                    self.apply_custom_rule(&rule, now);
                }
            }
            ReleaseOutcome::GlobalReset {
                resume_after,
                remaining,
            } => {
                warn!("Global ratelimit hit on {}, pausing all requests for {:?}", self.key, resume_after);
                global.block_for(now, resume_after);
                if let Some(remaining) = remaining {
                    self.remaining = remaining;
                }
            }
            ReleaseOutcome::BucketReset {
                resume_after,
                remaining,
            } => {
                self.reset_at = Some(now + resume_after);
                if let Some(remaining) = remaining {
                    self.remaining = remaining;
                }
            }
            ReleaseOutcome::RemainingOnly(remaining) => {
                self.remaining = remaining;
            }
            ReleaseOutcome::NoUpdate => {}
        }
    }
}

/// The point in time every bucket waits for after the api reports a global ratelimit.
///
/// Stored as microseconds past a fixed epoch so it can be read without taking any lock.
#[derive(Debug)]
pub(crate) struct GlobalThrottle {
    epoch: Instant,
    blocked_until: AtomicU64,
}

impl GlobalThrottle {
    pub(crate) fn new() -> Self {
        GlobalThrottle {
            epoch: Instant::now(),
            blocked_until: AtomicU64::new(0),
        }
    }

    pub(crate) fn block_for(&self, now: Instant, duration: Duration) {
        let until = now.duration_since(self.epoch) + duration;
        //round up so we never resume early
        let micros = until.as_nanos().saturating_add(999) / 1000;
        let micros = u64::try_from(micros).unwrap_or(u64::MAX);
        //a late response carrying an older reset must not shorten a newer block
        self.blocked_until.fetch_max(micros, Ordering::SeqCst);
    }

    pub(crate) fn wait_time(&self, now: Instant) -> Option<Duration> {
        let micros = self.blocked_until.load(Ordering::SeqCst);
        if micros == 0 {
            return None;
        }
        let until = self.epoch + Duration::from_micros(micros);
        until
            .checked_duration_since(now)
            .filter(|wait| *wait > Duration::from_secs(0))
    }
}

/// Exclusive access to one bucket, obtained from [`RateLimiter::acquire`](super::RateLimiter::acquire).
///
/// Only one guard per bucket exists at a time, so requests in the same bucket never overlap.
/// Call [`release`](Self::release) with the response headers once the request finishes. Dropping
/// the guard instead unlocks the bucket without updating it, same as releasing with no headers.
#[derive(Debug)]
pub struct BucketGuard {
    pub(crate) state: OwnedMutexGuard<BucketState>,
    pub(crate) global: Arc<GlobalThrottle>,
}

impl BucketGuard {
    pub fn key(&self) -> &str {
        &self.state.key
    }

    /// Requests left in the current window, after counting the one this guard is for.
    pub fn remaining(&self) -> i64 {
        self.state.remaining
    }

    pub fn has_custom_rule(&self) -> bool {
        self.state.custom_rule.is_some()
    }

    /// Updates the bucket from a response and unlocks it.
    ///
    /// Pass `None` when the request failed before any response arrived. Errors mean the
    /// ratelimit headers could not be understood and the bucket may be working from stale
    /// limits; the bucket is unlocked either way.
    pub fn release(mut self, headers: Option<&HeaderMap>) -> Result<ReleaseOutcome, HeaderError> {
        let outcome = ReleaseOutcome::decide(self.state.custom_rule.as_ref(), headers)?;
        self.state.apply(&outcome, &self.global, Instant::now());
        debug!(
            "Released bucket {} ({:?}), {} remaining",
            self.state.key, outcome, self.state.remaining
        );
        Ok(outcome)
    }
}
