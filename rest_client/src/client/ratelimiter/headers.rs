use chrono::DateTime;
use http::header::{HeaderMap, HeaderName, DATE};
use std::num::{ParseFloatError, ParseIntError};
use std::time::Duration;
use thiserror::Error;

use super::CustomRateLimit;

pub const REMAINING: &str = "x-ratelimit-remaining";
pub const RESET: &str = "x-ratelimit-reset";
pub const RESET_AFTER: &str = "x-ratelimit-reset-after";
pub const GLOBAL: &str = "x-ratelimit-global";

/// Added to resets computed from the absolute `X-RateLimit-Reset` timestamp to absorb latency
/// between the server stamping the response and us reading it.
pub const RESET_MARGIN: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("Header {0} contained non visible-ascii characters")]
    NotAscii(HeaderName),
    #[error("Header {header} should have been an integer but was {value:?}")]
    InvalidInteger {
        header: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Header {header} should have been a number but was {value:?}")]
    InvalidNumber {
        header: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("Header {header} was not a usable number of seconds: {value:?}")]
    OutOfRange { header: &'static str, value: String },
    #[error("Date header {value:?} could not be parsed")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Got an absolute ratelimit reset without a Date header to measure it against")]
    MissingDate,
}

/// What a single release does to the limiter, decided up front from the response.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// The bucket follows a client side rule, response headers were not consulted.
    CustomRule,
    /// Every bucket is blocked until `resume_after` from now.
    GlobalReset {
        resume_after: Duration,
        remaining: Option<i64>,
    },
    BucketReset {
        resume_after: Duration,
        remaining: Option<i64>,
    },
    /// Only the remaining count was sent.
    RemainingOnly(i64),
    /// No response, or a response without ratelimit headers.
    NoUpdate,
}

impl ReleaseOutcome {
    pub fn decide(
        custom_rule: Option<&CustomRateLimit>,
        headers: Option<&HeaderMap>,
    ) -> Result<Self, HeaderError> {
        if custom_rule.is_some() {
            return Ok(ReleaseOutcome::CustomRule);
        }
        let headers = match headers {
            Some(headers) => headers,
            None => return Ok(ReleaseOutcome::NoUpdate),
        };

        let remaining = match header_str(headers, REMAINING)? {
            Some(value) => Some(value.trim().parse::<i64>().map_err(|source| {
                HeaderError::InvalidInteger {
                    header: REMAINING,
                    value: value.to_owned(),
                    source,
                }
            })?),
            None => None,
        };

        let resume_after = match header_str(headers, RESET_AFTER)? {
            //reset-after is computed by the server, so it needs no clock correction
            Some(reset_after) => Some(seconds(RESET_AFTER, reset_after)?),
            None => match header_str(headers, RESET)? {
                Some(reset) => Some(absolute_reset_delay(headers, reset)?),
                None => None,
            },
        };

        Ok(match (resume_after, remaining) {
            (Some(resume_after), remaining) if is_global(headers)? => ReleaseOutcome::GlobalReset {
                resume_after,
                remaining,
            },
            (Some(resume_after), remaining) => ReleaseOutcome::BucketReset {
                resume_after,
                remaining,
            },
            (None, Some(remaining)) => ReleaseOutcome::RemainingOnly(remaining),
            (None, None) => ReleaseOutcome::NoUpdate,
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, HeaderError> {
    match headers.get(name) {
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_e| HeaderError::NotAscii(HeaderName::from_static(name))),
        None => Ok(None),
    }
}

fn is_global(headers: &HeaderMap) -> Result<bool, HeaderError> {
    Ok(match header_str(headers, GLOBAL)? {
        Some(value) => {
            let value = value.trim();
            !value.is_empty() && !value.eq_ignore_ascii_case("false")
        }
        None => false,
    })
}

fn parse_f64(header: &'static str, value: &str) -> Result<f64, HeaderError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| HeaderError::InvalidNumber {
            header,
            value: value.to_owned(),
            source,
        })
}

fn seconds(header: &'static str, value: &str) -> Result<Duration, HeaderError> {
    let secs = parse_f64(header, value)?;
    if secs <= 0.0 {
        return Ok(Duration::from_secs(0));
    }
    Duration::try_from_secs_f64(secs).map_err(|_e| HeaderError::OutOfRange {
        header,
        value: value.to_owned(),
    })
}

/// Turns an absolute unix reset time into a delay, measured against the server's own `Date`
/// header rather than our clock, which may be skewed.
fn absolute_reset_delay(headers: &HeaderMap, reset: &str) -> Result<Duration, HeaderError> {
    let reset_at = parse_f64(RESET, reset)?;
    let date = match headers.get(DATE) {
        Some(date) => date
            .to_str()
            .map_err(|_e| HeaderError::NotAscii(DATE))?,
        None => return Err(HeaderError::MissingDate),
    };
    let server_now = DateTime::parse_from_rfc2822(date.trim()).map_err(|source| HeaderError::InvalidDate {
        value: date.to_owned(),
        source,
    })?;
    let server_now = server_now.timestamp_millis() as f64 / 1000.0;
    let delta = reset_at - server_now + RESET_MARGIN.as_secs_f64();
    if !delta.is_finite() {
        return Err(HeaderError::OutOfRange {
            header: RESET,
            value: reset.to_owned(),
        });
    }
    if delta <= 0.0 {
        return Ok(Duration::from_secs(0));
    }
    Duration::try_from_secs_f64(delta).map_err(|_e| HeaderError::OutOfRange {
        header: RESET,
        value: reset.to_owned(),
    })
}
