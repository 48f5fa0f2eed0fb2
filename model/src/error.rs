use serde::{Deserialize, Serialize};
use std::fmt;

///the json body returned alongside most unsuccessful responses
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiError {
    ///the api's numeric error code, see the JSON error codes table in the api docs
    pub code: u64,
    pub message: String,
    ///per field validation errors, nested the same way as the request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

///the json body of a 429 response
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TooManyRequests {
    pub message: String,
    ///seconds to wait before another request can be made
    pub retry_after: f64,
    ///whether this is a global rate limit
    #[serde(default)]
    pub global: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_429_body() {
        let body: TooManyRequests = serde_json::from_str(
            r#"{"message": "You are being rate limited.", "retry_after": 64.57, "global": false}"#,
        )
        .unwrap();
        assert!((body.retry_after - 64.57).abs() < f64::EPSILON);
        assert!(!body.global);
    }

    #[test]
    fn api_error_display() {
        let err: ApiError =
            serde_json::from_str(r#"{"code": 50035, "message": "Invalid Form Body", "errors": {}}"#).unwrap();
        assert_eq!(err.to_string(), "Invalid Form Body (code 50035)");
    }
}
