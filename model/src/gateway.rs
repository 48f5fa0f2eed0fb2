use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GatewayInfo {
    ///the WSS URL that can be used for connecting to the gateway
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GatewayBotInfo {
    pub url: String,
    ///the recommended number of shards to use when connecting
    pub shards: u64,
    ///information on the current session start limit
    pub session_start_limit: SessionStartLimit,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionStartLimit {
    ///the total number of session starts the current user is allowed
    pub total: u64,
    ///the remaining number of session starts the current user is allowed
    pub remaining: u64,
    ///the number of milliseconds after which the limit resets
    pub reset_after: u64,
    ///the number of identify requests allowed per 5 seconds
    pub max_concurrency: u64,
}
