//! Data structures mirroring the json objects of the Discord http api.
//!
//! Everything here is plain serde data, the http side lives in `discord_rest`.

#[macro_use]
mod enum_number;
mod custom_serialization;

mod application;
mod channel;
mod embed;
mod error;
mod gateway;
mod guild;
mod ids;
mod interaction;
mod message;
mod permissions;
mod user;
mod webhook;

pub use application::*;
pub use channel::*;
pub use embed::*;
pub use error::*;
pub use gateway::*;
pub use guild::*;
pub use ids::*;
pub use interaction::*;
pub use message::*;
pub use permissions::*;
pub use user::*;
pub use webhook::*;
