use super::{Client, Query, Route};
use crate::model::*;
use crate::Error;
use serde_json::json;

/// Paging for the current user's guild list.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuildPage {
    pub before: Option<GuildId>,
    pub after: Option<GuildId>,
    ///max number of guilds to return (1-200)
    pub limit: Option<u32>,
}

impl GuildPage {
    fn to_query(self) -> Query {
        let mut query = Query::new();
        if let Some(before) = self.before {
            query.push(("before", before.to_string()));
        }
        if let Some(after) = self.after {
            query.push(("after", after.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

impl Client {
    pub async fn get_current_user(&self) -> Result<User, Error> {
        self.request_json(Route::GetCurrentUser, Query::new(), None).await
    }

    pub async fn get_user(&self, user_id: UserId) -> Result<User, Error> {
        self.request_json(Route::GetUser { user_id }, Query::new(), None).await
    }

    pub async fn modify_current_user(&self, changes: &ModifyCurrentUser) -> Result<User, Error> {
        self.request_json(Route::ModifyCurrentUser, Query::new(), Self::json_body(changes)?)
            .await
    }

    pub async fn get_current_user_guilds(&self, page: GuildPage) -> Result<Vec<PartialGuild>, Error> {
        self.request_json(Route::GetCurrentUserGuilds, page.to_query(), None).await
    }

    pub async fn leave_guild(&self, guild_id: GuildId) -> Result<(), Error> {
        self.request_empty(Route::LeaveGuild { guild_id }, Query::new(), None).await
    }

    /// Opens (or returns the existing) direct message channel with a user.
    pub async fn create_dm(&self, recipient_id: UserId) -> Result<Channel, Error> {
        self.request_json(
            Route::CreateDm,
            Query::new(),
            Self::json_body(&json!({ "recipient_id": recipient_id }))?,
        )
        .await
    }
}
