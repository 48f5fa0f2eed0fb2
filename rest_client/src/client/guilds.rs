use super::{Client, Query, Route};
use crate::model::*;
use crate::Error;

impl Client {
    pub async fn get_guild(&self, guild_id: GuildId) -> Result<Guild, Error> {
        self.request_json(Route::GetGuild { guild_id }, Query::new(), None).await
    }

    pub async fn get_guild_channels(&self, guild_id: GuildId) -> Result<Vec<Channel>, Error> {
        self.request_json(Route::GetGuildChannels { guild_id }, Query::new(), None).await
    }

    pub async fn create_guild_channel(&self, guild_id: GuildId, settings: &ChannelSettings) -> Result<Channel, Error> {
        self.request_json(
            Route::CreateGuildChannel { guild_id },
            Query::new(),
            Self::json_body(settings)?,
        )
        .await
    }

    pub async fn get_member(&self, guild_id: GuildId, user_id: UserId) -> Result<GuildMember, Error> {
        self.request_json(Route::GetMember { guild_id, user_id }, Query::new(), None).await
    }

    /// One page of members ordered by user id, starting after `after`.
    pub async fn list_members(
        &self,
        guild_id: GuildId,
        limit: Option<u32>,
        after: Option<UserId>,
    ) -> Result<Vec<GuildMember>, Error> {
        let mut query = Query::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }
        self.request_json(Route::ListMembers { guild_id }, query, None).await
    }

    pub async fn remove_member(&self, guild_id: GuildId, user_id: UserId) -> Result<(), Error> {
        self.request_empty(Route::RemoveMember { guild_id, user_id }, Query::new(), None)
            .await
    }

    pub async fn add_member_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> Result<(), Error> {
        self.request_empty(
            Route::AddMemberRole { guild_id, user_id, role_id },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn remove_member_role(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> Result<(), Error> {
        self.request_empty(
            Route::RemoveMemberRole { guild_id, user_id, role_id },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn get_roles(&self, guild_id: GuildId) -> Result<Vec<Role>, Error> {
        self.request_json(Route::GetRoles { guild_id }, Query::new(), None).await
    }

    pub async fn get_bans(&self, guild_id: GuildId) -> Result<Vec<Ban>, Error> {
        self.request_json(Route::GetBans { guild_id }, Query::new(), None).await
    }

    pub async fn create_ban(&self, guild_id: GuildId, user_id: UserId, ban: &CreateBan) -> Result<(), Error> {
        self.request_empty(
            Route::CreateBan { guild_id, user_id },
            Query::new(),
            Self::json_body(ban)?,
        )
        .await
    }

    pub async fn remove_ban(&self, guild_id: GuildId, user_id: UserId) -> Result<(), Error> {
        self.request_empty(Route::RemoveBan { guild_id, user_id }, Query::new(), None)
            .await
    }
}
