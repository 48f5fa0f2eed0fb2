use super::{Client, Query, Route};
use crate::model::*;
use crate::{EditMessage, Error, ExecuteWebhook};

impl Client {
    pub async fn get_global_commands(&self, application_id: ApplicationId) -> Result<Vec<ApplicationCommand>, Error> {
        self.request_json(Route::GetGlobalCommands { application_id }, Query::new(), None)
            .await
    }

    /// Creating a command with an existing name overwrites it.
    pub async fn create_global_command(
        &self,
        application_id: ApplicationId,
        command: &NewApplicationCommand,
    ) -> Result<ApplicationCommand, Error> {
        self.request_json(
            Route::CreateGlobalCommand { application_id },
            Query::new(),
            Self::json_body(command)?,
        )
        .await
    }

    /// Replaces every global command, commands missing from `commands` are deleted.
    pub async fn bulk_overwrite_global_commands(
        &self,
        application_id: ApplicationId,
        commands: &[NewApplicationCommand],
    ) -> Result<Vec<ApplicationCommand>, Error> {
        self.request_json(
            Route::BulkOverwriteGlobalCommands { application_id },
            Query::new(),
            Self::json_body(&commands)?,
        )
        .await
    }

    pub async fn delete_global_command(&self, application_id: ApplicationId, command_id: CommandId) -> Result<(), Error> {
        self.request_empty(
            Route::DeleteGlobalCommand { application_id, command_id },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn get_guild_commands(
        &self,
        application_id: ApplicationId,
        guild_id: GuildId,
    ) -> Result<Vec<ApplicationCommand>, Error> {
        self.request_json(
            Route::GetGuildCommands { application_id, guild_id },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn create_guild_command(
        &self,
        application_id: ApplicationId,
        guild_id: GuildId,
        command: &NewApplicationCommand,
    ) -> Result<ApplicationCommand, Error> {
        self.request_json(
            Route::CreateGuildCommand { application_id, guild_id },
            Query::new(),
            Self::json_body(command)?,
        )
        .await
    }

    pub async fn delete_guild_command(
        &self,
        application_id: ApplicationId,
        guild_id: GuildId,
        command_id: CommandId,
    ) -> Result<(), Error> {
        self.request_empty(
            Route::DeleteGuildCommand {
                application_id,
                guild_id,
                command_id,
            },
            Query::new(),
            None,
        )
        .await
    }

    /// Responds to an interaction, must happen within 3 seconds of receiving it.
    pub async fn create_interaction_response(
        &self,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> Result<(), Error> {
        self.request_empty(
            Route::CreateInteractionResponse {
                interaction_id: interaction.id,
                token: interaction.token.clone(),
            },
            Query::new(),
            Self::json_body(response)?,
        )
        .await
    }

    pub async fn get_original_response(&self, interaction: &Interaction) -> Result<Message, Error> {
        self.request_json(
            Route::GetOriginalResponse {
                application_id: interaction.application_id,
                token: interaction.token.clone(),
            },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn edit_original_response(&self, interaction: &Interaction, edit: &EditMessage) -> Result<Message, Error> {
        edit.enforce_embed_limits()?;
        self.request_json(
            Route::EditOriginalResponse {
                application_id: interaction.application_id,
                token: interaction.token.clone(),
            },
            Query::new(),
            Self::json_body(edit)?,
        )
        .await
    }

    pub async fn delete_original_response(&self, interaction: &Interaction) -> Result<(), Error> {
        self.request_empty(
            Route::DeleteOriginalResponse {
                application_id: interaction.application_id,
                token: interaction.token.clone(),
            },
            Query::new(),
            None,
        )
        .await
    }

    pub async fn create_followup_message(
        &self,
        interaction: &Interaction,
        message: &ExecuteWebhook,
    ) -> Result<Message, Error> {
        message.enforce_embed_limits()?;
        self.request_json(
            Route::CreateFollowupMessage {
                application_id: interaction.application_id,
                token: interaction.token.clone(),
            },
            Query::new(),
            Self::json_body(message)?,
        )
        .await
    }
}
