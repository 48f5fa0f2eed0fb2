use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Application {
    ///the id of the app
    pub id: ApplicationId,
    ///the name of the app
    pub name: String,
    ///the icon hash of the app
    pub icon: Option<String>,
    ///the description of the app
    #[serde(default)]
    pub description: String,
    ///when false only app owner can join the app's bot to guilds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_public: Option<bool>,
    ///when true the app's bot will only join upon completion of the full oauth2 code grant flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_require_code_grant: Option<bool>,
    ///partial user object containing info on the owner of the application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<PartialUser>,
    ///the hex encoded key for verification in interactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_key: Option<String>,
    ///if this application is a game sold on Discord, this field will be the guild to which it has been linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    ///the application's public flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

enum_number!(ApplicationCommandType: u8 {
    ChatInput = 1,
    User = 2,
    Message = 3,
});

enum_number!(ApplicationCommandOptionType: u8 {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
});

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApplicationCommandOptionChoice {
    pub name: String,
    ///a string, integer or double depending on the option type
    pub value: serde_json::Value,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApplicationCommandOption {
    #[serde(rename = "type")]
    pub typ: ApplicationCommandOptionType,
    ///1-32 character name
    pub name: String,
    ///1-100 character description
    pub description: String,
    ///if the parameter is required or optional, default false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    ///choices for the user to pick from, max 25
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ApplicationCommandOptionChoice>,
    ///if the option is a subcommand or subcommand group type, these nested options will be the parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
}

impl ApplicationCommandOption {
    pub fn new<N: Into<String>, D: Into<String>>(
        typ: ApplicationCommandOptionType,
        name: N,
        description: D,
    ) -> Self {
        Self {
            typ,
            name: name.into(),
            description: description.into(),
            required: None,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApplicationCommand {
    pub id: CommandId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<ApplicationCommandType>,
    pub application_id: ApplicationId,
    ///guild id of the command, if not global
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
    ///set of permissions represented as a bit set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<Permissions>,
    ///autoincrementing version identifier updated during substantial record changes
    pub version: Snowflake,
}

///body of a create (or bulk overwrite) application command request
#[derive(Debug, Serialize, Clone)]
pub struct NewApplicationCommand {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub typ: Option<ApplicationCommandType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<Permissions>,
}

impl NewApplicationCommand {
    pub fn chat_input<N: Into<String>, D: Into<String>>(name: N, description: D) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            typ: Some(ApplicationCommandType::ChatInput),
            options: Vec::new(),
            default_member_permissions: None,
        }
    }

    pub fn option(mut self, option: ApplicationCommandOption) -> Self {
        self.options.push(option);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_command_serialization() {
        let cmd = NewApplicationCommand::chat_input("blep", "Send a random adorable animal photo").option(
            ApplicationCommandOption::new(ApplicationCommandOptionType::String, "animal", "The type of animal")
                .required(),
        );
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(value["type"], 1);
        assert_eq!(value["options"][0]["type"], 3);
        assert_eq!(value["options"][0]["required"], true);
        assert!(value["options"][0].get("choices").is_none());
    }
}
