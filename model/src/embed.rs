use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EMBED_TOTAL_LIMIT: usize = 6000;
pub const EMBED_TITLE_LIMIT: usize = 256;
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
pub const EMBED_FIELD_COUNT_LIMIT: usize = 25;
pub const EMBED_FIELD_NAME_LIMIT: usize = 256;
pub const EMBED_FIELD_VALUE_LIMIT: usize = 1024;
pub const EMBED_FOOTER_TEXT_LIMIT: usize = 2048;
pub const EMBED_AUTHOR_NAME_LIMIT: usize = 256;

#[derive(Debug, Error)]
pub enum EmbedTooBigError {
    #[error("Embed {field} was {length} characters, the limit is {max}")]
    FieldTooBig {
        field: &'static str,
        length: usize,
        max: usize,
    },
    #[error("Embed had {0} fields, the limit is {}", EMBED_FIELD_COUNT_LIMIT)]
    TooManyFields(usize),
    #[error("Embed text totalled {0} characters, the limit is {}", EMBED_TOTAL_LIMIT)]
    WholeTooBig(usize),
}

fn char_len(s: &Option<String>) -> usize {
    s.as_ref().map(|s| s.chars().count()).unwrap_or(0)
}

fn check(field: &'static str, length: usize, max: usize) -> Result<(), EmbedTooBigError> {
    if length > max {
        return Err(EmbedTooBigError::FieldTooBig { field, length, max });
    }
    Ok(())
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Embed {
    ///title of embed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    ///type of embed (always "rich" for webhook embeds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub embed_type: Option<String>,
    ///description of embed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    ///url of embed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    ///timestamp of embed content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<FixedOffset>>,
    ///color code of the embed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<EmbedProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn set_color(&mut self, color: u32) -> &mut Self {
        self.color = Some(color);
        self
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_description<S: Into<String>>(&mut self, description: S) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn set_footer<S: Into<String>>(&mut self, text: S) -> &mut Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: None,
            proxy_icon_url: None,
        });
        self
    }

    pub fn set_image<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.image = Some(EmbedMedia::from_url(url));
        self
    }

    pub fn push_field(&mut self, field: EmbedField) -> &mut Self {
        self.fields.push(field);
        self
    }

    ///the number of characters that count toward the combined embed limit
    pub fn text_length(&self) -> usize {
        char_len(&self.title)
            + char_len(&self.description)
            + self.footer.as_ref().map(|f| f.text.chars().count()).unwrap_or(0)
            + self.author.as_ref().map(|a| char_len(&a.name)).unwrap_or(0)
            + self
                .fields
                .iter()
                .map(|f| f.name.chars().count() + f.value.chars().count())
                .sum::<usize>()
    }

    pub fn enforce_embed_limits(&self) -> Result<(), EmbedTooBigError> {
        check("title", char_len(&self.title), EMBED_TITLE_LIMIT)?;
        check("description", char_len(&self.description), EMBED_DESCRIPTION_LIMIT)?;
        if self.fields.len() > EMBED_FIELD_COUNT_LIMIT {
            return Err(EmbedTooBigError::TooManyFields(self.fields.len()));
        }
        for field in &self.fields {
            check("field.name", field.name.chars().count(), EMBED_FIELD_NAME_LIMIT)?;
            check("field.value", field.value.chars().count(), EMBED_FIELD_VALUE_LIMIT)?;
        }
        if let Some(footer) = &self.footer {
            check("footer.text", footer.text.chars().count(), EMBED_FOOTER_TEXT_LIMIT)?;
        }
        if let Some(author) = &self.author {
            check("author.name", char_len(&author.name), EMBED_AUTHOR_NAME_LIMIT)?;
        }
        let total = self.text_length();
        if total > EMBED_TOTAL_LIMIT {
            return Err(EmbedTooBigError::WholeTooBig(total));
        }
        Ok(())
    }
}

///an image, thumbnail or video attached to an embed
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct EmbedMedia {
    ///source url (only supports http(s) and attachments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
}

impl EmbedMedia {
    pub fn from_url<S: Into<String>>(url: S) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbedProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbedAuthor {
    ///name of author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    ///url of author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    ///url of author icon (only supports http(s) and attachments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbedFooter {
    pub text: String,
    ///url of footer icon (only supports http(s) and attachments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    ///whether or not this field should display inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl EmbedField {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: None,
        }
    }

    pub fn inline<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            inline: Some(true),
            ..Self::new(name, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_embed_passes() {
        let mut embed = Embed::default();
        embed
            .set_title("hello")
            .set_description("world")
            .push_field(EmbedField::inline("a", "b"));
        assert!(embed.enforce_embed_limits().is_ok());
        assert_eq!(embed.text_length(), 12);
    }

    #[test]
    fn oversized_title_is_rejected() {
        let mut embed = Embed::default();
        embed.set_title("x".repeat(EMBED_TITLE_LIMIT + 1));
        match embed.enforce_embed_limits() {
            Err(EmbedTooBigError::FieldTooBig { field, .. }) => assert_eq!(field, "title"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn combined_length_is_enforced() {
        let mut embed = Embed::default();
        embed.set_description("x".repeat(EMBED_DESCRIPTION_LIMIT));
        for _ in 0..3 {
            embed.push_field(EmbedField::new("n", "v".repeat(EMBED_FIELD_VALUE_LIMIT)));
        }
        match embed.enforce_embed_limits() {
            Err(EmbedTooBigError::WholeTooBig(total)) => assert_eq!(total, 4096 + 3 * 1025),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_fields_are_not_serialized() {
        let embed = Embed::default();
        assert_eq!(serde_json::to_string(&embed).unwrap(), "{}");
    }
}
