use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use super::{Identified, Identifier, Resolve};
use crate::{TwitchClient, TwitchError};

const DEFAULT_LOCALE: &str = "en-us";

/// Tag object from GET /helix/tags/streams.
#[derive(Debug, Clone, Deserialize)]
pub struct TagPayload {
    pub tag_id: String,
    #[serde(default)]
    pub is_auto: bool,
    #[serde(default)]
    pub localization_names: HashMap<String, String>,
    #[serde(default)]
    pub localization_descriptions: HashMap<String, String>,
}

/// A stream tag with localized names and descriptions.
#[derive(Debug, Clone)]
pub struct Tag {
    id: Identifier,
    auto_generated: bool,
    names: HashMap<String, String>,
    descriptions: HashMap<String, String>,
}

impl From<TagPayload> for Tag {
    fn from(data: TagPayload) -> Self {
        Self {
            id: data.tag_id.into(),
            auto_generated: data.is_auto,
            names: data.localization_names,
            descriptions: data.localization_descriptions,
        }
    }
}

impl Tag {
    pub fn was_auto_generated(&self) -> bool {
        self.auto_generated
    }

    pub fn localization_names(&self) -> &HashMap<String, String> {
        &self.names
    }

    pub fn localization_descriptions(&self) -> &HashMap<String, String> {
        &self.descriptions
    }

    /// Tag name in `locale` (e.g. `en-us`).
    pub fn name(&self, locale: &str) -> Result<&str, TwitchError> {
        self.names
            .get(locale)
            .map(String::as_str)
            .ok_or_else(|| self.missing_locale(locale))
    }

    pub fn description(&self, locale: &str) -> Result<&str, TwitchError> {
        self.descriptions
            .get(locale)
            .map(String::as_str)
            .ok_or_else(|| self.missing_locale(locale))
    }

    fn missing_locale(&self, locale: &str) -> TwitchError {
        TwitchError::Validation(format!("locale '{locale}' not found in tag {}", self.id))
    }
}

impl Identified for Tag {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.names.get(DEFAULT_LOCALE) {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A tag known only by id.
#[derive(Debug, Clone)]
pub struct PartialTag {
    id: Identifier,
}

impl PartialTag {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self { id: id.into() }
    }
}

impl Identified for PartialTag {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl Resolve for PartialTag {
    type Full = Tag;

    async fn resolve(&self, client: &TwitchClient) -> Result<Option<Tag>, TwitchError> {
        let tags = client.get_tags([self]).await?;
        Ok(tags.into_iter().next())
    }
}

id_equality!(Tag, PartialTag);
