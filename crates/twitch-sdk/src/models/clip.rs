use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Identified, Identifier, PartialGame, PartialUser, parse_timestamp};
use crate::TwitchError;

/// Clip object from GET /helix/clips.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipPayload {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub embed_url: String,
    pub broadcaster_id: String,
    pub broadcaster_name: String,
    pub creator_id: String,
    pub creator_name: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub thumbnail_url: String,
    /// Only returned to the clip's creator right after POST /helix/clips.
    #[serde(default)]
    pub edit_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Clip {
    id: Identifier,
    created_at: DateTime<Utc>,
    broadcaster: PartialUser,
    creator: PartialUser,
    video_id: Option<Identifier>,
    game: PartialGame,
    language: String,
    title: String,
    view_count: u64,
    thumbnail_url: String,
    url: String,
    embed_url: String,
    edit_url: Option<String>,
}

impl From<ClipPayload> for Clip {
    fn from(data: ClipPayload) -> Self {
        Self {
            id: data.id.into(),
            created_at: parse_timestamp(data.created_at.as_deref()),
            broadcaster: PartialUser::new(data.broadcaster_id, data.broadcaster_name),
            creator: PartialUser::new(data.creator_id, data.creator_name),
            video_id: Some(data.video_id)
                .filter(|id| !id.is_empty())
                .map(Identifier::from),
            game: PartialGame::new(data.game_id),
            language: data.language,
            title: data.title,
            view_count: data.view_count,
            thumbnail_url: data.thumbnail_url,
            url: data.url,
            embed_url: data.embed_url,
            edit_url: data.edit_url.filter(|url| !url.is_empty()),
        }
    }
}

impl Clip {
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn broadcaster(&self) -> &PartialUser {
        &self.broadcaster
    }

    pub fn creator(&self) -> &PartialUser {
        &self.creator
    }

    /// Source VOD, if it still exists.
    pub fn video_id(&self) -> Option<&Identifier> {
        self.video_id.as_ref()
    }

    pub fn game(&self) -> &PartialGame {
        &self.game
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    /// Fails with [`TwitchError::NotAuthorized`] unless this clip was just
    /// created by the current token's user.
    pub fn edit_url(&self) -> Result<&str, TwitchError> {
        self.edit_url.as_deref().ok_or_else(|| {
            TwitchError::NotAuthorized("you are not authorized to view the edit url".into())
        })
    }
}

impl Identified for Clip {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clip {}: {} clipped {} and called it '{}'",
            self.id, self.creator, self.broadcaster, self.title
        )
    }
}

id_equality!(Clip);
