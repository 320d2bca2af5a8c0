use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    Game, Identified, Identifier, PartialGame, PartialTag, PartialUser, Resolvable, Tag, User,
    parse_timestamp,
};
use crate::chat::{ChatTarget, Sendable};
use crate::{TwitchClient, TwitchError};

/// Stream object from GET /helix/streams.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamPayload {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_login: String,
    pub user_name: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(rename = "type", default)]
    pub stream_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewer_count: u64,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub tag_ids: Option<Vec<String>>,
}

/// A live stream.
///
/// The listing endpoint only embeds ids for the broadcaster, game and tags,
/// so those start out partial. `fetch_*` upgrade them in place.
#[derive(Debug, Clone)]
pub struct Stream {
    id: Identifier,
    broadcaster: Resolvable<PartialUser, User>,
    broadcaster_login: String,
    game: Resolvable<PartialGame, Game>,
    is_live: bool,
    title: String,
    viewer_count: u64,
    started_at: DateTime<Utc>,
    language: String,
    thumbnail_url: String,
    tags: Vec<Resolvable<PartialTag, Tag>>,
}

impl From<StreamPayload> for Stream {
    fn from(data: StreamPayload) -> Self {
        let broadcaster_login = if data.user_login.is_empty() {
            data.user_name.to_lowercase()
        } else {
            data.user_login
        };
        Self {
            id: data.id.into(),
            broadcaster: Resolvable::Partial(PartialUser::new(data.user_id, data.user_name)),
            broadcaster_login,
            game: Resolvable::Partial(PartialGame::new(data.game_id)),
            is_live: data.stream_type == "live",
            title: data.title,
            viewer_count: data.viewer_count,
            started_at: parse_timestamp(data.started_at.as_deref()),
            language: data.language,
            thumbnail_url: data.thumbnail_url,
            tags: data
                .tag_ids
                .unwrap_or_default()
                .into_iter()
                .map(|id| Resolvable::Partial(PartialTag::new(id)))
                .collect(),
        }
    }
}

impl Stream {
    pub fn broadcaster(&self) -> &Resolvable<PartialUser, User> {
        &self.broadcaster
    }

    pub fn broadcaster_login(&self) -> &str {
        &self.broadcaster_login
    }

    pub fn game(&self) -> &Resolvable<PartialGame, Game> {
        &self.game
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn viewer_count(&self) -> u64 {
        self.viewer_count
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Thumbnail URL template with `{width}x{height}` placeholders.
    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn thumbnail_url_sized(&self, width: u32, height: u32) -> String {
        self.thumbnail_url
            .replace("{width}", &width.to_string())
            .replace("{height}", &height.to_string())
    }

    pub fn tags(&self) -> &[Resolvable<PartialTag, Tag>] {
        &self.tags
    }

    /// Resolve the broadcaster once and keep the full user.
    pub async fn fetch_broadcaster(
        &mut self,
        client: &TwitchClient,
    ) -> Result<Option<&User>, TwitchError> {
        self.broadcaster.upgrade(client).await
    }

    /// Resolve the game once and keep the full game.
    pub async fn fetch_game(
        &mut self,
        client: &TwitchClient,
    ) -> Result<Option<&Game>, TwitchError> {
        self.game.upgrade(client).await
    }

    /// Resolve every still-partial tag with a single batched request.
    ///
    /// Tags the server no longer knows stay partial.
    pub async fn fetch_tags(
        &mut self,
        client: &TwitchClient,
    ) -> Result<&[Resolvable<PartialTag, Tag>], TwitchError> {
        let pending: Vec<&PartialTag> = self.tags.iter().filter_map(Resolvable::partial).collect();
        if pending.is_empty() {
            return Ok(&self.tags);
        }

        let fetched = client.get_tags(pending).await?;
        self.tags = std::mem::take(&mut self.tags)
            .into_iter()
            .map(|tag| match fetched.iter().find(|full| full.id() == tag.id()) {
                Some(full) if !tag.is_resolved() => Resolvable::Resolved(full.clone()),
                _ => tag,
            })
            .collect();
        Ok(&self.tags)
    }
}

impl Identified for Stream {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.broadcaster {
            Resolvable::Partial(user) => write!(f, "{user}'s stream"),
            Resolvable::Resolved(user) => write!(f, "{user}'s stream"),
        }
    }
}

impl Sendable for Stream {
    fn chat_target(&self) -> ChatTarget {
        ChatTarget::Channel {
            login: self.broadcaster_login.clone(),
        }
    }
}

id_equality!(Stream);
