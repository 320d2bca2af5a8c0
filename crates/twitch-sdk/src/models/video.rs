use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Identified, Identifier, PartialUser, parse_timestamp};
use crate::TwitchError;

closed_set! {
    VideoType {
        Upload => "upload",
        Archive => "archive",
        Highlight => "highlight",
    }
}

/// Video object from GET /helix/videos.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoPayload {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub viewable: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub language: String,
    #[serde(rename = "type")]
    pub video_type: String,
    /// Twitch duration string such as `3h8m33s`.
    #[serde(default)]
    pub duration: String,
}

/// A VOD, upload or highlight.
#[derive(Debug, Clone)]
pub struct Video {
    id: Identifier,
    broadcaster: PartialUser,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    published_at: DateTime<Utc>,
    url: String,
    thumbnail_url: String,
    public: bool,
    view_count: u64,
    language: String,
    video_type: VideoType,
    duration: String,
}

impl TryFrom<VideoPayload> for Video {
    type Error = TwitchError;

    fn try_from(data: VideoPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            video_type: VideoType::parse(&data.video_type)?,
            id: data.id.into(),
            broadcaster: PartialUser::new(data.user_id, data.user_name),
            title: data.title,
            description: data.description,
            created_at: parse_timestamp(data.created_at.as_deref()),
            published_at: parse_timestamp(data.published_at.as_deref()),
            url: data.url,
            thumbnail_url: data.thumbnail_url,
            public: data.viewable.is_empty() || data.viewable == "public",
            view_count: data.view_count,
            language: data.language,
            duration: data.duration,
        })
    }
}

impl Video {
    pub fn broadcaster(&self) -> &PartialUser {
        &self.broadcaster
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn video_type(&self) -> VideoType {
        self.video_type
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

impl Identified for Video {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

id_equality!(Video);
