use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Identified, Identifier, parse_timestamp};

/// Top-level entry from GET /helix/streams/markers.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamMarkersPayload {
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub videos: Vec<VideoMarkersPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoMarkersPayload {
    pub video_id: String,
    #[serde(default)]
    pub markers: Vec<MarkerPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkerPayload {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position_seconds: u64,
    #[serde(rename = "URL", alias = "url", default)]
    pub url: Option<String>,
}

/// A stream marker inside a VOD.
#[derive(Debug, Clone)]
pub struct Marker {
    id: Identifier,
    video_id: Identifier,
    created_at: DateTime<Utc>,
    description: String,
    position_seconds: u64,
    url: Option<String>,
}

impl Marker {
    pub(crate) fn from_payload(video_id: &str, data: MarkerPayload) -> Self {
        Self {
            id: data.id.into(),
            video_id: video_id.into(),
            created_at: parse_timestamp(data.created_at.as_deref()),
            description: data.description,
            position_seconds: data.position_seconds,
            url: data.url.filter(|url| !url.is_empty()),
        }
    }

    pub fn video_id(&self) -> &Identifier {
        &self.video_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn position_seconds(&self) -> u64 {
        self.position_seconds
    }

    /// Deep link into the VOD; absent for highlights still processing.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Identified for Marker {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

/// Flatten the nested `data[].videos[].markers[]` shape.
pub(crate) fn flatten(entries: Vec<StreamMarkersPayload>) -> Vec<Marker> {
    entries
        .into_iter()
        .flat_map(|entry| entry.videos)
        .flat_map(|video| {
            let video_id = video.video_id;
            video
                .markers
                .into_iter()
                .map(move |marker| Marker::from_payload(&video_id, marker))
        })
        .collect()
}

id_equality!(Marker);
