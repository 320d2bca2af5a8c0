use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{BannedPartialUser, Identified, Identifier, PartialUser, parse_timestamp};
use crate::TwitchError;

closed_set! {
    ModerationEventType {
        Ban => "moderation.user.ban",
        Unban => "moderation.user.unban",
    }
}

/// Event object from GET /helix/moderation/banned/events.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationEventPayload {
    pub id: String,
    pub event_type: String,
    #[serde(default)]
    pub event_timestamp: Option<String>,
    pub event_data: ModerationEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModerationEventData {
    pub broadcaster_id: String,
    pub broadcaster_name: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// A ban or unban in a broadcaster's channel.
#[derive(Debug, Clone)]
pub struct ModerationEvent {
    id: Identifier,
    event_type: ModerationEventType,
    timestamp: DateTime<Utc>,
    broadcaster: PartialUser,
    target: BannedPartialUser,
}

impl TryFrom<ModerationEventPayload> for ModerationEvent {
    type Error = TwitchError;

    fn try_from(data: ModerationEventPayload) -> Result<Self, Self::Error> {
        let event = data.event_data;
        Ok(Self {
            event_type: ModerationEventType::parse(&data.event_type)?,
            id: data.id.into(),
            timestamp: parse_timestamp(data.event_timestamp.as_deref()),
            broadcaster: PartialUser::new(event.broadcaster_id, event.broadcaster_name),
            target: BannedPartialUser::new(
                event.user_id,
                event.user_name,
                event.expires_at.as_deref(),
            ),
        })
    }
}

impl ModerationEvent {
    pub fn event_type(&self) -> ModerationEventType {
        self.event_type
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The channel the event happened in.
    pub fn from_user(&self) -> &PartialUser {
        &self.broadcaster
    }

    /// The user that was banned or unbanned.
    pub fn for_user(&self) -> &BannedPartialUser {
        &self.target
    }

    /// Ban expiry; epoch zero for permanent bans and unbans.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.target.expires_at()
    }
}

impl Identified for ModerationEvent {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

id_equality!(ModerationEvent);
