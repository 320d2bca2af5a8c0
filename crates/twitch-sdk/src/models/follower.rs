use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{PartialUser, parse_timestamp};

/// Follow relationship from GET /helix/users/follows.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowerPayload {
    pub from_id: String,
    pub from_name: String,
    pub to_id: String,
    pub to_name: String,
    #[serde(default)]
    pub followed_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Follower {
    follower: PartialUser,
    following: PartialUser,
    followed_at: DateTime<Utc>,
}

impl From<FollowerPayload> for Follower {
    fn from(data: FollowerPayload) -> Self {
        Self {
            follower: PartialUser::new(data.from_id, data.from_name),
            following: PartialUser::new(data.to_id, data.to_name),
            followed_at: parse_timestamp(data.followed_at.as_deref()),
        }
    }
}

impl Follower {
    pub fn follower(&self) -> &PartialUser {
        &self.follower
    }

    pub fn following(&self) -> &PartialUser {
        &self.following
    }

    pub fn followed_at(&self) -> DateTime<Utc> {
        self.followed_at
    }
}

impl PartialEq for Follower {
    fn eq(&self, other: &Self) -> bool {
        self.follower == other.follower
            && self.following == other.following
            && self.followed_at == other.followed_at
    }
}

impl Eq for Follower {}

impl fmt::Display for Follower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} followed {} at {}",
            self.follower, self.following, self.followed_at
        )
    }
}
