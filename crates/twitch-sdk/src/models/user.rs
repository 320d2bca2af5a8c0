use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Identified, Identifier, Resolve, parse_timestamp};
use crate::chat::{ChatTarget, Sendable};
use crate::{TwitchClient, TwitchError};

closed_set! {
    /// Partner programme level of a broadcaster.
    BroadcasterType {
        Partner => "partner",
        Affiliate => "affiliate",
        Normal => "",
    }
}

closed_set! {
    /// Site-wide role of a user.
    UserType {
        Staff => "staff",
        Admin => "admin",
        GlobalMod => "global_mod",
        Normal => "",
    }
}

/// User object from GET /helix/users.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(rename = "type", default)]
    pub user_type: String,
    #[serde(default)]
    pub broadcaster_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub offline_image_url: String,
    #[serde(default)]
    pub view_count: u64,
    /// Only present when the token carries `user:read:email`.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A fully hydrated Twitch user.
#[derive(Debug, Clone)]
pub struct User {
    id: Identifier,
    username: String,
    display_name: String,
    description: String,
    email: Option<String>,
    profile_image_url: String,
    offline_image_url: String,
    view_count: u64,
    broadcaster_type: BroadcasterType,
    user_type: UserType,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserPayload> for User {
    type Error = TwitchError;

    fn try_from(data: UserPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            broadcaster_type: BroadcasterType::parse(&data.broadcaster_type)?,
            user_type: UserType::parse(&data.user_type)?,
            id: data.id.into(),
            username: data.login,
            display_name: data.display_name,
            description: data.description,
            email: data.email.filter(|email| !email.is_empty()),
            profile_image_url: data.profile_image_url,
            offline_image_url: data.offline_image_url,
            view_count: data.view_count,
            created_at: parse_timestamp(data.created_at.as_deref()),
        })
    }
}

impl User {
    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The user's email address.
    ///
    /// Fails with [`TwitchError::NotAuthorized`] when the token that fetched
    /// this user did not cover `user:read:email`.
    pub fn email(&self) -> Result<&str, TwitchError> {
        self.email.as_deref().ok_or_else(|| {
            TwitchError::NotAuthorized("you are not authorized to view this user's email".into())
        })
    }

    pub fn profile_image_url(&self) -> &str {
        &self.profile_image_url
    }

    pub fn offline_image_url(&self) -> &str {
        &self.offline_image_url
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn broadcaster_type(&self) -> BroadcasterType {
        self.broadcaster_type
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_partner(&self) -> bool {
        self.broadcaster_type == BroadcasterType::Partner
    }

    pub fn is_affiliate(&self) -> bool {
        self.broadcaster_type == BroadcasterType::Affiliate
    }

    pub fn is_staff(&self) -> bool {
        self.user_type == UserType::Staff
    }

    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    pub fn is_global_moderator(&self) -> bool {
        self.user_type == UserType::GlobalMod
    }
}

impl Identified for User {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

impl Sendable for User {
    fn chat_target(&self) -> ChatTarget {
        ChatTarget::Whisper {
            login: self.username.clone(),
        }
    }
}

/// A user known only by id and name.
#[derive(Debug, Clone)]
pub struct PartialUser {
    id: Identifier,
    username: String,
}

impl PartialUser {
    pub fn new(id: impl Into<Identifier>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Identified for PartialUser {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for PartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl Resolve for PartialUser {
    type Full = User;

    async fn resolve(&self, client: &TwitchClient) -> Result<Option<User>, TwitchError> {
        client.get_user(self).await
    }
}

/// Entry from GET /helix/moderation/banned.
#[derive(Debug, Clone, Deserialize)]
pub struct BannedUserPayload {
    pub user_id: String,
    pub user_name: String,
    /// Empty for permanent bans.
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// A banned user known only by id and name, with the ban expiry.
///
/// Permanent bans (no upstream `expires_at`) carry [`super::epoch`].
#[derive(Debug, Clone)]
pub struct BannedPartialUser {
    id: Identifier,
    username: String,
    expires_at: DateTime<Utc>,
}

impl BannedPartialUser {
    pub fn new(
        id: impl Into<Identifier>,
        username: impl Into<String>,
        expires_at: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            expires_at: parse_timestamp(expires_at),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_permanent(&self) -> bool {
        self.expires_at == super::epoch()
    }
}

impl From<BannedUserPayload> for BannedPartialUser {
    fn from(data: BannedUserPayload) -> Self {
        Self::new(data.user_id, data.user_name, data.expires_at.as_deref())
    }
}

impl Identified for BannedPartialUser {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for BannedPartialUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

impl Resolve for BannedPartialUser {
    type Full = User;

    async fn resolve(&self, client: &TwitchClient) -> Result<Option<User>, TwitchError> {
        client.get_user(self).await
    }
}

id_equality!(User, PartialUser, BannedPartialUser);
