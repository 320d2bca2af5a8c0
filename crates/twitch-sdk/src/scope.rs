//! OAuth permission scopes.
//!
//! See <https://dev.twitch.tv/docs/authentication/scopes/>.

use std::fmt;
use std::str::FromStr;

use crate::TwitchError;

/// A named permission string gating access to endpoints or fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    AnalyticsReadGames,
    AnalyticsReadExtensions,
    BitsRead,
    ChannelModerate,
    ChannelReadSubscriptions,
    ChatRead,
    ChatEdit,
    WhispersRead,
    WhispersEdit,
    ClipsEdit,
    UserEdit,
    UserReadEmail,
    UserReadBroadcast,
    UserEditBroadcast,
    ModerationRead,
}

impl Scope {
    pub const ALL: &'static [Scope] = &[
        Scope::AnalyticsReadGames,
        Scope::AnalyticsReadExtensions,
        Scope::BitsRead,
        Scope::ChannelModerate,
        Scope::ChannelReadSubscriptions,
        Scope::ChatRead,
        Scope::ChatEdit,
        Scope::WhispersRead,
        Scope::WhispersEdit,
        Scope::ClipsEdit,
        Scope::UserEdit,
        Scope::UserReadEmail,
        Scope::UserReadBroadcast,
        Scope::UserEditBroadcast,
        Scope::ModerationRead,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::AnalyticsReadGames => "analytics:read:games",
            Scope::AnalyticsReadExtensions => "analytics:read:extensions",
            Scope::BitsRead => "bits:read",
            Scope::ChannelModerate => "channel:moderate",
            Scope::ChannelReadSubscriptions => "channel:read:subscriptions",
            Scope::ChatRead => "chat:read",
            Scope::ChatEdit => "chat:edit",
            Scope::WhispersRead => "whispers:read",
            Scope::WhispersEdit => "whispers:edit",
            Scope::ClipsEdit => "clips:edit",
            Scope::UserEdit => "user:edit",
            Scope::UserReadEmail => "user:read:email",
            Scope::UserReadBroadcast => "user:read:broadcast",
            Scope::UserEditBroadcast => "user:edit:broadcast",
            Scope::ModerationRead => "moderation:read",
        }
    }

    /// Space-joined form used by the token endpoint.
    pub fn join(scopes: &[Scope]) -> String {
        scopes
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a space-separated scope list, rejecting unknown entries.
    pub fn parse_list(raw: &str) -> Result<Vec<Scope>, TwitchError> {
        raw.split_whitespace().map(str::parse).collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = TwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| TwitchError::Validation(format!("unknown scope '{s}'")))
    }
}
