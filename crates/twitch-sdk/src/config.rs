//! Client and chat configuration with environment loading.

use std::time::Duration;

use url::Url;

use crate::{Scope, TwitchError};

pub const HELIX_BASE: &str = "https://api.twitch.tv/helix";
pub const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
pub const CHAT_URL: &str = "wss://irc-ws.chat.twitch.tv:443";

const DEFAULT_CHAT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`crate::TwitchClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Scopes requested for the app token and checked before scoped calls.
    pub scopes: Vec<Scope>,
    pub helix_base: String,
    pub token_url: String,
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: Vec::new(),
            helix_base: HELIX_BASE.into(),
            token_url: TOKEN_URL.into(),
        }
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    /// Load from the process environment, reading `.env` first if present.
    ///
    /// Required: `TWITCH_CLIENT_ID`, `TWITCH_CLIENT_SECRET`.
    /// Optional: `TWITCH_SCOPES` (space separated), `TWITCH_HELIX_BASE`,
    /// `TWITCH_TOKEN_URL`.
    pub fn from_env() -> Result<Self, TwitchError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            required_env("TWITCH_CLIENT_ID")?,
            required_env("TWITCH_CLIENT_SECRET")?,
        );
        if let Ok(raw) = std::env::var("TWITCH_SCOPES") {
            config.scopes = Scope::parse_list(&raw)?;
        }
        if let Ok(base) = std::env::var("TWITCH_HELIX_BASE") {
            config.helix_base = base;
        }
        if let Ok(url) = std::env::var("TWITCH_TOKEN_URL") {
            config.token_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TwitchError> {
        if self.client_id.trim().is_empty() {
            return Err(TwitchError::Validation("client_id is empty".into()));
        }
        Url::parse(&self.helix_base)?;
        Url::parse(&self.token_url)?;
        Ok(())
    }

    /// Helix base without a trailing slash, so paths can be appended.
    pub(crate) fn helix_root(&self) -> &str {
        self.helix_base.trim_end_matches('/')
    }
}

/// Settings for a chat connection.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub url: String,
    pub nick: String,
    pub channel: String,
    /// Chat password; the `oauth:` prefix is added when missing.
    pub token: String,
    pub connect_timeout: Duration,
}

impl ChatConfig {
    pub fn new(
        nick: impl Into<String>,
        channel: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            url: CHAT_URL.into(),
            nick: nick.into(),
            channel: channel.into(),
            token: token.into(),
            connect_timeout: DEFAULT_CHAT_CONNECT_TIMEOUT,
        }
    }

    /// Load `TWITCH_CHAT_NICK`, `TWITCH_CHAT_CHANNEL` and `TWITCH_CHAT_TOKEN`.
    pub fn from_env() -> Result<Self, TwitchError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            required_env("TWITCH_CHAT_NICK")?,
            required_env("TWITCH_CHAT_CHANNEL")?,
            required_env("TWITCH_CHAT_TOKEN")?,
        );
        if let Ok(url) = std::env::var("TWITCH_CHAT_URL") {
            config.url = url;
        }
        Url::parse(&config.url)?;
        Ok(config)
    }

    /// Channel login without a leading `#`, lowercased.
    pub fn channel_login(&self) -> String {
        self.channel.trim().trim_start_matches('#').to_lowercase()
    }
}

fn required_env(key: &str) -> Result<String, TwitchError> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TwitchError::Validation(format!("{key} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = ClientConfig::new("id", "secret");
        config.helix_base = "not a url".into();
        assert!(matches!(config.validate(), Err(TwitchError::UrlParse(_))));
    }

    #[test]
    fn validate_rejects_empty_client_id() {
        let config = ClientConfig::new("  ", "secret");
        assert!(matches!(config.validate(), Err(TwitchError::Validation(_))));
    }

    #[test]
    fn helix_root_strips_trailing_slash() {
        let mut config = ClientConfig::new("id", "secret");
        config.helix_base = "http://127.0.0.1:1234/".into();
        assert_eq!(config.helix_root(), "http://127.0.0.1:1234");
    }

    #[test]
    fn channel_login_normalizes_hash_and_case() {
        let config = ChatConfig::new("bar", "#Foo", "abc");
        assert_eq!(config.channel_login(), "foo");
    }
}
