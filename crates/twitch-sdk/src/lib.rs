//! Twitch platform client library.
//!
//! Provides typed Helix resource models with partial/full reference
//! resolution, a batching REST client, app-token bootstrap with a
//! background refresh loop, and a minimal chat connector.

pub mod api;
pub mod auth;
pub mod chat;
pub mod client;
pub mod config;
pub mod models;
pub mod reference;
pub mod scope;

pub use chat::{ChatConnection, ChatState, ChatTarget, Sendable};
pub use client::TwitchClient;
pub use config::{ChatConfig, ClientConfig};
pub use reference::{Reference, ReferenceKind};
pub use scope::Scope;

use serde::{Deserialize, Serialize};

/// Largest number of references Helix accepts in one batched lookup.
pub const MAX_BATCH: usize = 100;

/// Bearer token issued by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppToken {
    pub access_token: String,
    /// Lifetime in seconds as reported by the token endpoint.
    pub expires_in: u64,
}

/// Unified error type for the twitch-sdk crate.
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Authentication required: no valid token")]
    AuthRequired,

    #[error("Token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Twitch API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Scope {0} is required for this request")]
    MissingScope(Scope),

    #[error("{kind}<{value}> is not a known value; the upstream API has changed")]
    ApiMismatch { kind: &'static str, value: String },

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Cannot convert {0}")]
    Conversion(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Client is closed")]
    Closed,
}

/// Coarse classification of [`TwitchError`] for callers that only need to
/// decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; fix the call and retry.
    Validation,
    /// Missing scope or privileged data the token does not cover.
    Authorization,
    /// A payload carried a value this crate does not know about.
    SchemaDrift,
    Conversion,
    Transport,
    Closed,
}

impl TwitchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TwitchError::Validation(_) => ErrorKind::Validation,
            TwitchError::MissingScope(_)
            | TwitchError::NotAuthorized(_)
            | TwitchError::AuthRequired => ErrorKind::Authorization,
            TwitchError::ApiMismatch { .. } => ErrorKind::SchemaDrift,
            TwitchError::Conversion(_) => ErrorKind::Conversion,
            TwitchError::Closed => ErrorKind::Closed,
            TwitchError::Http(_)
            | TwitchError::WebSocket(_)
            | TwitchError::Json(_)
            | TwitchError::UrlParse(_)
            | TwitchError::TokenRequestFailed(_)
            | TwitchError::ApiError { .. }
            | TwitchError::Timeout => ErrorKind::Transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_are_distinguishable() {
        assert_eq!(
            TwitchError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            TwitchError::MissingScope(Scope::BitsRead).kind(),
            ErrorKind::Authorization
        );
        assert_eq!(
            TwitchError::ApiMismatch {
                kind: "BroadcasterType",
                value: "vip".into()
            }
            .kind(),
            ErrorKind::SchemaDrift
        );
        assert_eq!(
            TwitchError::ApiError {
                status: 500,
                message: String::new()
            }
            .kind(),
            ErrorKind::Transport
        );
    }
}
