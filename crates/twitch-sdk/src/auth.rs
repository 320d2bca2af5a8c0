//! App access token bootstrap and background refresh.
//!
//! Tokens come from the client-credentials grant. The refresh loop sleeps
//! for the token's reported lifetime, requests a new one, stores it in the
//! shared [`TokenSlot`] and reschedules with the new lifetime.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{AppToken, ClientConfig, Scope, TwitchError};

/// Token shared between the HTTP gateway and the refresh loop.
pub type TokenSlot = Arc<RwLock<Option<AppToken>>>;

const RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// Twitch OAuth token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Twitch OAuth error response.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
    status: Option<u16>,
}

impl ErrorResponse {
    /// `message` when it says something, else the short `error` reason.
    fn reason(self) -> String {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error)
            .unwrap_or_default()
    }
}

/// Something that can hand out fresh app tokens.
pub trait TokenSource: Send + Sync {
    fn fetch_token(&self) -> impl Future<Output = Result<AppToken, TwitchError>> + Send;
}

/// Client-credentials token requests.
pub struct AppAuth {
    client_id: String,
    client_secret: String,
    scopes: Vec<Scope>,
    token_url: String,
    http: reqwest::Client,
}

impl AppAuth {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes: config.scopes.clone(),
            token_url: config.token_url.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Request an app access token for the configured scopes.
    pub async fn request_app_token(&self) -> Result<AppToken, TwitchError> {
        tracing::info!(scopes = self.scopes.len(), "Requesting Twitch app token");

        let scope = Scope::join(&self.scopes);
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", scope.as_str()),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;

        Self::parse_token_response(resp).await
    }

    /// Parse the token endpoint response into an [`AppToken`].
    async fn parse_token_response(resp: reqwest::Response) -> Result<AppToken, TwitchError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let err: ErrorResponse = serde_json::from_str(&body).unwrap_or(ErrorResponse {
                error: None,
                message: Some(body.clone()),
                status: Some(status.as_u16()),
            });
            let code = err.status.unwrap_or(status.as_u16());
            return Err(TwitchError::TokenRequestFailed(format!("{code}: {}", err.reason())));
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            TwitchError::TokenRequestFailed(format!("failed to parse response: {e}"))
        })?;

        Ok(AppToken {
            access_token: token.access_token,
            expires_in: token.expires_in,
        })
    }
}

impl TokenSource for AppAuth {
    async fn fetch_token(&self) -> Result<AppToken, TwitchError> {
        self.request_app_token().await
    }
}

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Keep `slot` filled with a valid token until `cancel` fires.
///
/// Dormant for `initial_expiry`, then exactly one request per expiry.
/// Failed requests are retried after a fixed backoff.
pub async fn refresh_loop<S: TokenSource>(
    source: Arc<S>,
    slot: TokenSlot,
    initial_expiry: Duration,
    cancel: CancellationToken,
) {
    let mut wait = initial_expiry;

    loop {
        if sleep_or_cancel(&cancel, wait).await {
            tracing::info!("Token refresh loop stopped (shutdown)");
            return;
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Token refresh loop stopped during request (shutdown)");
                return;
            }
            result = source.fetch_token() => result,
        };

        match result {
            Ok(token) => {
                wait = Duration::from_secs(token.expires_in.max(1));
                tracing::info!(expires_in = token.expires_in, "App token refreshed");
                *slot.write().await = Some(token);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    backoff_secs = RETRY_BACKOFF.as_secs(),
                    "Token refresh failed, will retry"
                );
                wait = RETRY_BACKOFF;
            }
        }
    }
}
