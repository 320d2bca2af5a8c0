//! High-level Twitch client.
//!
//! Owns the Helix gateway, the shared app token, the granted scope list and
//! the background tasks started on its behalf. Clones share all of it.
//!
//! Batched lookups take 1..=100 references and issue exactly one request.
//! Results come back in server order, which is not guaranteed to match the
//! input order; correlate by id.

mod catalog;
mod extensions;
mod moderation;
mod streams;
mod subscriptions;
mod users;
mod videos;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::form_urlencoded;

use crate::api::HelixGateway;
use crate::auth::{AppAuth, TokenSlot, refresh_loop};
use crate::chat::ChatConnection;
use crate::reference::{QueryKeys, build_query, collect_batch};
use crate::{AppToken, ChatConfig, ClientConfig, Reference, ReferenceKind, Scope, TwitchError};

/// Shared handle to the Twitch APIs.
#[derive(Clone)]
pub struct TwitchClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    gateway: HelixGateway,
    token: TokenSlot,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl TwitchClient {
    /// Create a client without a token. Call [`TwitchClient::start`] to
    /// acquire one.
    pub fn new(config: ClientConfig) -> Result<Self, TwitchError> {
        Self::build(config, None)
    }

    /// Create a client around an already issued token. No refresh loop runs.
    pub fn with_token(config: ClientConfig, token: AppToken) -> Result<Self, TwitchError> {
        Self::build(config, Some(token))
    }

    fn build(config: ClientConfig, token: Option<AppToken>) -> Result<Self, TwitchError> {
        config.validate()?;
        let slot: TokenSlot = Arc::new(RwLock::new(token));
        let gateway = HelixGateway::new(
            config.client_id.clone(),
            config.helix_root().to_string(),
            slot.clone(),
        );
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                gateway,
                token: slot,
                cancel: CancellationToken::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Acquire the first app token and spawn the refresh loop.
    pub async fn start(&self) -> Result<(), TwitchError> {
        if self.is_closed() {
            return Err(TwitchError::Closed);
        }

        let auth = Arc::new(AppAuth::new(&self.inner.config));
        let token = auth.request_app_token().await?;
        let expiry = Duration::from_secs(token.expires_in);
        tracing::info!(expires_in = token.expires_in, "App token acquired");
        *self.inner.token.write().await = Some(token);

        let handle = tokio::spawn(refresh_loop(
            auth,
            self.inner.token.clone(),
            expiry,
            self.inner.cancel.clone(),
        ));
        self.inner.tasks.lock().await.push(handle);
        Ok(())
    }

    /// Scopes the client was configured with.
    pub fn scopes(&self) -> &[Scope] {
        &self.inner.config.scopes
    }

    /// Snapshot of the currently held token.
    pub async fn token(&self) -> Option<AppToken> {
        self.inner.token.read().await.clone()
    }

    /// Connect to chat. The connection is torn down by [`TwitchClient::close`].
    pub async fn connect_chat(&self, config: &ChatConfig) -> Result<ChatConnection, TwitchError> {
        if self.is_closed() {
            return Err(TwitchError::Closed);
        }
        ChatConnection::connect(config, self.inner.cancel.child_token()).await
    }

    /// Shut down: stop the HTTP session, cancel background work, then wait
    /// for spawned tasks. Safe to call more than once.
    pub async fn close(&self) {
        if self.inner.gateway.close() {
            tracing::info!("Closing Twitch client");
        }
        if !self.inner.cancel.is_cancelled() {
            self.inner.cancel.cancel();
        }

        let handles = std::mem::take(&mut *self.inner.tasks.lock().await);
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Background task ended abnormally");
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.gateway.is_closed()
    }

    fn require_scope(&self, scope: Scope) -> Result<(), TwitchError> {
        if self.inner.config.scopes.contains(&scope) {
            Ok(())
        } else {
            Err(TwitchError::MissingScope(scope))
        }
    }

    /// One batched GET for `path` with the normalized references appended.
    async fn lookup<P, I, R>(
        &self,
        path: &str,
        keys: QueryKeys,
        refs: I,
    ) -> Result<Vec<P>, TwitchError>
    where
        P: DeserializeOwned,
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let refs = collect_batch(refs)?;
        let query = build_query(keys, &refs)?;
        self.inner.gateway.get_data(&format!("{path}{query}")).await
    }

    async fn get_data<P: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<Vec<P>, TwitchError> {
        self.inner.gateway.get_data(path_and_query).await
    }
}

/// Query-encoded id of a reference that must be numeric (broadcaster or
/// user ids on channel-scoped endpoints).
fn id_param(reference: impl Into<Reference>, what: &str) -> Result<String, TwitchError> {
    let reference = reference.into();
    if reference.kind() != ReferenceKind::Id {
        return Err(TwitchError::Validation(format!(
            "{what} must be referenced by id, got '{}'",
            reference.value()
        )));
    }
    Ok(encode(reference.value()))
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
