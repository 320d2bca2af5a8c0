//! Twitch Helix REST gateway.
//!
//! Issues GET requests against the Helix root with Client-Id and Bearer
//! header injection and decodes the `{ "data": [...] }` envelope. Resource
//! semantics live in [`crate::client`].

mod request;

use std::sync::atomic::AtomicBool;

use serde::Deserialize;

use crate::auth::TokenSlot;

/// Wrapper for Twitch Helix list responses.
#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    pub data: Vec<T>,
}

/// HTTP session shared by every facade call.
pub struct HelixGateway {
    pub(super) http: reqwest::Client,
    pub(super) client_id: String,
    pub(super) base: String,
    pub(super) token: TokenSlot,
    pub(super) closed: AtomicBool,
}
