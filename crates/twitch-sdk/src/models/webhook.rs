use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::parse_timestamp;

/// Entry from GET /helix/webhooks/subscriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub topic: String,
    pub callback: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// A webhook subscription, identified by topic and callback.
#[derive(Debug, Clone)]
pub struct Webhook {
    topic: String,
    callback: String,
    expires_at: DateTime<Utc>,
}

impl From<WebhookPayload> for Webhook {
    fn from(data: WebhookPayload) -> Self {
        Self {
            topic: data.topic,
            callback: data.callback,
            expires_at: parse_timestamp(data.expires_at.as_deref()),
        }
    }
}

impl Webhook {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn callback(&self) -> &str {
        &self.callback
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl PartialEq for Webhook {
    fn eq(&self, other: &Self) -> bool {
        self.topic == other.topic && self.callback == other.callback
    }
}

impl Eq for Webhook {}

impl fmt::Display for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.topic)
    }
}
