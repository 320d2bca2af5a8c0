use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::*;
use crate::TwitchError;

impl HelixGateway {
    pub fn new(client_id: String, base: String, token: TokenSlot) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            base: base.trim_end_matches('/').to_string(),
            token,
            closed: AtomicBool::new(false),
        }
    }

    /// Build Client-Id and, when a token is held, Bearer headers.
    async fn auth_headers(&self) -> Result<HeaderMap, TwitchError> {
        let mut headers = HeaderMap::new();
        headers.insert("Client-Id", header_value(&self.client_id)?);
        if let Some(token) = self.token.read().await.as_ref() {
            let bearer = format!("Bearer {}", token.access_token);
            headers.insert(AUTHORIZATION, header_value(&bearer)?);
        }
        Ok(headers)
    }

    /// Execute a GET for `path_and_query` (e.g. `/users?id=1`).
    ///
    /// Non-success statuses are logged and returned as
    /// [`TwitchError::ApiError`]; the body is not treated as data.
    pub async fn get(&self, path_and_query: &str) -> Result<String, TwitchError> {
        if self.is_closed() {
            return Err(TwitchError::Closed);
        }

        let url = format!("{}{path_and_query}", self.base);
        let headers = self.auth_headers().await?;
        tracing::debug!(url, "Helix GET");
        let resp = self.http.get(&url).headers(headers).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(url, "Got 401, token is missing or expired");
        } else if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Helix request failed");
        }

        if !status.is_success() {
            return Err(TwitchError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    /// GET and decode the `data` array.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<Vec<T>, TwitchError> {
        let body = self.get(path_and_query).await?;
        let resp: HelixResponse<T> = serde_json::from_str(&body)?;
        Ok(resp.data)
    }

    /// Refuse further requests. Returns `false` if already closed.
    pub fn close(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TwitchError> {
    HeaderValue::from_str(value)
        .map_err(|_| TwitchError::Validation("header value contains invalid characters".into()))
}
