//! HTTP client for the store finder proxy route.
//!
//! Wraps `reqwest` with the proxy's error conventions: non-success statuses
//! carry a `{"error": "..."}` body, and success bodies must decode into a
//! [`QueryResult`] with unique store ids.

use std::future::Future;

use reqwest::{Client, StatusCode, Url};
use storefinder_core::{QueryInput, QueryResult};

use crate::error::ClientError;

const PROXY_PATH: &str = "api/proxy";

/// Anything that can answer a nearest-stores query for the client view.
pub trait StoreSource {
    fn nearest_stores(
        &self,
        input: &QueryInput,
    ) -> impl Future<Output = Result<QueryResult, ClientError>> + Send;
}

/// Client for `GET /api/proxy`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    endpoint: Url,
}

impl ProxyClient {
    /// Creates a client for the proxy server at `base_url`.
    ///
    /// No request timeout is configured; reqwest's defaults apply.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("storefinder-cli/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(PROXY_PATH))
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }

    pub(crate) fn build_url(&self, input: &QueryInput) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in input.query_pairs() {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

impl StoreSource for ProxyClient {
    /// Sends the query through the proxy and parses the result.
    ///
    /// Errors:
    /// - [`ClientError::Http`] when the proxy is unreachable.
    /// - [`ClientError::Api`] on a non-success status.
    /// - [`ClientError::Deserialize`] / [`ClientError::DuplicateStore`] when a
    ///   success body has the wrong shape.
    async fn nearest_stores(&self, input: &QueryInput) -> Result<QueryResult, ClientError> {
        let url = self.build_url(input);
        tracing::debug!(%url, "querying store finder proxy");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Api(api_error_message(status, &body)));
        }

        let result: QueryResult = serde_json::from_slice(&body).map_err(ClientError::Deserialize)?;
        if let Some(id) = result.duplicate_store_id() {
            return Err(ClientError::DuplicateStore(id));
        }
        Ok(result)
    }
}

/// Picks the message for a non-success proxy response.
///
/// Prefers a non-empty string `error` field; otherwise falls back to
/// `API error: <code> <reason>`.
pub(crate) fn api_error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(serde_json::Value::as_str)
                .filter(|m| !m.is_empty())
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| {
            format!(
                "API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
            .trim_end()
            .to_string()
        })
}
