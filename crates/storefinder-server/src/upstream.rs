//! HTTP client for the nearest-stores backend.
//!
//! The proxy never interprets backend responses beyond checking that the body
//! is JSON. Status and body bytes are handed back unchanged.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

const NEAREST_STORES_PATH: &str = "nearest-stores";

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, timeout, or a broken body stream.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered but its body is not JSON.
    #[error("invalid JSON from backend: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// A backend response captured verbatim.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Forwards nearest-stores queries to a fixed backend.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: Url,
}

impl UpstreamClient {
    /// Creates a client for `base_url`.
    ///
    /// `timeout_secs` of `None` keeps reqwest's default (no overall timeout).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UpstreamError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: Option<u64>) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder().user_agent("storefinder-proxy/0.1");
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(NEAREST_STORES_PATH))
            .map_err(|e| UpstreamError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }

    /// Builds the backend URL with the raw parameter values.
    pub(crate) fn nearest_stores_url(&self, lat: &str, lon: &str, radius_km: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", lat)
            .append_pair("lon", lon)
            .append_pair("radius_km", radius_km);
        url
    }

    /// Issues the backend GET and returns its status and body.
    ///
    /// Non-2xx statuses are not errors here; they are relayed as-is.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] when the request cannot complete and
    /// [`UpstreamError::InvalidBody`] when the body is not JSON.
    pub async fn nearest_stores(
        &self,
        lat: &str,
        lon: &str,
        radius_km: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.nearest_stores_url(lat, lon, radius_km);
        tracing::debug!(%url, "forwarding nearest-stores query");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        serde_json::from_slice::<serde::de::IgnoredAny>(&body)
            .map_err(UpstreamError::InvalidBody)?;

        Ok(UpstreamResponse { status, body })
    }
}
