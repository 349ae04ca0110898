use thiserror::Error;

/// Errors returned by [`ProxyClient`](crate::ProxyClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The proxy could not be reached or the response stream broke.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-success status. Holds the body's
    /// `error` field, or `API error: <status> <reason>` when there is none.
    #[error("{0}")]
    Api(String),

    /// A success body that does not match the expected result shape.
    #[error("unexpected response shape: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// A success body listing the same store twice.
    #[error("unexpected response shape: store_id {0} appears more than once")]
    DuplicateStore(i64),

    #[error("invalid proxy URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors returned by a [`Geolocator`](crate::Geolocator).
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// No position provider is available.
    #[error("geolocation is not supported")]
    Unsupported,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("position provider returned HTTP {0}")]
    Status(u16),

    #[error("position provider returned an unreadable position: {0}")]
    Deserialize(#[source] serde_json::Error),
}
