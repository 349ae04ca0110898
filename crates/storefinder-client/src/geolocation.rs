//! Current-position lookup for the "use current location" action.

use std::future::Future;

use reqwest::Client;
use serde::Deserialize;

use crate::error::GeolocationError;

/// A single position fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the host's current position. One-shot, no tracking.
pub trait Geolocator {
    fn current_position(&self) -> impl Future<Output = Result<Position, GeolocationError>> + Send;
}

/// A platform without any position provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Position provider reached over HTTP.
///
/// Expects a JSON object with `latitude` and `longitude` fields, which is the
/// shape most IP-geolocation services return. Extra fields are ignored.
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    client: Client,
    url: String,
}

impl HttpGeolocator {
    /// # Errors
    ///
    /// Returns [`GeolocationError::Http`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(url: &str) -> Result<Self, GeolocationError> {
        let client = Client::builder()
            .user_agent("storefinder-cli/0.1")
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl Geolocator for HttpGeolocator {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(GeolocationError::Deserialize)
    }
}

/// Geolocation chosen at startup: HTTP when a provider URL is configured,
/// unsupported otherwise.
#[derive(Debug, Clone)]
pub enum ConfiguredGeolocator {
    Http(HttpGeolocator),
    Unsupported,
}

impl ConfiguredGeolocator {
    /// # Errors
    ///
    /// Returns [`GeolocationError::Http`] if the HTTP client cannot be built.
    pub fn from_url(url: Option<&str>) -> Result<Self, GeolocationError> {
        match url {
            Some(url) => Ok(Self::Http(HttpGeolocator::new(url)?)),
            None => Ok(Self::Unsupported),
        }
    }
}

impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        match self {
            Self::Http(geo) => geo.current_position().await,
            Self::Unsupported => Err(GeolocationError::Unsupported),
        }
    }
}
