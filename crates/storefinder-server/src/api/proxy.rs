use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{AppState, ProxyError};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProxyParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub radius_km: Option<String>,
}

impl ProxyParams {
    /// All three values, or `None` if any is absent or empty.
    fn required(&self) -> Option<(&str, &str, &str)> {
        Some((
            present(self.lat.as_deref())?,
            present(self.lon.as_deref())?,
            present(self.radius_km.as_deref())?,
        ))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `GET /api/proxy`: forwards `lat`, `lon`, `radius_km` to the backend and
/// relays its status and body unchanged.
pub(super) async fn proxy_nearest_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ProxyParams>,
) -> Result<Response, ProxyError> {
    let Some((lat, lon, radius_km)) = params.required() else {
        tracing::info!(request_id = %req_id.0, "rejecting proxy request with missing parameters");
        return Err(ProxyError::missing_params());
    };

    let upstream = state
        .upstream
        .nearest_stores(lat, lon, radius_km)
        .await
        .map_err(|e| {
            tracing::warn!(request_id = %req_id.0, error = %e, "nearest-stores backend call failed");
            ProxyError::upstream(&e)
        })?;

    tracing::info!(
        request_id = %req_id.0,
        status = upstream.status.as_u16(),
        bytes = upstream.body.len(),
        "relaying nearest-stores response"
    );

    let status =
        StatusCode::from_u16(upstream.status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response())
}
