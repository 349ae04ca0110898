mod proxy;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Fallback message when an upstream failure carries no text.
const PROXY_ERROR_FALLBACK: &str = "Proxy error";

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Flat `{"error": "..."}` body returned by the proxy route.
#[derive(Debug, Serialize)]
pub struct ProxyErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ProxyError {
    status: StatusCode,
    message: String,
}

impl ProxyError {
    pub fn missing_params() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Missing query parameters".to_string(),
        }
    }

    pub fn upstream(error: &UpstreamError) -> Self {
        let message = error.to_string();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: if message.trim().is_empty() {
                PROXY_ERROR_FALLBACK.to_string()
            } else {
                message
            },
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ProxyErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/proxy", get(proxy::proxy_nearest_stores))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(base_url: &str) -> Router {
        let upstream = UpstreamClient::new(base_url, Some(5)).expect("upstream client");
        build_app(AppState {
            upstream: Arc::new(upstream),
        })
    }

    async fn send_get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes")
            .to_vec()
    }

    /// A loopback address with nothing listening on it.
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        format!("http://{addr}")
    }

    #[test]
    fn missing_params_error_maps_to_bad_request() {
        let response = ProxyError::missing_params().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_returns_ok_with_request_id() {
        let app = app_for("http://127.0.0.1:5000");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header(REQUEST_ID_HEADER, "req-health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("req-health")
        );
        let json: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["meta"]["request_id"], "req-health");
    }

    #[tokio::test]
    async fn proxy_generates_request_id_when_absent() {
        let app = app_for("http://127.0.0.1:5000");
        let response = send_get(app, "/api/proxy").await;
        let id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .expect("request id header");
        assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
    }

    #[tokio::test]
    async fn proxy_rejects_each_missing_param_without_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        for uri in [
            "/api/proxy",
            "/api/proxy?lon=-75.0&radius_km=5",
            "/api/proxy?lat=40.0&radius_km=5",
            "/api/proxy?lat=40.0&lon=-75.0",
            "/api/proxy?lat=&lon=-75.0&radius_km=5",
        ] {
            let response = send_get(app_for(&server.uri()), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
            let json: serde_json::Value =
                serde_json::from_slice(&body_bytes(response).await).expect("json parse");
            assert_eq!(json["error"], "Missing query parameters", "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn proxy_relays_success_body_byte_for_byte() {
        let server = MockServer::start().await;
        let raw = r#"{"all_stores": [{"store_id": 1, "store_name": "Alpha", "latitude": 40.01, "longitude": -75.0, "distance_km": 1.2}],
 "closest_store": {"store_id": 1, "store_name": "Alpha", "latitude": 40.01, "longitude": -75.0, "distance_km": 1.2},
 "total_stores_found": 1}"#;

        Mock::given(method("GET"))
            .and(path("/nearest-stores"))
            .and(query_param("lat", "40.0"))
            .and(query_param("lon", "-75.0"))
            .and(query_param("radius_km", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(raw, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let response = send_get(
            app_for(&server.uri()),
            "/api/proxy?lat=40.0&lon=-75.0&radius_km=5",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(body_bytes(response).await, raw.as_bytes());
    }

    #[tokio::test]
    async fn proxy_passes_through_upstream_error_status() {
        let server = MockServer::start().await;
        let raw = r#"{"error": "Missing required query parameters: lat, lon, radius_km"}"#;

        Mock::given(method("GET"))
            .and(path("/nearest-stores"))
            .respond_with(ResponseTemplate::new(422).set_body_raw(raw, "application/json"))
            .mount(&server)
            .await;

        let response = send_get(
            app_for(&server.uri()),
            "/api/proxy?lat=abc&lon=-75.0&radius_km=5",
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_bytes(response).await, raw.as_bytes());
    }

    #[tokio::test]
    async fn proxy_returns_500_when_backend_unreachable() {
        let response = send_get(
            app_for(&closed_port_url()),
            "/api/proxy?lat=40.0&lon=-75.0&radius_km=5",
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("json parse");
        let message = json["error"].as_str().expect("error string");
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn proxy_returns_500_when_backend_body_is_not_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nearest-stores"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
            .mount(&server)
            .await;

        let response = send_get(
            app_for(&server.uri()),
            "/api/proxy?lat=40.0&lon=-75.0&radius_km=5",
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("json parse");
        assert!(json["error"]
            .as_str()
            .is_some_and(|m| m.starts_with("invalid JSON from backend")));
    }
}
