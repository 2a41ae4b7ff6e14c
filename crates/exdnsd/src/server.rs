// # Webhook HTTP surface
//
// Routes of the external-dns webhook protocol:
//
// - `GET /`                 negotiation, returns the domain filter
// - `GET /healthz`          liveness
// - `GET /records`          current endpoints
// - `POST /records`         apply a change set (204 on success)
// - `POST /adjustendpoints` adjust desired endpoints
//
// Handlers only decode, delegate to the Provider and encode. Nothing here
// knows about zones or Porkbun.
//
// Request bodies must arrive within `REQUEST_BODY_TIMEOUT`.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use exdns_core::{Changes, Endpoint, Provider};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::RequestBodyTimeoutLayer;
use tracing::{debug, error};

/// Media type of every webhook payload
pub const MEDIA_TYPE: &str = "application/external.dns.webhook+json;version=1";

/// Time allowed for a client to deliver a request body
pub const REQUEST_BODY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handler state
pub type SharedProvider = Arc<dyn Provider>;

/// Build the webhook router around a provider
pub fn router(provider: SharedProvider) -> Router {
    router_with_body_timeout(provider, REQUEST_BODY_TIMEOUT)
}

fn router_with_body_timeout(provider: SharedProvider, body_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(negotiate))
        .route("/healthz", get(health))
        .route("/records", get(records).post(apply_changes))
        .route("/adjustendpoints", post(adjust_endpoints))
        .layer(RequestBodyTimeoutLayer::new(body_timeout))
        .with_state(provider)
}

async fn negotiate(State(provider): State<SharedProvider>) -> Response {
    webhook_json(provider.domain_filter())
}

async fn health() -> &'static str {
    "OK"
}

async fn records(State(provider): State<SharedProvider>) -> Response {
    match provider.records().await {
        Ok(endpoints) => {
            debug!("Returning {} endpoint(s)", endpoints.len());
            webhook_json(&endpoints)
        }
        Err(e) => provider_error("list records", e),
    }
}

async fn apply_changes(State(provider): State<SharedProvider>, body: Bytes) -> Response {
    let changes: Changes = match serde_json::from_slice(&body) {
        Ok(changes) => changes,
        Err(e) => return bad_request("changes", e),
    };

    debug!("Received {} change(s)", changes.len());

    match provider.apply_changes(&changes).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => provider_error("apply changes", e),
    }
}

async fn adjust_endpoints(State(provider): State<SharedProvider>, body: Bytes) -> Response {
    let endpoints: Vec<Endpoint> = match serde_json::from_slice(&body) {
        Ok(endpoints) => endpoints,
        Err(e) => return bad_request("endpoints", e),
    };

    match provider.adjust_endpoints(endpoints).await {
        Ok(adjusted) => webhook_json(&adjusted),
        Err(e) => provider_error("adjust endpoints", e),
    }
}

/// Encode a payload with the webhook media type
fn webhook_json<T: Serialize + ?Sized>(value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, MEDIA_TYPE),
                (header::VARY, "Content-Type"),
            ],
            body,
        )
            .into_response(),
        Err(e) => provider_error("encode response", e.into()),
    }
}

fn bad_request(what: &str, e: serde_json::Error) -> Response {
    debug!("Rejecting malformed {} body: {}", what, e);
    (StatusCode::BAD_REQUEST, format!("invalid {} body: {}", what, e)).into_response()
}

fn provider_error(operation: &str, e: exdns_core::Error) -> Response {
    error!("Failed to {}: {}", operation, e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
