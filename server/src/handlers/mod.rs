use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::resources::{collection_uri, Link, Links};
use crate::state::AppState;
use crate::utils::response::{hal, success};

pub mod events;

pub use events::{create_event, get_event, list_events, update_event};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "events-api",
    };

    success(payload, "Health check successful").into_response()
}

#[derive(Serialize)]
struct IndexPayload {
    #[serde(rename = "_links")]
    links: Links,
}

/// Entry point listing the top-level resources.
pub async fn api_index(State(state): State<AppState>) -> Response {
    let mut links = Links::new();
    links.insert("events", Link::new(collection_uri(&state.base_url)));

    hal(StatusCode::OK, IndexPayload { links })
}
