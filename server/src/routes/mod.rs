use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{
    api_index, create_event, get_event, health_check, list_events, update_event,
};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api", get(api_index))
        .route("/api/events", post(create_event).get(list_events))
        .route("/api/events/:id", get(get_event).put(update_event))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(config))
        .layer(create_cors_layer(&config.cors_allowed_origins))
}
