use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::Json;

use crate::models::EventSubmission;
use crate::repository::PageRequest;
use crate::resources::{event_uri, EventResource, PagedEventResources, Profile};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::hal;
use crate::validation::FieldError;

fn read_body(
    payload: Result<Json<EventSubmission>, JsonRejection>,
) -> Result<EventSubmission, AppError> {
    match payload {
        Ok(Json(submission)) => Ok(submission),
        Err(rejection) => Err(AppError::ValidationError(vec![FieldError::object(
            "malformed",
            rejection.body_text(),
        )])),
    }
}

/// Ids that do not parse can never match an event.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("event '{}'", raw)))
}

pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventSubmission>, JsonRejection>,
) -> Result<Response, AppError> {
    let submission = read_body(payload)?;
    let event = state.events.create(submission).await?;

    let location = HeaderValue::from_str(&event_uri(&state.base_url, event.id))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let mut response = hal(
        StatusCode::CREATED,
        EventResource::new(&state.base_url, event, Profile::Create),
    );
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let request = PageRequest::from_query(
        params.get("page").map(String::as_str),
        params.get("size").map(String::as_str),
        params.get("sort").map(String::as_str),
    );

    let page = state.events.list(&request).await?;
    Ok(hal(
        StatusCode::OK,
        PagedEventResources::new(&state.base_url, page, &request),
    ))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let event = state
        .events
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", id)))?;

    Ok(hal(
        StatusCode::OK,
        EventResource::new(&state.base_url, event, Profile::Get),
    ))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventSubmission>, JsonRejection>,
) -> Result<Response, AppError> {
    let submission = read_body(payload)?;
    let id = parse_id(&id)?;
    let event = state
        .events
        .update(id, submission)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", id)))?;

    Ok(hal(
        StatusCode::OK,
        EventResource::new(&state.base_url, event, Profile::Update),
    ))
}
