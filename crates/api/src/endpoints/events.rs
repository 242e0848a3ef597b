//! Event endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use homebase_common::{AppError, AppResult};
use homebase_core::services::event::{attendee_ids_of, CreateEventInput, EventTimeFilter};
use homebase_db::entities::event;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Event response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub name: String,
    pub group_id: String,
    pub host_id: String,
    pub attendee_ids: Vec<String>,
    pub capacity: i32,
    pub starts_at: String,
    pub ends_at: String,
    pub location_id: String,
}

impl From<event::Model> for EventResponse {
    fn from(e: event::Model) -> Self {
        let attendee_ids = attendee_ids_of(&e);
        Self {
            id: e.id,
            name: e.name,
            group_id: e.group_id,
            host_id: e.host_id,
            attendee_ids,
            capacity: e.capacity,
            starts_at: e.starts_at.to_rfc3339(),
            ends_at: e.ends_at.to_rfc3339(),
            location_id: e.location_id,
        }
    }
}

/// Create event request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1))]
    pub group_id: String,

    #[validate(range(min = 1))]
    pub capacity: i32,

    #[validate(length(min = 1))]
    pub location_id: String,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,
}

/// Create a new event. The session user becomes its host.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<ApiResponse<EventResponse>> {
    req.validate()?;

    let event = state
        .sync_service
        .create_event(
            &user.id,
            CreateEventInput {
                name: req.name,
                group_id: req.group_id,
                capacity: req.capacity,
                location_id: req.location_id,
                starts_at: req.starts_at,
                ends_at: req.ends_at,
            },
        )
        .await?;

    Ok(ApiResponse::ok(event.into()))
}

/// List all events, latest start first.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let events = state.event_service.list(None).await?;

    Ok(ApiResponse::ok(events.into_iter().map(Into::into).collect()))
}

/// Event name query.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// List events whose name contains the query, case-insensitively.
async fn list_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let events = state.event_service.get_by_name(&query.name).await?;

    Ok(ApiResponse::ok(events.into_iter().map(Into::into).collect()))
}

/// List events narrowed to a time window (`upcoming` or `past`).
///
/// Shares the `/{id}` path position; the segment here is a filter name,
/// not an event ID.
async fn list_filtered(
    State(state): State<AppState>,
    Path(filter): Path<String>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let filter: EventTimeFilter = filter.parse().map_err(|()| {
        AppError::BadRequest(format!(
            "Unknown event filter: {filter} (expected upcoming or past)"
        ))
    })?;

    let events = state.event_service.list(Some(filter)).await?;

    Ok(ApiResponse::ok(events.into_iter().map(Into::into).collect()))
}

/// Rename request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameEventRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
}

/// Rename an event. Host-only.
async fn rename(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameEventRequest>,
) -> AppResult<ApiResponse<EventResponse>> {
    req.validate()?;

    let event = state.event_service.rename(&id, &user.id, &req.name).await?;

    Ok(ApiResponse::ok(event.into()))
}

/// Register the session user as an attendee.
async fn register(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.register(&id, &user.id).await?;

    Ok(ApiResponse::ok(event.into()))
}

/// Remove the session user from the attendee list.
async fn unregister(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.unregister(&id, &user.id).await?;

    Ok(ApiResponse::ok(event.into()))
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Delete an event, cascading its requests. Host-only.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.sync_service.delete_event(&id, &user.id).await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/name", get(list_by_name))
        .route("/register/{id}", put(register))
        .route("/unregister/{id}", put(unregister))
        .route("/{id}", get(list_filtered).put(rename).delete(remove))
}
