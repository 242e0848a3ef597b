//! Location endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use homebase_common::AppResult;
use homebase_core::services::location::CreateLocationInput;
use homebase_db::entities::location;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Location response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl From<location::Model> for LocationResponse {
    fn from(l: location::Model) -> Self {
        Self {
            id: l.id,
            name: l.name,
            lat: l.lat,
            lng: l.lng,
            street: l.street,
            city: l.city,
            state: l.state,
            country: l.country,
            postal_code: l.postal_code,
        }
    }
}

/// Location list query.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// List locations, optionally filtered by city and/or state.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<LocationResponse>>> {
    let locations = match (query.city, query.state) {
        (Some(city), Some(st)) => state.location_service.get_by_city(&city, &st).await?,
        (None, Some(st)) => state.location_service.get_by_state(&st).await?,
        _ => state.location_service.list().await?,
    };

    Ok(ApiResponse::ok(
        locations.into_iter().map(Into::into).collect(),
    ))
}

/// Create location request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// Create a new location.
async fn create(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> AppResult<ApiResponse<LocationResponse>> {
    req.validate()?;

    let location = state
        .location_service
        .create(CreateLocationInput {
            name: req.name,
            lat: req.lat,
            lng: req.lng,
            street: req.street,
            city: req.city,
            state: req.state,
            country: req.country,
            postal_code: req.postal_code,
        })
        .await?;

    Ok(ApiResponse::ok(location.into()))
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Delete a location.
async fn remove(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.location_service.delete(&id).await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", delete(remove))
}
