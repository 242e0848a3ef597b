//! Request endpoints.
//!
//! The URL category segment selects the side-effect branch; the
//! synchronization service resolves recipients and applies acceptance
//! effects.

use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use homebase_common::AppResult;
use homebase_core::SyncService;
use homebase_db::entities::request;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Request response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub resource_id: String,
    pub category: request::RequestCategory,
    pub status: request::RequestStatus,
    pub message: Option<String>,
    pub created_at: String,
}

impl From<request::Model> for RequestResponse {
    fn from(r: request::Model) -> Self {
        Self {
            id: r.id,
            sender_id: r.sender_id,
            recipient_id: r.recipient_id,
            resource_id: r.resource_id,
            category: r.category,
            status: r.status,
            message: r.message,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Open request body.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequestBody {
    #[validate(length(max = 2048))]
    pub message: Option<String>,
}

/// Open a request for a resource under a category.
async fn open(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    body: Option<Json<OpenRequestBody>>,
) -> AppResult<ApiResponse<RequestResponse>> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    body.validate()?;

    let resource = SyncService::parse_resource(&category, id)?;
    let request = state
        .sync_service
        .open_request(&user.id, resource, body.message)
        .await?;

    Ok(ApiResponse::ok(request.into()))
}

/// List the session user's requests, sent and received.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RequestResponse>>> {
    let requests = state.request_service.get_for_user(&user.id, None).await?;

    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

/// List requests for a resource under a category, any status.
async fn list_by_resource(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Vec<RequestResponse>>> {
    let resource = SyncService::parse_resource(&category, id)?;
    let requests = state
        .request_service
        .get_by_resource(resource.resource_id(), resource.category())
        .await?;

    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

/// Accept a request, triggering the category-specific side effect.
async fn accept(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<ApiResponse<RequestResponse>> {
    let request = state
        .sync_service
        .accept_request(&request_id, &user.id)
        .await?;

    Ok(ApiResponse::ok(request.into()))
}

/// Decline a request. No side effects.
async fn decline(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<ApiResponse<RequestResponse>> {
    let request = state
        .sync_service
        .decline_request(&request_id, &user.id)
        .await?;

    Ok(ApiResponse::ok(request.into()))
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Withdraw a request. Sender-only.
async fn withdraw(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<ApiResponse<OkResponse>> {
    state
        .sync_service
        .withdraw_request(&request_id, &user.id)
        .await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/accept/{request_id}", put(accept))
        .route("/decline/{request_id}", put(decline))
        .route("/{category}/{id}", get(list_by_resource).post(open))
        .route("/{request_id}", delete(withdraw))
}
