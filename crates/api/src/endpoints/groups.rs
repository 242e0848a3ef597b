//! Group endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use homebase_common::AppResult;
use homebase_core::services::group::{member_ids_of, CreateGroupInput};
use homebase_db::entities::group;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Group response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub member_ids: Vec<String>,
    pub capacity: i32,
    pub is_private: bool,
    pub location_id: Option<String>,
    pub created_at: String,
}

impl From<group::Model> for GroupResponse {
    fn from(g: group::Model) -> Self {
        let member_ids = member_ids_of(&g);
        Self {
            id: g.id,
            name: g.name,
            owner_id: g.owner_id,
            member_ids,
            capacity: g.capacity,
            is_private: g.is_private,
            location_id: g.location_id,
            created_at: g.created_at.to_rfc3339(),
        }
    }
}

/// List all groups, newest first.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<GroupResponse>>> {
    let groups = state.group_service.list().await?;

    Ok(ApiResponse::ok(groups.into_iter().map(Into::into).collect()))
}

/// Get a group by ID.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<GroupResponse>> {
    let group = state.group_service.get(&id).await?;

    Ok(ApiResponse::ok(group.into()))
}

/// Create group request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(range(min = 1))]
    pub capacity: i32,

    #[serde(default)]
    pub is_private: bool,

    pub location_id: Option<String>,
}

/// Create a group; the owner is subscribed to it.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> AppResult<ApiResponse<GroupResponse>> {
    req.validate()?;

    let group = state
        .sync_service
        .create_group(
            &user.id,
            CreateGroupInput {
                name: req.name,
                capacity: req.capacity,
                is_private: req.is_private,
                location_id: req.location_id,
            },
        )
        .await?;

    Ok(ApiResponse::ok(group.into()))
}

/// Rename request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

/// Rename a group. Owner-only.
async fn rename(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameGroupRequest>,
) -> AppResult<ApiResponse<GroupResponse>> {
    req.validate()?;

    let group = state.group_service.rename(&id, &user.id, &req.name).await?;

    Ok(ApiResponse::ok(group.into()))
}

/// Membership change request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    pub user_id: String,
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Add a member, keeping the user's subscription list in step.
async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MemberRequest>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.sync_service.add_group_member(&id, &req.user_id).await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

/// Remove a member, keeping the user's subscription list in step.
async fn remove_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MemberRequest>,
) -> AppResult<ApiResponse<OkResponse>> {
    state
        .sync_service
        .remove_group_member(&id, &req.user_id)
        .await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

/// Disband a group, cascading its requests. Owner-only.
async fn disband(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.sync_service.disband_group(&id, &user.id).await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/members/add/{id}", put(add_member))
        .route("/members/remove/{id}", put(remove_member))
        .route("/{id}", get(show).put(rename).delete(disband))
}
