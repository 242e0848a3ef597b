//! User endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use homebase_common::AppResult;
use homebase_core::services::user::{group_ids_of, CreateUserInput};
use homebase_db::entities::user;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User response. Credentials are never exposed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub group_ids: Vec<String>,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        let group_ids = group_ids_of(&u);
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            group_ids,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 256))]
    pub email: String,
}

/// Create a new user account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;

    let user = state
        .user_service
        .create(CreateUserInput {
            username: req.username,
            password: req.password,
            email: req.email,
        })
        .await?;

    Ok(ApiResponse::ok(user.into()))
}

/// List all users.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list().await?;

    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Get a user by ID.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get(&id).await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Look up a user by email.
async fn validate_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.get_by_email(&email).await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Username change request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsernameRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,
}

/// Change the session user's username.
async fn update_username(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateUsernameRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    req.validate()?;

    let user = state
        .user_service
        .update_username(&user.id, &req.username)
        .await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Password change request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, max = 128))]
    pub current_password: String,

    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Change the session user's password.
async fn update_password(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> AppResult<ApiResponse<OkResponse>> {
    req.validate()?;

    state
        .user_service
        .update_password(&user.id, &req.current_password, &req.new_password)
        .await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

/// Delete the session user's account, cascading their requests.
async fn delete_account(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.sync_service.delete_user(&user.id).await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(register).delete(delete_account))
        .route("/validate/{email}", get(validate_email))
        .route("/username", patch(update_username))
        .route("/password", patch(update_password))
        .route("/{id}", get(show))
}
