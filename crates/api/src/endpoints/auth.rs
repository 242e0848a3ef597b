//! Session endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use homebase_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::endpoints::UserResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Authenticate by email and password, issuing a fresh session token.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let (user, token) = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(ApiResponse::ok(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// Logout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub ok: bool,
}

/// End the current session by clearing the token.
async fn logout(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<LogoutResponse>> {
    state.user_service.end_session(&user.id).await?;

    Ok(ApiResponse::ok(LogoutResponse { ok: true }))
}

/// Return the current session user.
async fn session(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}
