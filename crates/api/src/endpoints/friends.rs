//! Friend endpoints.

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use homebase_common::AppResult;
use homebase_db::entities::request::RequestCategory;
use serde::Serialize;

use crate::endpoints::requests::RequestResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// List the session user's friends as usernames.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<String>>> {
    let friend_ids = state.friendship_service.get_friends(&user.id).await?;
    let usernames = state.user_service.ids_to_usernames(&friend_ids).await?;

    Ok(ApiResponse::ok(usernames))
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Unfriend a user, addressed by username.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<ApiResponse<OkResponse>> {
    let friend = state.user_service.get_by_username(&username).await?;
    state
        .friendship_service
        .remove_friend(&user.id, &friend.id)
        .await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

/// List the session user's friend requests, sent and received.
async fn requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RequestResponse>>> {
    let requests = state
        .request_service
        .get_for_user(&user.id, Some(RequestCategory::Friend))
        .await?;

    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/requests", get(requests))
        .route("/{username}", delete(remove))
}
