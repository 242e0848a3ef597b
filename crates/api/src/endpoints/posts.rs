//! Post endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use homebase_common::AppResult;
use homebase_core::services::post::{CreatePostInput, UpdatePostInput};
use homebase_db::entities::post;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Post response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub options: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            author_id: p.author_id,
            content: p.content,
            options: p.options,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Post list query.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by author username.
    pub author: Option<String>,
}

/// List posts, optionally filtered by author username.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = match query.author {
        Some(author) => {
            let user = state.user_service.get_by_username(&author).await?;
            state.post_service.get_by_author(&user.id).await?
        }
        None => state.post_service.list().await?,
    };

    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    pub options: Option<serde_json::Value>,
}

/// Create a new post.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state
        .post_service
        .create(
            &user.id,
            CreatePostInput {
                content: req.content,
                options: req.options,
            },
        )
        .await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Update post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub options: Option<serde_json::Value>,
}

/// Update a post. Author-only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state
        .post_service
        .update(
            &id,
            &user.id,
            UpdatePostInput {
                content: req.content,
                options: req.options,
            },
        )
        .await?;

    Ok(ApiResponse::ok(post.into()))
}

/// Ok response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

/// Delete a post. Author-only.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.post_service.delete(&id, &user.id).await?;

    Ok(ApiResponse::ok(OkResponse { ok: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", axum::routing::patch(update).delete(remove))
}
