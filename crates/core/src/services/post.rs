//! Post service.

use homebase_common::{AppError, AppResult, IdGenerator};
use homebase_db::{entities::post, repositories::PostRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

/// Input for creating a post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 4096))]
    pub content: String,

    /// Presentation options, stored as-is.
    pub options: Option<serde_json::Value>,
}

/// Input for updating a post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    #[validate(length(min = 1, max = 4096))]
    pub content: Option<String>,

    pub options: Option<serde_json::Value>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository) -> Self {
        Self {
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post.
    pub async fn create(&self, author_id: &str, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            content: Set(input.content),
            options: Set(input.options),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.post_repo.create(model).await
    }

    /// Update a post. Author-only.
    pub async fn update(
        &self,
        post_id: &str,
        actor_id: &str,
        input: UpdatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        let post = self.assert_author(post_id, actor_id).await?;

        let mut active: post::ActiveModel = post.into();
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(options) = input.options {
            active.options = Set(Some(options));
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Delete a post. Author-only.
    pub async fn delete(&self, post_id: &str, actor_id: &str) -> AppResult<()> {
        self.assert_author(post_id, actor_id).await?;
        self.post_repo.delete(post_id).await
    }

    /// List all posts, newest first.
    pub async fn list(&self) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_all().await
    }

    /// List posts by an author, newest first.
    pub async fn get_by_author(&self, author_id: &str) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_by_author(author_id).await
    }

    /// Assert the actor authored the post, returning it.
    async fn assert_author(&self, post_id: &str, actor_id: &str) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.author_id != actor_id {
            return Err(AppError::Forbidden(format!(
                "User {actor_id} is not the author of post {post_id}"
            )));
        }
        Ok(post)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_post(id: &str, author: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: author.to_string(),
            content: "hello".to_string(),
            options: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_delete_rejects_non_author() {
        let post = test_post("p1", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );

        let service = PostService::new(PostRepository::new(db));
        let err = service.delete("p1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = PostService::new(PostRepository::new(db));
        let err = service
            .update(
                "missing",
                "u1",
                UpdatePostInput {
                    content: Some("new".to_string()),
                    options: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
