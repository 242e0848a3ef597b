//! Friendship repository.

use std::sync::Arc;

use crate::entities::{friendship, Friendship};
use homebase_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};

/// Friendship repository for database operations.
#[derive(Clone)]
pub struct FriendshipRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendshipRepository {
    /// Create a new friendship repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the friendship edge between two users, in either orientation.
    pub async fn find_between(
        &self,
        user1_id: &str,
        user2_id: &str,
    ) -> AppResult<Option<friendship::Model>> {
        Friendship::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(friendship::Column::User1Id.eq(user1_id))
                            .add(friendship::Column::User2Id.eq(user2_id)),
                    )
                    .add(
                        Condition::all()
                            .add(friendship::Column::User1Id.eq(user2_id))
                            .add(friendship::Column::User2Id.eq(user1_id)),
                    ),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all friendship edges touching a user.
    pub async fn find_for_user(&self, user_id: &str) -> AppResult<Vec<friendship::Model>> {
        Friendship::find()
            .filter(
                Condition::any()
                    .add(friendship::Column::User1Id.eq(user_id))
                    .add(friendship::Column::User2Id.eq(user_id)),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new friendship edge.
    pub async fn create(&self, model: friendship::ActiveModel) -> AppResult<friendship::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete the friendship edge between two users. Returns whether an
    /// edge existed.
    pub async fn delete_between(&self, user1_id: &str, user2_id: &str) -> AppResult<bool> {
        let edge = self.find_between(user1_id, user2_id).await?;
        match edge {
            Some(e) => {
                e.delete(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_edge(id: &str, user1: &str, user2: &str) -> friendship::Model {
        friendship::Model {
            id: id.to_string(),
            user1_id: user1.to_string(),
            user2_id: user2.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_between() {
        let edge = test_edge("f1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[edge]])
                .into_connection(),
        );

        let repo = FriendshipRepository::new(db);
        let found = repo.find_between("u2", "u1").await.unwrap();

        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_find_for_user() {
        let e1 = test_edge("f1", "u1", "u2");
        let e2 = test_edge("f2", "u3", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .into_connection(),
        );

        let repo = FriendshipRepository::new(db);
        let found = repo.find_for_user("u1").await.unwrap();

        assert_eq!(found.len(), 2);
    }
}
