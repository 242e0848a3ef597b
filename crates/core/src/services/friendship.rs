//! Friendship service.

use homebase_common::{AppError, AppResult, IdGenerator};
use homebase_db::{entities::friendship, repositories::FriendshipRepository};
use sea_orm::Set;

/// Friendship service for business logic.
#[derive(Clone)]
pub struct FriendshipService {
    friendship_repo: FriendshipRepository,
    id_gen: IdGenerator,
}

impl FriendshipService {
    /// Create a new friendship service.
    #[must_use]
    pub const fn new(friendship_repo: FriendshipRepository) -> Self {
        Self {
            friendship_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a friendship edge between two users.
    pub async fn add_friend(&self, user1_id: &str, user2_id: &str) -> AppResult<friendship::Model> {
        self.assert_not_friends(user1_id, user2_id).await?;

        let model = friendship::ActiveModel {
            id: Set(self.id_gen.generate()),
            user1_id: Set(user1_id.to_string()),
            user2_id: Set(user2_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.friendship_repo.create(model).await
    }

    /// Remove the friendship edge between two users.
    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        let removed = self.friendship_repo.delete_between(user_id, friend_id).await?;
        if !removed {
            return Err(AppError::NotFound(format!(
                "Friendship between {user_id} and {friend_id} does not exist"
            )));
        }
        Ok(())
    }

    /// List the IDs of a user's friends (the other endpoint of each edge).
    pub async fn get_friends(&self, user_id: &str) -> AppResult<Vec<String>> {
        let edges = self.friendship_repo.find_for_user(user_id).await?;

        Ok(edges
            .into_iter()
            .map(|edge| {
                if edge.user1_id == user_id {
                    edge.user2_id
                } else {
                    edge.user1_id
                }
            })
            .collect())
    }

    /// Assert that two users are not already friends (and are distinct).
    pub async fn assert_not_friends(&self, user1_id: &str, user2_id: &str) -> AppResult<()> {
        let edge = self.friendship_repo.find_between(user1_id, user2_id).await?;
        if edge.is_some() || user1_id == user2_id {
            return Err(AppError::Forbidden(format!(
                "{user1_id} and {user2_id} are already friends"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_edge(id: &str, user1: &str, user2: &str) -> friendship::Model {
        friendship::Model {
            id: id.to_string(),
            user1_id: user1.to_string(),
            user2_id: user2.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_add_friend_rejects_existing_edge() {
        let edge = test_edge("f1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[edge]])
                .into_connection(),
        );

        let service = FriendshipService::new(FriendshipRepository::new(db));
        let err = service.add_friend("u1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_add_friend_rejects_self() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friendship::Model>::new()])
                .into_connection(),
        );

        let service = FriendshipService::new(FriendshipRepository::new(db));
        let err = service.add_friend("u1", "u1").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_get_friends_returns_other_endpoint() {
        let e1 = test_edge("f1", "u1", "u2");
        let e2 = test_edge("f2", "u3", "u1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[e1, e2]])
                .into_connection(),
        );

        let service = FriendshipService::new(FriendshipRepository::new(db));
        let friends = service.get_friends("u1").await.unwrap();

        assert_eq!(friends, vec!["u2".to_string(), "u3".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_friend_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friendship::Model>::new()])
                .into_connection(),
        );

        let service = FriendshipService::new(FriendshipRepository::new(db));
        let err = service.remove_friend("u1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
