//! Request repository.

use std::sync::Arc;

use crate::entities::request::{RequestCategory, RequestStatus};
use crate::entities::{request, Request};
use homebase_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};

/// Request repository for database operations.
#[derive(Clone)]
pub struct RequestRepository {
    db: Arc<DatabaseConnection>,
}

impl RequestRepository {
    /// Create a new request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<request::Model>> {
        Request::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a request by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<request::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request not found: {id}")))
    }

    /// Find the pending request for a (sender, resource, category) triple.
    ///
    /// At most one such record exists (backed by a partial unique index).
    pub async fn find_pending(
        &self,
        sender_id: &str,
        resource_id: &str,
        category: RequestCategory,
    ) -> AppResult<Option<request::Model>> {
        Request::find()
            .filter(request::Column::SenderId.eq(sender_id))
            .filter(request::Column::ResourceId.eq(resource_id))
            .filter(request::Column::Category.eq(category))
            .filter(request::Column::Status.eq(RequestStatus::Pending))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find requests where the user is sender or recipient, optionally
    /// filtered by category.
    pub async fn find_for_user(
        &self,
        user_id: &str,
        category: Option<RequestCategory>,
    ) -> AppResult<Vec<request::Model>> {
        let mut query = Request::find().filter(
            Condition::any()
                .add(request::Column::SenderId.eq(user_id))
                .add(request::Column::RecipientId.eq(user_id)),
        );

        if let Some(category) = category {
            query = query.filter(request::Column::Category.eq(category));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all requests for a resource/category pair, any status.
    pub async fn find_by_resource(
        &self,
        resource_id: &str,
        category: RequestCategory,
    ) -> AppResult<Vec<request::Model>> {
        Request::find()
            .filter(request::Column::ResourceId.eq(resource_id))
            .filter(request::Column::Category.eq(category))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new request.
    pub async fn create(&self, model: request::ActiveModel) -> AppResult<request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a request.
    pub async fn update(&self, model: request::ActiveModel) -> AppResult<request::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a request.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let request = self.find_by_id(id).await?;
        if let Some(r) = request {
            r.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Delete every request sent by a user.
    pub async fn delete_by_sender(&self, sender_id: &str) -> AppResult<u64> {
        let result = Request::delete_many()
            .filter(request::Column::SenderId.eq(sender_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Delete every request addressed to a user.
    pub async fn delete_by_recipient(&self, recipient_id: &str) -> AppResult<u64> {
        let result = Request::delete_many()
            .filter(request::Column::RecipientId.eq(recipient_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Delete every request referencing a resource under a category.
    pub async fn delete_by_resource(
        &self,
        resource_id: &str,
        category: RequestCategory,
    ) -> AppResult<u64> {
        let result = Request::delete_many()
            .filter(request::Column::ResourceId.eq(resource_id))
            .filter(request::Column::Category.eq(category))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_request(id: &str, sender: &str, recipient: &str) -> request::Model {
        request::Model {
            id: id.to_string(),
            sender_id: sender.to_string(),
            recipient_id: recipient.to_string(),
            resource_id: recipient.to_string(),
            category: RequestCategory::Friend,
            status: RequestStatus::Pending,
            message: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_pending() {
        let req = test_request("r1", "u1", "u2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[req]])
                .into_connection(),
        );

        let repo = RequestRepository::new(db);
        let found = repo
            .find_pending("u1", "u2", RequestCategory::Friend)
            .await
            .unwrap();

        assert!(found.is_some());
        assert_eq!(found.unwrap().status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<request::Model>::new()])
                .into_connection(),
        );

        let repo = RequestRepository::new(db);
        let err = repo.get_by_id("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
