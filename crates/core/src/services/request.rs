//! Request service.
//!
//! Manages the generic request lifecycle: open, respond, withdraw, and
//! the bulk deletes used during entity teardown. The service knows
//! nothing about what a resource is beyond its opaque ID and category
//! tag; resolving recipients and applying acceptance side effects is
//! the synchronization layer's job.

use homebase_common::{AppError, AppResult, IdGenerator};
use homebase_db::{
    entities::request::{self, RequestCategory, RequestStatus},
    repositories::RequestRepository,
};
use sea_orm::Set;

/// Request service for business logic.
#[derive(Clone)]
pub struct RequestService {
    request_repo: RequestRepository,
    id_gen: IdGenerator,
}

impl RequestService {
    /// Create a new request service.
    #[must_use]
    pub const fn new(request_repo: RequestRepository) -> Self {
        Self {
            request_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Open a new pending request.
    ///
    /// Fails with `Conflict` if a pending request already exists for the
    /// (sender, resource, category) triple.
    pub async fn open(
        &self,
        sender_id: &str,
        recipient_id: &str,
        resource_id: &str,
        category: RequestCategory,
        message: Option<String>,
    ) -> AppResult<request::Model> {
        if self
            .request_repo
            .find_pending(sender_id, resource_id, category)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "A {} request from user {sender_id} for resource {resource_id} is already pending",
                category.as_str()
            )));
        }

        let model = request::ActiveModel {
            id: Set(self.id_gen.generate()),
            sender_id: Set(sender_id.to_string()),
            recipient_id: Set(recipient_id.to_string()),
            resource_id: Set(resource_id.to_string()),
            category: Set(category),
            status: Set(RequestStatus::Pending),
            message: Set(message),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.request_repo.create(model).await
    }

    /// Accept or decline a request. Recipient-only.
    ///
    /// Responding to an already-answered request is permitted and simply
    /// re-sets the status; there is no idempotence guard.
    pub async fn respond(
        &self,
        request_id: &str,
        actor_id: &str,
        accept: bool,
    ) -> AppResult<request::Model> {
        let request = self.request_repo.get_by_id(request_id).await?;

        if request.recipient_id != actor_id {
            return Err(AppError::Forbidden(format!(
                "User {actor_id} is not the recipient of request {request_id}"
            )));
        }

        let mut active: request::ActiveModel = request.into();
        active.status = Set(if accept {
            RequestStatus::Accepted
        } else {
            RequestStatus::Declined
        });
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.request_repo.update(active).await
    }

    /// List requests where the user is sender or recipient, optionally
    /// filtered by category.
    pub async fn get_for_user(
        &self,
        user_id: &str,
        category: Option<RequestCategory>,
    ) -> AppResult<Vec<request::Model>> {
        self.request_repo.find_for_user(user_id, category).await
    }

    /// List all requests for a resource/category pair, any status.
    pub async fn get_by_resource(
        &self,
        resource_id: &str,
        category: RequestCategory,
    ) -> AppResult<Vec<request::Model>> {
        self.request_repo.find_by_resource(resource_id, category).await
    }

    /// Withdraw (hard-delete) a request. Sender-only.
    pub async fn withdraw(&self, request_id: &str, actor_id: &str) -> AppResult<()> {
        let request = self.request_repo.get_by_id(request_id).await?;

        if request.sender_id != actor_id {
            return Err(AppError::Forbidden(format!(
                "User {actor_id} is not the sender of request {request_id}"
            )));
        }

        self.request_repo.delete(request_id).await
    }

    /// Delete every request sent by a user. Used by teardown only; the
    /// caller has already authorized the parent deletion.
    pub async fn delete_by_sender(&self, sender_id: &str) -> AppResult<u64> {
        self.request_repo.delete_by_sender(sender_id).await
    }

    /// Delete every request addressed to a user. Teardown only.
    pub async fn delete_by_recipient(&self, recipient_id: &str) -> AppResult<u64> {
        self.request_repo.delete_by_recipient(recipient_id).await
    }

    /// Delete every request referencing a resource. Teardown only.
    pub async fn delete_by_resource(
        &self,
        resource_id: &str,
        category: RequestCategory,
    ) -> AppResult<u64> {
        self.request_repo.delete_by_resource(resource_id, category).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_request(
        id: &str,
        sender: &str,
        recipient: &str,
        status: RequestStatus,
    ) -> request::Model {
        request::Model {
            id: id.to_string(),
            sender_id: sender.to_string(),
            recipient_id: recipient.to_string(),
            resource_id: recipient.to_string(),
            category: RequestCategory::Friend,
            status,
            message: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_open_rejects_duplicate_pending() {
        let pending = test_request("r1", "u1", "u2", RequestStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let service = RequestService::new(RequestRepository::new(db));
        let err = service
            .open("u1", "u2", "u2", RequestCategory::Friend, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_respond_missing_request() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<request::Model>::new()])
                .into_connection(),
        );

        let service = RequestService::new(RequestRepository::new(db));
        let err = service.respond("missing", "u2", true).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_respond_rejects_non_recipient() {
        let pending = test_request("r1", "u1", "u2", RequestStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let service = RequestService::new(RequestRepository::new(db));
        // The sender cannot answer their own request
        let err = service.respond("r1", "u1", true).await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_withdraw_rejects_non_sender() {
        let pending = test_request("r1", "u1", "u2", RequestStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let service = RequestService::new(RequestRepository::new(db));
        let err = service.withdraw("r1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
