//! Group service.

use homebase_common::{AppError, AppResult, IdGenerator};
use homebase_db::{entities::group, repositories::GroupRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Group service for business logic.
#[derive(Clone)]
pub struct GroupService {
    group_repo: GroupRepository,
    id_gen: IdGenerator,
}

/// Input for creating a group.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    #[validate(range(min = 1))]
    pub capacity: i32,

    #[serde(default)]
    pub is_private: bool,

    pub location_id: Option<String>,
}

impl GroupService {
    /// Create a new group service.
    #[must_use]
    pub const fn new(group_repo: GroupRepository) -> Self {
        Self {
            group_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new group. The owner is its first member.
    pub async fn create(&self, owner_id: &str, input: CreateGroupInput) -> AppResult<group::Model> {
        input.validate()?;

        if self.group_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Group with name {} already exists",
                input.name
            )));
        }

        let model = group::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            owner_id: Set(owner_id.to_string()),
            member_ids: Set(serde_json::json!([owner_id])),
            capacity: Set(input.capacity),
            is_private: Set(input.is_private),
            location_id: Set(input.location_id),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.group_repo.create(model).await
    }

    /// Rename a group. Owner-only.
    pub async fn rename(&self, group_id: &str, actor_id: &str, name: &str) -> AppResult<group::Model> {
        let group = self.assert_owner(group_id, actor_id).await?;

        let mut active: group::ActiveModel = group.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.group_repo.update(active).await
    }

    /// Add a user to the group's member list.
    pub async fn add_member(&self, group_id: &str, user_id: &str) -> AppResult<group::Model> {
        let group = self.group_repo.get_by_id(group_id).await?;
        let mut members = member_ids_of(&group);

        if members.iter().any(|m| m == user_id) {
            return Err(AppError::Forbidden(format!(
                "User {user_id} is already a member of group {group_id}"
            )));
        }
        members.push(user_id.to_string());

        self.store_members(group, members).await
    }

    /// Add several users at once. Owner-only.
    pub async fn add_members(
        &self,
        group_id: &str,
        actor_id: &str,
        user_ids: &[String],
    ) -> AppResult<group::Model> {
        let group = self.assert_owner(group_id, actor_id).await?;
        let mut members = member_ids_of(&group);

        for user_id in user_ids {
            if members.iter().any(|m| m == user_id) {
                return Err(AppError::Forbidden(format!(
                    "User {user_id} is already a member of group {group_id}"
                )));
            }
        }
        members.extend(user_ids.iter().cloned());

        self.store_members(group, members).await
    }

    /// Remove a user from the group's member list.
    ///
    /// Anyone may leave a group; there is no ownership check.
    pub async fn remove_member(&self, group_id: &str, user_id: &str) -> AppResult<group::Model> {
        let group = self.group_repo.get_by_id(group_id).await?;
        let mut members = member_ids_of(&group);

        if !members.iter().any(|m| m == user_id) {
            return Err(AppError::Forbidden(format!(
                "User {user_id} is not a member of group {group_id}"
            )));
        }
        members.retain(|m| m != user_id);

        self.store_members(group, members).await
    }

    /// Remove several users at once. Owner-only.
    pub async fn remove_members(
        &self,
        group_id: &str,
        actor_id: &str,
        user_ids: &[String],
    ) -> AppResult<group::Model> {
        let group = self.assert_owner(group_id, actor_id).await?;
        let mut members = member_ids_of(&group);

        for user_id in user_ids {
            if !members.iter().any(|m| m == user_id) {
                return Err(AppError::Forbidden(format!(
                    "User {user_id} is not a member of group {group_id}"
                )));
            }
        }
        members.retain(|m| !user_ids.contains(m));

        self.store_members(group, members).await
    }

    /// List all groups, newest first.
    pub async fn list(&self) -> AppResult<Vec<group::Model>> {
        self.group_repo.find_all().await
    }

    /// Get a group by ID.
    pub async fn get(&self, group_id: &str) -> AppResult<group::Model> {
        self.group_repo.get_by_id(group_id).await
    }

    /// List groups owned by a user.
    pub async fn get_by_owner(&self, owner_id: &str) -> AppResult<Vec<group::Model>> {
        self.group_repo.find_by_owner(owner_id).await
    }

    /// Get a group by its unique name.
    pub async fn get_by_name(&self, name: &str) -> AppResult<group::Model> {
        self.group_repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group not found: {name}")))
    }

    /// Resolve the current owner of a group.
    pub async fn owner_of(&self, group_id: &str) -> AppResult<String> {
        let group = self.group_repo.get_by_id(group_id).await?;
        Ok(group.owner_id)
    }

    /// Disband (hard-delete) a group. Owner-only.
    pub async fn disband(&self, group_id: &str, actor_id: &str) -> AppResult<()> {
        self.assert_owner(group_id, actor_id).await?;
        self.group_repo.delete(group_id).await
    }

    /// Assert that a group exists.
    pub async fn assert_exists(&self, group_id: &str) -> AppResult<()> {
        self.group_repo.get_by_id(group_id).await?;
        Ok(())
    }

    /// Assert the actor owns the group, returning it.
    pub async fn assert_owner(&self, group_id: &str, actor_id: &str) -> AppResult<group::Model> {
        let group = self.group_repo.get_by_id(group_id).await?;
        if group.owner_id != actor_id {
            return Err(AppError::Forbidden(format!(
                "User {actor_id} is not the owner of group {group_id}"
            )));
        }
        Ok(group)
    }

    async fn store_members(
        &self,
        group: group::Model,
        members: Vec<String>,
    ) -> AppResult<group::Model> {
        let mut active: group::ActiveModel = group.into();
        active.member_ids = Set(serde_json::json!(members));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.group_repo.update(active).await
    }
}

/// Parse the denormalized member list off a group record.
#[must_use]
pub fn member_ids_of(group: &group::Model) -> Vec<String> {
    serde_json::from_value(group.member_ids.clone()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_group(id: &str, owner: &str, members: &[&str]) -> group::Model {
        group::Model {
            id: id.to_string(),
            name: "Baker House".to_string(),
            owner_id: owner.to_string(),
            member_ids: serde_json::json!(members),
            capacity: 8,
            is_private: false,
            location_id: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let existing = test_group("g1", "u1", &["u1"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service
            .create(
                "u2",
                CreateGroupInput {
                    name: "Baker House".to_string(),
                    capacity: 8,
                    is_private: false,
                    location_id: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_capacity() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = GroupService::new(GroupRepository::new(db));
        let err = service
            .create(
                "u1",
                CreateGroupInput {
                    name: "Baker House".to_string(),
                    capacity: 0,
                    is_private: false,
                    location_id: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_add_member_rejects_existing_member() {
        let group = test_group("g1", "u1", &["u1", "u2"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service.add_member("g1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_remove_member_rejects_non_member() {
        let group = test_group("g1", "u1", &["u1"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service.remove_member("g1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_add_members_rejects_non_owner() {
        let group = test_group("g1", "u1", &["u1"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service
            .add_members("g1", "u2", &["u3".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_remove_members_rejects_non_member_in_batch() {
        let group = test_group("g1", "u1", &["u1", "u2"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service
            .remove_members("g1", "u1", &["u2".to_string(), "u9".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_get_by_name_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<group::Model>::new()])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service.get_by_name("nope").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_by_owner_lists_groups() {
        let g1 = test_group("g1", "u1", &["u1"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[g1]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let groups = service.get_by_owner("u1").await.unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].owner_id, "u1");
    }

    #[tokio::test]
    async fn test_disband_rejects_non_owner() {
        let group = test_group("g1", "u1", &["u1"]);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[group]])
                .into_connection(),
        );

        let service = GroupService::new(GroupRepository::new(db));
        let err = service.disband("g1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
