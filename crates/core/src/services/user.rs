//! User service.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use homebase_common::{AppError, AppResult, IdGenerator};
use homebase_db::{entities::user, repositories::UserRepository};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Well-known personal email providers, rejected at signup.
const PERSONAL_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "aol.com",
];

/// Username rendered for IDs that no longer resolve to a user.
const DELETED_USER: &str = "DELETED_USER";

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 256))]
    pub email: String,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new user.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        self.assert_username_unique(&input.username).await?;

        if self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                input.email
            )));
        }

        if !is_valid_work_email(&input.email) {
            return Err(AppError::BadRequest(
                "Please provide a valid work/school email".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            token: Set(None),
            group_ids: Set(serde_json::json!([])),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::UserNotFound(email.to_string()))
    }

    /// List all users.
    pub async fn list(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all().await
    }

    /// Resolve user IDs to usernames, preserving order.
    ///
    /// IDs that no longer resolve render as `DELETED_USER`.
    pub async fn ids_to_usernames(&self, ids: &[String]) -> AppResult<Vec<String>> {
        let users = self.user_repo.find_by_ids(ids).await?;
        let by_id: std::collections::HashMap<&str, &str> = users
            .iter()
            .map(|u| (u.id.as_str(), u.username.as_str()))
            .collect();

        Ok(ids
            .iter()
            .map(|id| {
                by_id
                    .get(id.as_str())
                    .map_or_else(|| DELETED_USER.to_string(), ToString::to_string)
            })
            .collect())
    }

    /// Authenticate a user by email and password, issuing a fresh
    /// session token.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<(user::Model, String)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.id_gen.generate_token();

        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(token.clone()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let user = self.user_repo.update(active).await?;

        Ok((user, token))
    }

    /// Authenticate a user by session token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// End the user's session by clearing their token.
    pub async fn end_session(&self, user_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;

        let mut active: user::ActiveModel = user.into();
        active.token = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Change a user's username.
    pub async fn update_username(&self, user_id: &str, username: &str) -> AppResult<user::Model> {
        self.assert_username_unique(username).await?;

        let user = self.user_repo.get_by_id(user_id).await?;

        let mut active: user::ActiveModel = user.into();
        active.username = Set(username.to_string());
        active.username_lower = Set(username.to_lowercase());
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Change a user's password after verifying the current one.
    pub async fn update_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(AppError::Forbidden(
                "The given current password is wrong".to_string(),
            ));
        }

        let password_hash = hash_password(new_password)?;

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Add a group to the user's subscription list. Idempotent.
    pub async fn subscribe_to_group(&self, user_id: &str, group_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let mut group_ids = group_ids_of(&user);

        if group_ids.iter().any(|g| g == group_id) {
            return Ok(());
        }
        group_ids.push(group_id.to_string());

        let mut active: user::ActiveModel = user.into();
        active.group_ids = Set(serde_json::json!(group_ids));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Remove a group from the user's subscription list. Idempotent.
    pub async fn unsubscribe_from_group(&self, user_id: &str, group_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let mut group_ids = group_ids_of(&user);

        let before = group_ids.len();
        group_ids.retain(|g| g != group_id);
        if group_ids.len() == before {
            return Ok(());
        }

        let mut active: user::ActiveModel = user.into();
        active.group_ids = Set(serde_json::json!(group_ids));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Delete a user.
    pub async fn delete(&self, user_id: &str) -> AppResult<()> {
        self.user_repo.delete(user_id).await
    }

    /// Assert that a user exists.
    pub async fn assert_exists(&self, user_id: &str) -> AppResult<()> {
        self.user_repo.get_by_id(user_id).await?;
        Ok(())
    }

    async fn assert_username_unique(&self, username: &str) -> AppResult<()> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with username {username} already exists"
            )));
        }
        Ok(())
    }
}

/// Parse the denormalized subscription list off a user record.
#[must_use]
pub fn group_ids_of(user: &user::Model) -> Vec<String> {
    serde_json::from_value(user.group_ids.clone()).unwrap_or_default()
}

/// Check email syntax and reject well-known personal providers.
#[must_use]
fn is_valid_work_email(email: &str) -> bool {
    if !EMAIL_REGEX.is_match(email) {
        return false;
    }
    email.rsplit('@').next().is_some_and(|domain| {
        !PERSONAL_EMAIL_DOMAINS
            .iter()
            .any(|d| d.eq_ignore_ascii_case(domain))
    })
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, username: &str, password_hash: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: format!("{username}@campus.edu"),
            password_hash: password_hash.to_string(),
            token: None,
            group_ids: serde_json::json!([]),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_work_email_validation() {
        assert!(is_valid_work_email("ada@mit.edu"));
        assert!(is_valid_work_email("dev@widgets.example.com"));
        assert!(!is_valid_work_email("ada@gmail.com"));
        assert!(!is_valid_work_email("ada@GMAIL.com"));
        assert!(!is_valid_work_email("not-an-email"));
        assert!(!is_valid_work_email("spaces in@address.com"));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_username() {
        let existing = test_user("u1", "alice", "$argon2id$stub");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let err = service
            .create(CreateUserInput {
                username: "alice".to_string(),
                password: "secret".to_string(),
                email: "alice@campus.edu".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_personal_email() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // username free, email free
                .append_query_results([Vec::<user::Model>::new(), Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let err = service
            .create(CreateUserInput {
                username: "bob".to_string(),
                password: "secret".to_string(),
                email: "bob@gmail.com".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password() {
        let hash = hash_password("right").unwrap();
        let user = test_user("u1", "alice", &hash);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let err = service
            .authenticate("alice@campus.edu", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_ids_to_usernames_renders_deleted() {
        let alice = test_user("u1", "alice", "$argon2id$stub");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[alice]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let names = service
            .ids_to_usernames(&["u1".to_string(), "gone".to_string()])
            .await
            .unwrap();

        assert_eq!(names, vec!["alice".to_string(), "DELETED_USER".to_string()]);
    }
}
