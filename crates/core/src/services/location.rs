//! Location service.

use homebase_common::{AppResult, IdGenerator};
use homebase_db::{entities::location, repositories::LocationRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Location service for business logic.
#[derive(Clone)]
pub struct LocationService {
    location_repo: LocationRepository,
    id_gen: IdGenerator,
}

/// Input for creating a location.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl LocationService {
    /// Create a new location service.
    #[must_use]
    pub const fn new(location_repo: LocationRepository) -> Self {
        Self {
            location_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new location.
    pub async fn create(&self, input: CreateLocationInput) -> AppResult<location::Model> {
        input.validate()?;

        let model = location::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            lat: Set(input.lat),
            lng: Set(input.lng),
            street: Set(input.street),
            city: Set(input.city),
            state: Set(input.state),
            country: Set(input.country),
            postal_code: Set(input.postal_code),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.location_repo.create(model).await
    }

    /// List all locations, newest first.
    pub async fn list(&self) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_all().await
    }

    /// Get a location by ID.
    pub async fn get(&self, location_id: &str) -> AppResult<location::Model> {
        self.location_repo.get_by_id(location_id).await
    }

    /// List locations by name.
    pub async fn get_by_name(&self, name: &str) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_by_name(name).await
    }

    /// List locations in a state.
    pub async fn get_by_state(&self, state: &str) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_by_state(state).await
    }

    /// List locations in a city within a state.
    pub async fn get_by_city(&self, city: &str, state: &str) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_by_city(city, state).await
    }

    /// List locations by postal code.
    pub async fn get_by_postal_code(&self, postal_code: &str) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_by_postal_code(postal_code).await
    }

    /// Delete a location.
    pub async fn delete(&self, location_id: &str) -> AppResult<()> {
        self.location_repo.delete(location_id).await
    }

    /// Assert that a location exists.
    pub async fn assert_exists(&self, location_id: &str) -> AppResult<()> {
        self.location_repo.get_by_id(location_id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use homebase_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_rejects_out_of_range_latitude() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = LocationService::new(LocationRepository::new(db));
        let err = service
            .create(CreateLocationInput {
                name: "Nowhere".to_string(),
                lat: 120.0,
                lng: 0.0,
                street: None,
                city: None,
                state: None,
                country: None,
                postal_code: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_by_postal_code_passes_through() {
        let loc = location::Model {
            id: "l1".to_string(),
            name: "Student Center".to_string(),
            lat: 42.3601,
            lng: -71.0942,
            street: None,
            city: Some("Cambridge".to_string()),
            state: Some("MA".to_string()),
            country: None,
            postal_code: Some("02139".to_string()),
            created_at: chrono::Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[loc]])
                .into_connection(),
        );

        let service = LocationService::new(LocationRepository::new(db));
        let found = service.get_by_postal_code("02139").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].postal_code.as_deref(), Some("02139"));
    }

    #[tokio::test]
    async fn test_assert_exists_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<location::Model>::new()])
                .into_connection(),
        );

        let service = LocationService::new(LocationRepository::new(db));
        let err = service.assert_exists("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
