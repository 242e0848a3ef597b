//! Location repository.

use std::sync::Arc;

use crate::entities::{location, Location};
use homebase_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Location repository for database operations.
#[derive(Clone)]
pub struct LocationRepository {
    db: Arc<DatabaseConnection>,
}

impl LocationRepository {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a location by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<location::Model>> {
        Location::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a location by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<location::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location not found: {id}")))
    }

    /// List all locations, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<location::Model>> {
        Location::find()
            .order_by_desc(location::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List locations by name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::Name.eq(name))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List locations in a state.
    pub async fn find_by_state(&self, state: &str) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::State.eq(state))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List locations in a city within a state.
    pub async fn find_by_city(&self, city: &str, state: &str) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::City.eq(city))
            .filter(location::Column::State.eq(state))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List locations by postal code.
    pub async fn find_by_postal_code(&self, postal_code: &str) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::PostalCode.eq(postal_code))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new location.
    pub async fn create(&self, model: location::ActiveModel) -> AppResult<location::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a location.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Location::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
