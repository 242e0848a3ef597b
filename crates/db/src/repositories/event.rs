//! Event repository.

use std::sync::Arc;

use crate::entities::{event, Event};
use chrono::{DateTime, Utc};
use homebase_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{extension::postgres::PgExpr, Expr},
};

/// Event repository for database operations.
#[derive(Clone)]
pub struct EventRepository {
    db: Arc<DatabaseConnection>,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<event::Model>> {
        Event::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an event by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<event::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event not found: {id}")))
    }

    /// List all events, latest start first.
    pub async fn find_all(&self) -> AppResult<Vec<event::Model>> {
        Event::find()
            .order_by_desc(event::Column::StartsAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List events starting at or after the given instant, latest first.
    pub async fn find_upcoming(&self, now: DateTime<Utc>) -> AppResult<Vec<event::Model>> {
        Event::find()
            .filter(event::Column::StartsAt.gte(now))
            .order_by_desc(event::Column::StartsAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List events that ended at or before the given instant, latest first.
    pub async fn find_past(&self, now: DateTime<Utc>) -> AppResult<Vec<event::Model>> {
        Event::find()
            .filter(event::Column::EndsAt.lte(now))
            .order_by_desc(event::Column::StartsAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List events whose name contains the query, case-insensitively.
    pub async fn find_by_name_contains(&self, name: &str) -> AppResult<Vec<event::Model>> {
        Event::find()
            .filter(Expr::col(event::Column::Name).ilike(format!("%{name}%")))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new event.
    pub async fn create(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an event.
    pub async fn update(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an event.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Event::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
