//! Event service.

use chrono::{DateTime, Utc};
use homebase_common::{AppError, AppResult, IdGenerator};
use homebase_db::{entities::event, repositories::EventRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Time window filter for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTimeFilter {
    /// Events starting now or later.
    Upcoming,
    /// Events that have already ended.
    Past,
}

impl std::str::FromStr for EventTimeFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            _ => Err(()),
        }
    }
}

/// Event service for business logic.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
    id_gen: IdGenerator,
}

/// Input for creating an event.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1))]
    pub group_id: String,

    #[validate(range(min = 1))]
    pub capacity: i32,

    #[validate(length(min = 1))]
    pub location_id: String,

    pub starts_at: DateTime<Utc>,

    pub ends_at: DateTime<Utc>,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(event_repo: EventRepository) -> Self {
        Self {
            event_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new event. The host is its first attendee.
    pub async fn create(&self, host_id: &str, input: CreateEventInput) -> AppResult<event::Model> {
        input.validate()?;

        if input.ends_at < input.starts_at {
            return Err(AppError::BadRequest(
                "Event cannot end before it starts".to_string(),
            ));
        }

        let model = event::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            group_id: Set(input.group_id),
            host_id: Set(host_id.to_string()),
            attendee_ids: Set(serde_json::json!([host_id])),
            capacity: Set(input.capacity),
            starts_at: Set(input.starts_at.into()),
            ends_at: Set(input.ends_at.into()),
            location_id: Set(input.location_id),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.event_repo.create(model).await
    }

    /// Rename an event. Host-only.
    pub async fn rename(&self, event_id: &str, actor_id: &str, name: &str) -> AppResult<event::Model> {
        let event = self.assert_host(event_id, actor_id).await?;

        let mut active: event::ActiveModel = event.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.event_repo.update(active).await
    }

    /// List events, optionally narrowed to a time window, latest start
    /// first.
    pub async fn list(&self, filter: Option<EventTimeFilter>) -> AppResult<Vec<event::Model>> {
        let now = Utc::now();
        match filter {
            None => self.event_repo.find_all().await,
            Some(EventTimeFilter::Upcoming) => self.event_repo.find_upcoming(now).await,
            Some(EventTimeFilter::Past) => self.event_repo.find_past(now).await,
        }
    }

    /// Get an event by ID.
    pub async fn get(&self, event_id: &str) -> AppResult<event::Model> {
        self.event_repo.get_by_id(event_id).await
    }

    /// List events whose name contains the query, case-insensitively.
    pub async fn get_by_name(&self, name: &str) -> AppResult<Vec<event::Model>> {
        self.event_repo.find_by_name_contains(name).await
    }

    /// Resolve the current host of an event.
    pub async fn host_of(&self, event_id: &str) -> AppResult<String> {
        let event = self.event_repo.get_by_id(event_id).await?;
        Ok(event.host_id)
    }

    /// Register an attendee, subject to the capacity check.
    pub async fn register(&self, event_id: &str, attendee_id: &str) -> AppResult<event::Model> {
        let event = self.event_repo.get_by_id(event_id).await?;
        let mut attendees = attendee_ids_of(&event);

        self.assert_under_capacity(&event, &attendees)?;

        if attendees.iter().any(|a| a == attendee_id) {
            return Err(AppError::Forbidden(format!(
                "User {attendee_id} is already attending event {event_id}"
            )));
        }
        attendees.push(attendee_id.to_string());

        self.store_attendees(event, attendees).await
    }

    /// Register several attendees at once.
    pub async fn register_many(
        &self,
        event_id: &str,
        attendee_ids: &[String],
    ) -> AppResult<event::Model> {
        let event = self.event_repo.get_by_id(event_id).await?;
        let mut attendees = attendee_ids_of(&event);

        self.assert_under_capacity(&event, &attendees)?;

        for attendee_id in attendee_ids {
            if attendees.iter().any(|a| a == attendee_id) {
                return Err(AppError::Forbidden(format!(
                    "User {attendee_id} is already attending event {event_id}"
                )));
            }
        }
        attendees.extend(attendee_ids.iter().cloned());

        self.store_attendees(event, attendees).await
    }

    /// Remove an attendee.
    pub async fn unregister(&self, event_id: &str, attendee_id: &str) -> AppResult<event::Model> {
        let event = self.event_repo.get_by_id(event_id).await?;
        let mut attendees = attendee_ids_of(&event);

        if !attendees.iter().any(|a| a == attendee_id) {
            return Err(AppError::Forbidden(format!(
                "User {attendee_id} is not attending event {event_id}"
            )));
        }
        attendees.retain(|a| a != attendee_id);

        self.store_attendees(event, attendees).await
    }

    /// Remove several attendees at once.
    pub async fn unregister_many(
        &self,
        event_id: &str,
        attendee_ids: &[String],
    ) -> AppResult<event::Model> {
        let event = self.event_repo.get_by_id(event_id).await?;
        let mut attendees = attendee_ids_of(&event);

        for attendee_id in attendee_ids {
            if !attendees.iter().any(|a| a == attendee_id) {
                return Err(AppError::Forbidden(format!(
                    "User {attendee_id} is not attending event {event_id}"
                )));
            }
        }
        attendees.retain(|a| !attendee_ids.contains(a));

        self.store_attendees(event, attendees).await
    }

    /// Delete an event. Host-only.
    pub async fn delete(&self, event_id: &str, actor_id: &str) -> AppResult<()> {
        self.assert_host(event_id, actor_id).await?;
        self.event_repo.delete(event_id).await
    }

    /// Assert that an event exists.
    pub async fn assert_exists(&self, event_id: &str) -> AppResult<()> {
        self.event_repo.get_by_id(event_id).await?;
        Ok(())
    }

    /// Assert the actor hosts the event, returning it.
    pub async fn assert_host(&self, event_id: &str, actor_id: &str) -> AppResult<event::Model> {
        let event = self.event_repo.get_by_id(event_id).await?;
        if event.host_id != actor_id {
            return Err(AppError::Forbidden(format!(
                "User {actor_id} is not the host of event {event_id}"
            )));
        }
        Ok(event)
    }

    fn assert_under_capacity(&self, event: &event::Model, attendees: &[String]) -> AppResult<()> {
        let capacity = usize::try_from(event.capacity).unwrap_or(0);
        if attendees.len() >= capacity {
            return Err(AppError::Forbidden(format!(
                "Event {} is at max capacity",
                event.id
            )));
        }
        Ok(())
    }

    async fn store_attendees(
        &self,
        event: event::Model,
        attendees: Vec<String>,
    ) -> AppResult<event::Model> {
        let mut active: event::ActiveModel = event.into();
        active.attendee_ids = Set(serde_json::json!(attendees));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.event_repo.update(active).await
    }
}

/// Parse the denormalized attendee list off an event record.
#[must_use]
pub fn attendee_ids_of(event: &event::Model) -> Vec<String> {
    serde_json::from_value(event.attendee_ids.clone()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_event(id: &str, host: &str, attendees: &[&str], capacity: i32) -> event::Model {
        let now = Utc::now();
        event::Model {
            id: id.to_string(),
            name: "Movie Night".to_string(),
            group_id: "g1".to_string(),
            host_id: host.to_string(),
            attendee_ids: serde_json::json!(attendees),
            capacity,
            starts_at: now.into(),
            ends_at: (now + chrono::Duration::hours(2)).into(),
            location_id: "l1".to_string(),
            created_at: now.into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_register_rejects_at_capacity() {
        let event = test_event("e1", "u1", &["u1", "u2"], 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let err = service.register("e1", "u3").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_existing_attendee() {
        let event = test_event("e1", "u1", &["u1"], 5);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let err = service.register("e1", "u1").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_unregister_rejects_non_attendee() {
        let event = test_event("e1", "u1", &["u1"], 5);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let err = service.unregister("e1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_register_many_rejects_existing_attendee() {
        let event = test_event("e1", "u1", &["u1", "u2"], 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let err = service
            .register_many("e1", &["u3".to_string(), "u2".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_unregister_many_rejects_non_attendee_in_batch() {
        let event = test_event("e1", "u1", &["u1", "u2"], 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let err = service
            .unregister_many("e1", &["u2".to_string(), "u9".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_delete_rejects_non_host() {
        let event = test_event("e1", "u1", &["u1"], 5);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[event]])
                .into_connection(),
        );

        let service = EventService::new(EventRepository::new(db));
        let err = service.delete("e1", "u2").await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_time_filter_parsing() {
        assert_eq!("upcoming".parse(), Ok(EventTimeFilter::Upcoming));
        assert_eq!("past".parse(), Ok(EventTimeFilter::Past));
        assert!("yesterday".parse::<EventTimeFilter>().is_err());
    }
}
