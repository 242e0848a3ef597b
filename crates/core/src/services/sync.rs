//! Cross-concept synchronization.
//!
//! Concepts never call each other; this service alone composes them
//! into user-facing workflows. There is no cross-collection transaction:
//! a failure partway through a workflow leaves the earlier writes
//! committed, and no compensating action runs. In particular, a request
//! accepted whose side effect then fails stays `accepted`.

use homebase_common::{AppError, AppResult};
use homebase_db::entities::request::{self, RequestCategory};

use crate::services::event::{CreateEventInput, EventService};
use crate::services::friendship::FriendshipService;
use crate::services::group::{CreateGroupInput, GroupService};
use crate::services::location::LocationService;
use crate::services::request::RequestService;
use crate::services::user::UserService;

/// The resource a request is about, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// A friend request addressed to this user.
    Friend(String),
    /// A join request for this group.
    Group(String),
    /// A join request for this event.
    Event(String),
}

impl ResourceRef {
    /// Build a reference from a category tag and resource ID.
    #[must_use]
    pub const fn new(category: RequestCategory, resource_id: String) -> Self {
        match category {
            RequestCategory::Friend => Self::Friend(resource_id),
            RequestCategory::Group => Self::Group(resource_id),
            RequestCategory::Event => Self::Event(resource_id),
        }
    }

    /// Rebuild the reference carried on a stored request.
    #[must_use]
    pub fn of_request(request: &request::Model) -> Self {
        Self::new(request.category, request.resource_id.clone())
    }

    /// The category tag of this reference.
    #[must_use]
    pub const fn category(&self) -> RequestCategory {
        match self {
            Self::Friend(_) => RequestCategory::Friend,
            Self::Group(_) => RequestCategory::Group,
            Self::Event(_) => RequestCategory::Event,
        }
    }

    /// The opaque resource ID.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        match self {
            Self::Friend(id) | Self::Group(id) | Self::Event(id) => id,
        }
    }
}

/// Synchronization service composing the concept services.
///
/// Constructed once at startup with every concept service injected.
#[derive(Clone)]
pub struct SyncService {
    users: UserService,
    friendships: FriendshipService,
    groups: GroupService,
    locations: LocationService,
    events: EventService,
    requests: RequestService,
}

impl SyncService {
    /// Create a new synchronization service.
    #[must_use]
    pub const fn new(
        users: UserService,
        friendships: FriendshipService,
        groups: GroupService,
        locations: LocationService,
        events: EventService,
        requests: RequestService,
    ) -> Self {
        Self {
            users,
            friendships,
            groups,
            locations,
            events,
            requests,
        }
    }

    /// Open a request, resolving the recipient per category.
    ///
    /// Friend requests go to the addressed user (who must exist and not
    /// already be a friend); group requests go to the group's current
    /// owner; event requests go to the event's current host.
    pub async fn open_request(
        &self,
        sender_id: &str,
        resource: ResourceRef,
        message: Option<String>,
    ) -> AppResult<request::Model> {
        let recipient_id = match &resource {
            ResourceRef::Friend(user_id) => {
                self.users.assert_exists(user_id).await?;
                self.friendships.assert_not_friends(sender_id, user_id).await?;
                user_id.clone()
            }
            ResourceRef::Group(group_id) => self.groups.owner_of(group_id).await?,
            ResourceRef::Event(event_id) => self.events.host_of(event_id).await?,
        };

        self.requests
            .open(
                sender_id,
                &recipient_id,
                resource.resource_id(),
                resource.category(),
                message,
            )
            .await
    }

    /// Accept a request and apply the category-specific side effect.
    ///
    /// The status flip happens first: it yields the authoritative record
    /// and enforces the recipient check. If the side effect then fails,
    /// the request stays `accepted` and the error propagates unchanged.
    pub async fn accept_request(
        &self,
        request_id: &str,
        actor_id: &str,
    ) -> AppResult<request::Model> {
        let request = self.requests.respond(request_id, actor_id, true).await?;

        match ResourceRef::of_request(&request) {
            ResourceRef::Friend(_) => {
                self.friendships
                    .add_friend(&request.sender_id, &request.recipient_id)
                    .await?;
            }
            ResourceRef::Group(group_id) => {
                self.users
                    .subscribe_to_group(&request.sender_id, &group_id)
                    .await?;
                self.groups.add_member(&group_id, &request.sender_id).await?;
            }
            ResourceRef::Event(event_id) => {
                // Capacity is enforced inside Eventing
                self.events.register(&event_id, &request.sender_id).await?;
            }
        }

        Ok(request)
    }

    /// Decline a request. No side effects on other concepts.
    pub async fn decline_request(
        &self,
        request_id: &str,
        actor_id: &str,
    ) -> AppResult<request::Model> {
        self.requests.respond(request_id, actor_id, false).await
    }

    /// Withdraw a request. No side effects on other concepts.
    pub async fn withdraw_request(&self, request_id: &str, actor_id: &str) -> AppResult<()> {
        self.requests.withdraw(request_id, actor_id).await
    }

    /// Create a group and subscribe the owner to it.
    pub async fn create_group(
        &self,
        owner_id: &str,
        input: CreateGroupInput,
    ) -> AppResult<homebase_db::entities::group::Model> {
        if let Some(location_id) = &input.location_id {
            self.locations.assert_exists(location_id).await?;
        }

        let group = self.groups.create(owner_id, input).await?;
        self.users.subscribe_to_group(owner_id, &group.id).await?;

        Ok(group)
    }

    /// Add a member to a group, keeping the subscription list in step.
    pub async fn add_group_member(&self, group_id: &str, user_id: &str) -> AppResult<()> {
        self.users.subscribe_to_group(user_id, group_id).await?;
        self.groups.add_member(group_id, user_id).await?;
        Ok(())
    }

    /// Remove a member from a group, keeping the subscription list in
    /// step.
    pub async fn remove_group_member(&self, group_id: &str, user_id: &str) -> AppResult<()> {
        self.users.unsubscribe_from_group(user_id, group_id).await?;
        self.groups.remove_member(group_id, user_id).await?;
        Ok(())
    }

    /// Disband a group and cascade its requests.
    pub async fn disband_group(&self, group_id: &str, actor_id: &str) -> AppResult<()> {
        self.groups.disband(group_id, actor_id).await?;
        self.users.unsubscribe_from_group(actor_id, group_id).await?;
        self.requests
            .delete_by_resource(group_id, RequestCategory::Group)
            .await?;
        Ok(())
    }

    /// Delete a user account and cascade their requests.
    pub async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        self.requests.delete_by_sender(user_id).await?;
        self.requests.delete_by_recipient(user_id).await?;
        self.users.delete(user_id).await
    }

    /// Create an event after checking its group and location resolve.
    pub async fn create_event(
        &self,
        host_id: &str,
        input: CreateEventInput,
    ) -> AppResult<homebase_db::entities::event::Model> {
        self.groups.assert_exists(&input.group_id).await?;
        self.locations.assert_exists(&input.location_id).await?;
        self.events.create(host_id, input).await
    }

    /// Delete an event and cascade its requests.
    pub async fn delete_event(&self, event_id: &str, actor_id: &str) -> AppResult<()> {
        self.events.delete(event_id, actor_id).await?;
        self.requests
            .delete_by_resource(event_id, RequestCategory::Event)
            .await?;
        Ok(())
    }

    /// Parse a URL category segment into a resource reference.
    pub fn parse_resource(category: &str, resource_id: String) -> AppResult<ResourceRef> {
        category
            .parse::<RequestCategory>()
            .map(|c| ResourceRef::new(c, resource_id))
            .map_err(|()| {
                AppError::BadRequest(format!(
                    "Unknown request category: {category} (expected friend, group, or event)"
                ))
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_ref_round_trip() {
        let r = ResourceRef::new(RequestCategory::Group, "g1".to_string());
        assert_eq!(r, ResourceRef::Group("g1".to_string()));
        assert_eq!(r.category(), RequestCategory::Group);
        assert_eq!(r.resource_id(), "g1");
    }

    #[test]
    fn test_parse_resource_rejects_unknown_category() {
        let err = SyncService::parse_resource("poll", "x".to_string()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_resource_accepts_known_categories() {
        for (category, id) in [("friend", "u2"), ("group", "g1"), ("event", "e1")] {
            let r = SyncService::parse_resource(category, id.to_string()).unwrap();
            assert_eq!(r.resource_id(), id);
            assert_eq!(r.category().as_str(), category);
        }
    }
}
