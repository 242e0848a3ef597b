//! API layer integration tests.
//!
//! Builds the full router over a mock database connection; a route
//! pattern conflict would panic here rather than at server startup.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use homebase_api::middleware::AppState;
use homebase_core::{
    EventService, FriendshipService, GroupService, LocationService, PostService, RequestService,
    SyncService, UserService,
};
use homebase_db::repositories::{
    EventRepository, FriendshipRepository, GroupRepository, LocationRepository, PostRepository,
    RequestRepository, UserRepository,
};
use sea_orm::{DatabaseBackend, MockDatabase};

fn mock_state() -> AppState {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let user_service = UserService::new(UserRepository::new(Arc::clone(&db)));
    let friendship_service = FriendshipService::new(FriendshipRepository::new(Arc::clone(&db)));
    let post_service = PostService::new(PostRepository::new(Arc::clone(&db)));
    let group_service = GroupService::new(GroupRepository::new(Arc::clone(&db)));
    let location_service = LocationService::new(LocationRepository::new(Arc::clone(&db)));
    let event_service = EventService::new(EventRepository::new(Arc::clone(&db)));
    let request_service = RequestService::new(RequestRepository::new(Arc::clone(&db)));

    let sync_service = SyncService::new(
        user_service.clone(),
        friendship_service.clone(),
        group_service.clone(),
        location_service.clone(),
        event_service.clone(),
        request_service.clone(),
    );

    AppState {
        user_service,
        friendship_service,
        post_service,
        group_service,
        location_service,
        event_service,
        request_service,
        sync_service,
    }
}

#[tokio::test]
async fn router_builds_without_route_conflicts() {
    let state = mock_state();

    // with_state finalizes the matchit router; conflicting patterns
    // panic here
    let _router: axum::Router = homebase_api::router().with_state(state);
}
