//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use homebase_core::{
    EventService, FriendshipService, GroupService, LocationService, PostService, RequestService,
    SyncService, UserService,
};

/// Application state.
///
/// One instance of each concept service, constructed at startup and
/// injected here; handlers never build services themselves.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub friendship_service: FriendshipService,
    pub post_service: PostService,
    pub group_service: GroupService,
    pub location_service: LocationService,
    pub event_service: EventService,
    pub request_service: RequestService,
    pub sync_service: SyncService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to a user and stores the user in request
/// extensions for the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
