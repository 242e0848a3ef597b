//! API endpoints.

mod auth;
mod events;
mod friends;
mod groups;
mod locations;
mod posts;
mod requests;
mod users;

use axum::Router;

use crate::middleware::AppState;

pub use users::UserResponse;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/friends", friends::router())
        .nest("/groups", groups::router())
        .nest("/locations", locations::router())
        .nest("/requests", requests::router())
        .nest("/events", events::router())
}
