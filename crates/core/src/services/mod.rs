//! Business logic services.

#![allow(missing_docs)]

pub mod event;
pub mod friendship;
pub mod group;
pub mod location;
pub mod post;
pub mod request;
pub mod sync;
pub mod user;

pub use event::{EventService, EventTimeFilter};
pub use friendship::FriendshipService;
pub use group::GroupService;
pub use location::LocationService;
pub use post::PostService;
pub use request::RequestService;
pub use sync::{ResourceRef, SyncService};
pub use user::UserService;
