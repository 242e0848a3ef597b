//! Database repositories.

mod event;
mod friendship;
mod group;
mod location;
mod post;
mod request;
mod user;

pub use event::EventRepository;
pub use friendship::FriendshipRepository;
pub use group::GroupRepository;
pub use location::LocationRepository;
pub use post::PostRepository;
pub use request::RequestRepository;
pub use user::UserRepository;
