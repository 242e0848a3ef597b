//! Database entities.

pub mod event;
pub mod friendship;
pub mod group;
pub mod location;
pub mod post;
pub mod request;
pub mod user;

pub use event::Entity as Event;
pub use friendship::Entity as Friendship;
pub use group::Entity as Group;
pub use location::Entity as Location;
pub use post::Entity as Post;
pub use request::Entity as Request;
pub use user::Entity as User;
