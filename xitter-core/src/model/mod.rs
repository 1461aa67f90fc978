/*
    mod.rs - Core data model

    Space, User, Post and the identifier newtypes shared across the
    registry, store, distribution and feed layers.
*/

pub mod post;
pub mod space;
pub mod types;
pub mod user;

pub use post::Post;
pub use space::Space;
pub use types::{PostId, Signature, SpaceId, Timestamp, UserId, Username};
pub use user::User;
