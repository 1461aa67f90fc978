/*
    user.rs - User account model

    Accounts are provisioned by the session layer; this core owns the
    membership-relevant fields. A user's home space anchors the
    auto-membership invariant and the default posting target.
*/

use super::types::{SpaceId, UserId, Username};
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique account ID
    pub id: UserId,

    /// Unique handle; resolved case-insensitively for author lookups
    pub username: Username,

    /// Display name, mutable by the owning user
    pub display_name: String,

    /// Avatar reference (path or URL), mutable by the owning user
    pub avatar_ref: Option<String>,

    /// Home space; the user is always a member of it
    pub home_space_id: SpaceId,
}

impl User {
    pub fn new(
        id: UserId,
        username: Username,
        display_name: impl Into<String>,
        home_space_id: SpaceId,
    ) -> Self {
        User {
            id,
            username,
            display_name: display_name.into(),
            avatar_ref: None,
            home_space_id,
        }
    }

    pub fn with_avatar(mut self, avatar_ref: impl Into<String>) -> Self {
        self.avatar_ref = Some(avatar_ref.into());
        self
    }
}
