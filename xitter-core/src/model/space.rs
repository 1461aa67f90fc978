/*
    space.rs - Space (community) model

    A named community posts are published into. Spaces are created by an
    administrative action; the only mutation this core performs on a
    space is growing its member count on first-time joins.
*/

use super::types::SpaceId;
use serde::{Deserialize, Serialize};

/// Space metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Unique space ID (stable, never reassigned)
    pub id: SpaceId,

    /// Human-readable space name
    pub name: String,

    /// Short description shown in space directories
    pub description: String,

    /// Canonical URL of the space
    pub url: String,

    /// Number of members; grows on first-time joins only
    pub member_count: u64,
}

impl Space {
    /// Create a new space with no members
    pub fn new(
        id: SpaceId,
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Space {
            id,
            name: name.into(),
            description: description.into(),
            url: url.into(),
            member_count: 0,
        }
    }

    /// Seed a space with an existing member count
    pub fn with_member_count(mut self, count: u64) -> Self {
        self.member_count = count;
        self
    }
}
