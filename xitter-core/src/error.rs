/*
    error.rs - Error taxonomy for the distribution core

    Four caller-visible kinds plus an internal catch-all:
    - Validation: malformed input (empty/over-long text, no target)
    - MembershipRequired: actor lacks membership in the named space
    - NotFound: referenced space/user/post does not exist
    - DuplicateId: id collision on append; an integrity violation,
      never expected in correct operation
    - Internal: lock poisoning and other broken invariants
*/

use crate::model::{PostId, SpaceId, UserId};
use thiserror::Error;

/// Errors surfaced by the distribution core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Actor is not a member of a space the operation requires
    #[error("Membership required: user {user} is not a member of space {space}")]
    MembershipRequired { user: UserId, space: SpaceId },

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Post id collision on append; indicates an id-generator bug
    #[error("Duplicate post id: {0}")]
    DuplicateId(PostId),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn not_found(kind: &str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound(format!("{} {}", kind, id))
    }
}
