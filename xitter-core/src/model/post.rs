/*
    post.rs - Canonical post model

    One record per logically distinct post. Sharing a post into another
    space grows its space-tag set on the same record; it never clones
    the record or mints a new id. Replies are separate records pointing
    at their parent, so a post's own body is immutable after creation.
*/

use super::types::{PostId, Signature, SpaceId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical post record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Globally unique ID, assigned at creation, immutable
    pub id: PostId,

    /// Original author; never changes, regardless of who shares the post
    pub author_id: UserId,

    /// Post body
    pub text: String,

    /// Creation time (original authoring time, preserved across shares)
    pub created_at: Timestamp,

    /// Present iff this post is a reply; parents form a forest
    pub parent_id: Option<PostId>,

    /// Spaces this post is visible in; non-empty, grows on share
    pub space_tags: BTreeSet<SpaceId>,

    /// Opaque authenticity token over (id, author, text); pass-through
    pub signature: Option<Signature>,
}

impl Post {
    /// Create a root post tagged into the given spaces
    pub fn new(
        id: PostId,
        author_id: UserId,
        text: impl Into<String>,
        created_at: Timestamp,
        space_tags: BTreeSet<SpaceId>,
    ) -> Self {
        Post {
            id,
            author_id,
            text: text.into(),
            created_at,
            parent_id: None,
            space_tags,
            signature: None,
        }
    }

    /// Create a reply scoped to a single space
    pub fn new_reply(
        id: PostId,
        author_id: UserId,
        text: impl Into<String>,
        created_at: Timestamp,
        parent_id: PostId,
        space_id: SpaceId,
    ) -> Self {
        let mut tags = BTreeSet::new();
        tags.insert(space_id);
        Post {
            id,
            author_id,
            text: text.into(),
            created_at,
            parent_id: Some(parent_id),
            space_tags: tags,
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Whether this post starts a thread
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Whether this post is visible in the given space
    pub fn tagged_with(&self, space_id: &SpaceId) -> bool {
        self.space_tags.contains(space_id)
    }
}
