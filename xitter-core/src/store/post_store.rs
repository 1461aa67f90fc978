/*
    post_store.rs - Canonical post store

    Arena of post records indexed by id, with secondary indices on
    parent id (reply forest) and space tag. Children are resolved
    through the parent index, never embedded in the parent record.

    Concurrency: one RwLock over the arena and indices. Append is a
    single atomic check-and-insert, so a post returned from append is
    visible to every subsequent read. Tag addition is an idempotent
    set-union under the same lock.
*/

use crate::error::{CoreError, CoreResult};
use crate::model::{Post, PostId, SpaceId};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::error;

fn handle_poison<T>(_err: PoisonError<T>) -> CoreError {
    CoreError::Internal("Lock poisoned: a thread panicked while holding the lock".to_string())
}

#[derive(Debug, Default)]
struct StoreInner {
    posts: HashMap<PostId, Post>,
    /// parent id -> child ids
    by_parent: HashMap<PostId, Vec<PostId>>,
    /// space id -> ids of posts tagged with it
    by_space: HashMap<SpaceId, BTreeSet<PostId>>,
}

/// Canonical post store: exactly one record per post id
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new canonical record
    ///
    /// An id collision is an integrity violation, not a retryable
    /// condition; it is logged and surfaced as DuplicateId.
    pub fn append(&self, post: Post) -> CoreResult<PostId> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        if inner.posts.contains_key(&post.id) {
            error!(post = %post.id, "post id collision on append");
            return Err(CoreError::DuplicateId(post.id));
        }
        let id = post.id.clone();
        if let Some(parent) = &post.parent_id {
            inner.by_parent.entry(parent.clone()).or_default().push(id.clone());
        }
        for space in &post.space_tags {
            inner.by_space.entry(space.clone()).or_default().insert(id.clone());
        }
        inner.posts.insert(id.clone(), post);
        Ok(id)
    }

    /// Add a space tag to an existing post; idempotent
    pub fn add_space_tag(&self, post_id: &PostId, space_id: &SpaceId) -> CoreResult<()> {
        let mut inner = self.inner.write().map_err(handle_poison)?;
        let post = inner
            .posts
            .get_mut(post_id)
            .ok_or_else(|| CoreError::not_found("post", post_id))?;
        if post.space_tags.insert(space_id.clone()) {
            inner
                .by_space
                .entry(space_id.clone())
                .or_default()
                .insert(post_id.clone());
        }
        Ok(())
    }

    pub fn get(&self, post_id: &PostId) -> CoreResult<Post> {
        let inner = self.inner.read().map_err(handle_poison)?;
        inner
            .posts
            .get(post_id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("post", post_id))
    }

    pub fn contains(&self, post_id: &PostId) -> CoreResult<bool> {
        let inner = self.inner.read().map_err(handle_poison)?;
        Ok(inner.posts.contains_key(post_id))
    }

    /// Number of canonical records
    pub fn len(&self) -> CoreResult<usize> {
        let inner = self.inner.read().map_err(handle_poison)?;
        Ok(inner.posts.len())
    }

    pub fn is_empty(&self) -> CoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Direct replies to a post, created_at ascending, ties by id
    pub fn children_of(&self, post_id: &PostId) -> CoreResult<Vec<Post>> {
        let inner = self.inner.read().map_err(handle_poison)?;
        let mut children: Vec<Post> = inner
            .by_parent
            .get(post_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.posts.get(id).cloned())
            .collect();
        children.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(children)
    }

    /// Snapshot of the posts tagged with a space; no ordering guarantee
    pub fn posts_tagged_with(&self, space_id: &SpaceId) -> CoreResult<Vec<Post>> {
        let inner = self.inner.read().map_err(handle_poison)?;
        Ok(inner
            .by_space
            .get(space_id)
            .into_iter()
            .flatten()
            .filter_map(|id| inner.posts.get(id).cloned())
            .collect())
    }
}
