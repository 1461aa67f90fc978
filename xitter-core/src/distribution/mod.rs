/*
    mod.rs - Distribution engine

    The only writer path into the post store. Validates text and
    membership before any write, mints ids and signatures, and applies
    the share rule: sharing adds a space tag to the same canonical
    record and never duplicates a post's identity.
*/

pub mod id_gen;
pub mod signature;

pub use id_gen::PostIdGenerator;
pub use signature::Signer;

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::{Post, PostId, SpaceId, Timestamp, UserId};
use crate::registry::MembershipRegistry;
use crate::store::PostStore;
use std::collections::BTreeSet;
use tracing::info;

/// Creates posts and replies, and re-broadcasts posts across spaces
#[derive(Debug)]
pub struct DistributionEngine {
    registry: MembershipRegistry,
    store: PostStore,
    ids: PostIdGenerator,
    signer: Signer,
    max_post_chars: usize,
}

impl DistributionEngine {
    pub fn new(registry: MembershipRegistry, store: PostStore, config: &CoreConfig) -> Self {
        DistributionEngine {
            registry,
            store,
            ids: PostIdGenerator::new(),
            signer: Signer::new(config.signing_key),
            max_post_chars: config.max_post_chars,
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn registry(&self) -> &MembershipRegistry {
        &self.registry
    }

    fn validate_text(&self, text: &str) -> CoreResult<()> {
        if text.is_empty() {
            return Err(CoreError::Validation("post text is empty".to_string()));
        }
        let chars = text.chars().count();
        if chars > self.max_post_chars {
            return Err(CoreError::Validation(format!(
                "post text is {} code points, maximum is {}",
                chars, self.max_post_chars
            )));
        }
        Ok(())
    }

    /// Require membership in every target; all-or-nothing
    fn check_memberships(&self, user_id: &UserId, targets: &BTreeSet<SpaceId>) -> CoreResult<()> {
        for space in targets {
            if !self.registry.is_member(user_id, space)? {
                return Err(CoreError::MembershipRequired {
                    user: user_id.clone(),
                    space: space.clone(),
                });
            }
        }
        Ok(())
    }

    /// Author a post into one or more spaces
    ///
    /// An empty target list falls back to the author's home space.
    /// If any target fails the membership check, nothing is stored.
    pub fn create_post(
        &self,
        author_id: &UserId,
        text: &str,
        target_space_ids: &[SpaceId],
    ) -> CoreResult<Post> {
        self.validate_text(text)?;
        let author = self.registry.get_user(author_id)?;

        let targets: BTreeSet<SpaceId> = if target_space_ids.is_empty() {
            BTreeSet::from([author.home_space_id.clone()])
        } else {
            target_space_ids.iter().cloned().collect()
        };
        self.check_memberships(author_id, &targets)?;

        let created_at = Timestamp::now();
        let id = self.ids.next(&author.username, created_at)?;
        let signature = self.signer.sign(&id, author_id, text);
        let post = Post::new(id, author_id.clone(), text, created_at, targets)
            .with_signature(signature);

        let id = self.store.append(post)?;
        info!(post = %id, author = %author_id, "post created");
        self.store.get(&id)
    }

    /// Reply to an existing post within one of its spaces
    ///
    /// The reply is scoped to the single space it was made in, even if
    /// the parent is visible in several.
    pub fn reply_to(
        &self,
        author_id: &UserId,
        parent_id: &PostId,
        text: &str,
        space_id: &SpaceId,
    ) -> CoreResult<Post> {
        self.validate_text(text)?;
        let author = self.registry.get_user(author_id)?;
        let parent = self.store.get(parent_id)?;

        if !parent.tagged_with(space_id) {
            return Err(CoreError::Validation(format!(
                "post {} is not visible in space {}",
                parent_id, space_id
            )));
        }
        if !self.registry.is_member(author_id, space_id)? {
            return Err(CoreError::MembershipRequired {
                user: author_id.clone(),
                space: space_id.clone(),
            });
        }

        // a child never predates its parent
        let created_at = Timestamp::now().max(parent.created_at);
        let id = self.ids.next(&author.username, created_at)?;
        let signature = self.signer.sign(&id, author_id, text);
        let reply = Post::new_reply(
            id,
            author_id.clone(),
            text,
            created_at,
            parent_id.clone(),
            space_id.clone(),
        )
        .with_signature(signature);

        let id = self.store.append(reply)?;
        info!(post = %id, parent = %parent_id, "reply created");
        self.store.get(&id)
    }

    /// Re-broadcast an existing post into another space
    ///
    /// Adds a tag to the canonical record; id, author, creation time
    /// and signature are untouched. Re-sharing into a space the post
    /// already carries is a no-op success.
    pub fn share_to_space(
        &self,
        acting_user_id: &UserId,
        post_id: &PostId,
        target_space_id: &SpaceId,
    ) -> CoreResult<Post> {
        let post = self.store.get(post_id)?;
        self.registry.get_user(acting_user_id)?;
        if !self.registry.is_member(acting_user_id, target_space_id)? {
            return Err(CoreError::MembershipRequired {
                user: acting_user_id.clone(),
                space: target_space_id.clone(),
            });
        }

        if post.tagged_with(target_space_id) {
            return Ok(post);
        }
        self.store.add_space_tag(post_id, target_space_id)?;
        info!(post = %post_id, space = %target_space_id, by = %acting_user_id, "post shared");
        self.store.get(post_id)
    }
}
