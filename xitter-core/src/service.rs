/*
    service.rs - Boundary surface for the session/UI layer

    Async facade over the registry, distribution engine, and feed
    aggregator. Callers arrive with already-verified user ids; this
    layer only wires the core together and traces the calls. Every
    operation is a bounded unit of in-memory work, so cancellation is
    just dropping the future.
*/

use crate::config::CoreConfig;
use crate::distribution::DistributionEngine;
use crate::error::CoreResult;
use crate::feed::{FeedAggregator, FeedPost};
use crate::model::{Post, PostId, Space, SpaceId, User, UserId, Username};
use crate::registry::{MembershipOutcome, MembershipRegistry};
use crate::store::PostStore;
use std::sync::Arc;
use tracing::debug;

/// Entry point for all social operations
#[derive(Debug, Clone)]
pub struct SocialService {
    registry: MembershipRegistry,
    engine: Arc<DistributionEngine>,
    feeds: Arc<FeedAggregator>,
}

impl SocialService {
    pub fn new(config: CoreConfig) -> Self {
        let registry = MembershipRegistry::new();
        let store = PostStore::new();
        let feeds = Arc::new(FeedAggregator::new(registry.clone(), store.clone()));
        let engine = Arc::new(DistributionEngine::new(registry.clone(), store, &config));
        SocialService {
            registry,
            engine,
            feeds,
        }
    }

    /// Registry handle for provisioning and seeding
    pub fn registry(&self) -> &MembershipRegistry {
        &self.registry
    }

    pub async fn join_space(
        &self,
        user_id: &UserId,
        space_id: &SpaceId,
    ) -> CoreResult<MembershipOutcome> {
        self.registry.join_space(user_id, space_id)
    }

    pub async fn create_post(
        &self,
        author_id: &UserId,
        text: &str,
        target_space_ids: &[SpaceId],
    ) -> CoreResult<Post> {
        self.engine.create_post(author_id, text, target_space_ids)
    }

    pub async fn reply_to(
        &self,
        author_id: &UserId,
        parent_id: &PostId,
        text: &str,
        space_id: &SpaceId,
    ) -> CoreResult<Post> {
        self.engine.reply_to(author_id, parent_id, text, space_id)
    }

    pub async fn share_to_space(
        &self,
        acting_user_id: &UserId,
        post_id: &PostId,
        target_space_id: &SpaceId,
    ) -> CoreResult<Post> {
        self.engine
            .share_to_space(acting_user_id, post_id, target_space_id)
    }

    pub async fn space_feed(&self, space_id: &SpaceId) -> CoreResult<Vec<FeedPost>> {
        debug!(space = %space_id, "space feed requested");
        self.feeds.space_feed(space_id)
    }

    pub async fn home_feed(&self, user_id: &UserId) -> CoreResult<Vec<FeedPost>> {
        debug!(user = %user_id, "home feed requested");
        self.feeds.home_feed(user_id)
    }

    pub async fn author_feed(&self, username: &Username) -> CoreResult<Vec<FeedPost>> {
        debug!(author = %username, "author feed requested");
        self.feeds.author_feed(username)
    }

    /// `avatar_ref`: None leaves the avatar as is, Some(None) clears it
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        display_name: Option<String>,
        avatar_ref: Option<Option<String>>,
        home_space_id: Option<SpaceId>,
    ) -> CoreResult<User> {
        self.registry
            .update_profile(user_id, display_name, avatar_ref, home_space_id)
    }

    pub async fn get_space(&self, space_id: &SpaceId) -> CoreResult<Space> {
        self.registry.get_space(space_id)
    }

    pub async fn list_user_spaces(&self, user_id: &UserId) -> CoreResult<Vec<Space>> {
        self.registry.list_user_spaces(user_id)
    }
}

impl Default for SocialService {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}
