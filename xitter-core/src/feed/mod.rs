/*
    mod.rs - Feed aggregation

    Pure read-side composition over the post store and the membership
    registry. Feeds are newest-first over root posts, ties broken by id
    descending; each root carries its reply subtree, oldest reply
    first. The home feed is the deduplicated union of the viewer's
    spaces. Because a share grows tags on one canonical record, dedup
    is a plain set operation on post ids.
*/

use crate::error::CoreResult;
use crate::model::{Post, SpaceId, UserId, Username};
use crate::registry::MembershipRegistry;
use crate::store::PostStore;
use serde::Serialize;
use std::collections::HashSet;

/// A root post with its reply subtree attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub replies: Vec<FeedPost>,
}

/// Composes space, home, and author feeds
#[derive(Debug, Clone)]
pub struct FeedAggregator {
    registry: MembershipRegistry,
    store: PostStore,
}

impl FeedAggregator {
    pub fn new(registry: MembershipRegistry, store: PostStore) -> Self {
        FeedAggregator { registry, store }
    }

    /// Root posts of a space, newest first, with reply subtrees
    ///
    /// An empty feed is a valid result; an unknown space is an error.
    pub fn space_feed(&self, space_id: &SpaceId) -> CoreResult<Vec<FeedPost>> {
        self.registry.get_space(space_id)?;
        let roots = self
            .store
            .posts_tagged_with(space_id)?
            .into_iter()
            .filter(Post::is_root)
            .collect();
        self.compose(roots)
    }

    /// Deduplicated union of the viewer's joined spaces
    pub fn home_feed(&self, user_id: &UserId) -> CoreResult<Vec<FeedPost>> {
        let memberships = self.registry.list_memberships(user_id)?;
        let mut seen = HashSet::new();
        let mut roots = Vec::new();
        for space in &memberships {
            for post in self.store.posts_tagged_with(space)? {
                if post.is_root() && seen.insert(post.id.clone()) {
                    roots.push(post);
                }
            }
        }
        self.compose(roots)
    }

    /// All root posts by an author, across every space
    pub fn author_feed(&self, username: &Username) -> CoreResult<Vec<FeedPost>> {
        let author_id = self.registry.resolve_username(username)?;
        let mut seen = HashSet::new();
        let mut roots = Vec::new();
        for space in self.registry.list_spaces()? {
            for post in self.store.posts_tagged_with(&space.id)? {
                if post.is_root() && post.author_id == author_id && seen.insert(post.id.clone()) {
                    roots.push(post);
                }
            }
        }
        self.compose(roots)
    }

    /// Sort roots newest-first and attach reply subtrees
    fn compose(&self, mut roots: Vec<Post>) -> CoreResult<Vec<FeedPost>> {
        roots.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        roots.into_iter().map(|post| self.attach_replies(post)).collect()
    }

    fn attach_replies(&self, post: Post) -> CoreResult<FeedPost> {
        let replies = self
            .store
            .children_of(&post.id)?
            .into_iter()
            .map(|child| self.attach_replies(child))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(FeedPost { post, replies })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::distribution::DistributionEngine;
    use crate::error::CoreError;
    use crate::model::{Space, User};

    struct Fixture {
        engine: DistributionEngine,
        feeds: FeedAggregator,
    }

    fn fixture() -> Fixture {
        let registry = MembershipRegistry::new();
        for id in ["xitter-community", "xitter-dev"] {
            registry
                .add_space(Space::new(SpaceId::new(id), id, "", ""))
                .unwrap();
        }
        for (id, name) in [("u-alice", "Alice"), ("u-ben", "Ben")] {
            registry
                .add_user(User::new(
                    UserId::new(id),
                    Username::new(name),
                    name,
                    SpaceId::new("xitter-community"),
                ))
                .unwrap();
        }
        let store = PostStore::new();
        let feeds = FeedAggregator::new(registry.clone(), store.clone());
        let engine = DistributionEngine::new(registry, store, &CoreConfig::default());
        Fixture { engine, feeds }
    }

    fn alice() -> UserId {
        UserId::new("u-alice")
    }

    fn ben() -> UserId {
        UserId::new("u-ben")
    }

    fn community() -> SpaceId {
        SpaceId::new("xitter-community")
    }

    fn dev() -> SpaceId {
        SpaceId::new("xitter-dev")
    }

    #[test]
    fn test_space_feed_roots_newest_first_with_replies() {
        let f = fixture();
        let first = f.engine.create_post(&alice(), "first", &[community()]).unwrap();
        let second = f.engine.create_post(&alice(), "second", &[community()]).unwrap();
        f.engine
            .reply_to(&ben(), &first.id, "re: first", &community())
            .unwrap();

        let feed = f.feeds.space_feed(&community()).unwrap();
        assert_eq!(feed.len(), 2);
        // newest first; ids are monotonic within an author so the tie
        // break on equal timestamps is still deterministic
        assert_eq!(feed[0].post.id, second.id);
        assert_eq!(feed[1].post.id, first.id);
        assert_eq!(feed[1].replies.len(), 1);
        assert_eq!(feed[1].replies[0].post.text, "re: first");
        // replies are not roots
        assert!(feed.iter().all(|fp| fp.post.is_root()));
    }

    #[test]
    fn test_space_feed_unknown_space_is_error() {
        let f = fixture();
        let err = f.feeds.space_feed(&SpaceId::new("nope")).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_space_feed_empty_is_ok() {
        let f = fixture();
        assert!(f.feeds.space_feed(&dev()).unwrap().is_empty());
    }

    #[test]
    fn test_home_feed_deduplicates_shared_post() {
        let f = fixture();
        f.engine.registry().join_space(&alice(), &dev()).unwrap();
        let post = f
            .engine
            .create_post(&alice(), "hi", &[community(), dev()])
            .unwrap();

        let feed = f.feeds.home_feed(&alice()).unwrap();
        let matching: Vec<_> = feed.iter().filter(|fp| fp.post.id == post.id).collect();
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn test_home_feed_unknown_user_is_error() {
        let f = fixture();
        let err = f.feeds.home_feed(&UserId::new("u-ghost")).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_author_feed_ignores_viewer_membership() {
        let f = fixture();
        f.engine.registry().join_space(&alice(), &dev()).unwrap();
        // dev-only post; ben is not a member of dev
        f.engine.create_post(&alice(), "dev only", &[dev()]).unwrap();

        let feed = f.feeds.author_feed(&Username::new("alice")).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.text, "dev only");
    }

    #[test]
    fn test_author_feed_case_insensitive() {
        let f = fixture();
        f.engine.create_post(&alice(), "hi", &[community()]).unwrap();

        assert_eq!(f.feeds.author_feed(&Username::new("ALICE")).unwrap().len(), 1);
        let err = f.feeds.author_feed(&Username::new("ghost")).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_nested_reply_subtree() {
        let f = fixture();
        let root = f.engine.create_post(&alice(), "root", &[community()]).unwrap();
        let reply = f
            .engine
            .reply_to(&ben(), &root.id, "level 1", &community())
            .unwrap();
        f.engine
            .reply_to(&alice(), &reply.id, "level 2", &community())
            .unwrap();

        let feed = f.feeds.space_feed(&community()).unwrap();
        assert_eq!(feed[0].replies.len(), 1);
        assert_eq!(feed[0].replies[0].replies.len(), 1);
        assert_eq!(feed[0].replies[0].replies[0].post.text, "level 2");
    }

    #[test]
    fn test_feed_post_serializes_with_nested_replies() {
        let f = fixture();
        let root = f.engine.create_post(&alice(), "root", &[community()]).unwrap();
        f.engine
            .reply_to(&ben(), &root.id, "welcome", &community())
            .unwrap();

        let feed = f.feeds.space_feed(&community()).unwrap();
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json[0]["text"], "root");
        assert_eq!(json[0]["replies"][0]["text"], "welcome");
    }
}
