//! Scenario tests over the seeded service, mirroring the demo flows

use xitter_core::error::CoreError;
use xitter_core::model::{SpaceId, UserId, Username};
use xitter_core::test_utils::{seed_sample_posts, seeded_service, COMMUNITY, DEV};

#[tokio::test]
async fn demo_scenario_end_to_end() {
    let service = seeded_service();
    seed_sample_posts(&service).await.unwrap();

    let alice = UserId::new("u-alice");
    let community = SpaceId::new(COMMUNITY);
    let dev = SpaceId::new(DEV);

    // alice (home = community) joins dev and cross-posts
    service.join_space(&alice, &dev).await.unwrap();
    let post = service
        .create_post(&alice, "hi", &[community.clone(), dev.clone()])
        .await
        .unwrap();
    assert!(post.tagged_with(&community));
    assert!(post.tagged_with(&dev));

    // a root post in each space feed
    let community_feed = service.space_feed(&community).await.unwrap();
    assert!(community_feed.iter().any(|fp| fp.post.id == post.id));
    let dev_feed = service.space_feed(&dev).await.unwrap();
    assert!(dev_feed.iter().any(|fp| fp.post.id == post.id));

    // exactly once in alice's home feed
    let home = service.home_feed(&alice).await.unwrap();
    assert_eq!(home.iter().filter(|fp| fp.post.id == post.id).count(), 1);
}

#[tokio::test]
async fn seeded_threads_surface_in_author_feeds() {
    let service = seeded_service();
    seed_sample_posts(&service).await.unwrap();

    let carol = service.author_feed(&Username::new("carol")).await.unwrap();
    assert_eq!(carol.len(), 1);
    assert_eq!(carol[0].replies.len(), 2);

    // ben only replied; replies never show up as author-feed roots
    let ben = service.author_feed(&Username::new("ben")).await.unwrap();
    assert!(ben.is_empty());
}

#[tokio::test]
async fn posting_into_unjoined_space_fails_cleanly() {
    let service = seeded_service();
    let ben = UserId::new("u-ben");

    let err = service
        .create_post(&ben, "hi", &[SpaceId::new(DEV)])
        .await
        .unwrap_err();
    match err {
        CoreError::MembershipRequired { space, .. } => assert_eq!(space, SpaceId::new(DEV)),
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(service.space_feed(&SpaceId::new(DEV)).await.unwrap().is_empty());
}

#[tokio::test]
async fn directory_views_follow_memberships() {
    let service = seeded_service();
    let alice = UserId::new("u-alice");

    let before = service.list_user_spaces(&alice).await.unwrap();
    assert_eq!(before.len(), 1);

    service.join_space(&alice, &SpaceId::new(DEV)).await.unwrap();
    let after = service.list_user_spaces(&alice).await.unwrap();
    assert_eq!(after.len(), 2);

    // fixture member counts grow from their seeded values
    let dev = service.get_space(&SpaceId::new(DEV)).await.unwrap();
    assert_eq!(dev.member_count, 3215);
}
