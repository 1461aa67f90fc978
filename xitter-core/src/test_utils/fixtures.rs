//! Fixture spaces, users, and sample threads

use crate::error::CoreResult;
use crate::model::{Space, SpaceId, User, UserId, Username};
use crate::service::SocialService;

/// The official community space every fixture user calls home
pub const COMMUNITY: &str = "xitter-community";

/// The developer space
pub const DEV: &str = "xitter-dev";

/// Sample spaces, including the directory-only ones
pub fn fixture_spaces() -> Vec<Space> {
    vec![
        Space::new(
            SpaceId::new(COMMUNITY),
            "Xitter Community",
            "The official space for all Xitter users",
            "https://xitter.example.com/community",
        )
        .with_member_count(10543),
        Space::new(
            SpaceId::new(DEV),
            "Xitter Dev",
            "Space for Xitter developers",
            "https://xitter.example.com/dev",
        )
        .with_member_count(3214),
        Space::new(
            SpaceId::new("space-tech"),
            "Technology",
            "News from the world of technology",
            "https://xitter.example.com/spaces/tech",
        )
        .with_member_count(5432),
        Space::new(
            SpaceId::new("space-art"),
            "Art",
            "A space for creative people",
            "https://xitter.example.com/spaces/art",
        )
        .with_member_count(2198),
        Space::new(
            SpaceId::new("space-science"),
            "Science",
            "Scientific discoveries and discussion",
            "https://xitter.example.com/spaces/science",
        )
        .with_member_count(3765),
    ]
}

/// Sample accounts; all call the community space home
pub fn fixture_users() -> Vec<User> {
    let home = SpaceId::new(COMMUNITY);
    vec![
        User::new(UserId::new("u-xitter"), Username::new("Xitter"), "Xitter", home.clone())
            .with_avatar("/logo192.png"),
        User::new(UserId::new("u-alice"), Username::new("Alice"), "Alice", home.clone())
            .with_avatar("/alice192.jpg"),
        User::new(UserId::new("u-ben"), Username::new("Ben"), "Ben", home.clone())
            .with_avatar("/kapi192.jpg"),
        User::new(UserId::new("u-carol"), Username::new("Carol"), "Carol", home.clone())
            .with_avatar("/base192.jpg"),
        User::new(UserId::new("u-dave"), Username::new("Dave"), "Dave", home)
            .with_avatar("/base192.jpg"),
    ]
}

/// A service with the fixture spaces and users registered
pub fn seeded_service() -> SocialService {
    let service = SocialService::default();
    for space in fixture_spaces() {
        service.registry().add_space(space).expect("fixture space");
    }
    for user in fixture_users() {
        service.registry().add_user(user).expect("fixture user");
    }
    service
}

/// Author the sample welcome threads into the community space
pub async fn seed_sample_posts(service: &SocialService) -> CoreResult<()> {
    let community = SpaceId::new(COMMUNITY);

    service
        .create_post(
            &UserId::new("u-xitter"),
            "Welcome to the Xitter Community! The official space for everyone on Xitter.",
            &[community.clone()],
        )
        .await?;

    let hello = service
        .create_post(
            &UserId::new("u-alice"),
            "Hello World! Happy to join the Xitter community.",
            &[community.clone()],
        )
        .await?;
    service
        .reply_to(
            &UserId::new("u-ben"),
            &hello.id,
            "Hi Alice, welcome to Xitter!",
            &community,
        )
        .await?;

    let thoughts = service
        .create_post(
            &UserId::new("u-carol"),
            "Sharing my thoughts on the new Xitter platform. I love the spaces concept!",
            &[community.clone()],
        )
        .await?;
    service
        .reply_to(
            &UserId::new("u-dave"),
            &thoughts.id,
            "Agreed, spaces are a great idea!",
            &community,
        )
        .await?;
    service
        .reply_to(
            &UserId::new("u-xitter"),
            &thoughts.id,
            "Thanks for the feedback! We are making Xitter better every day.",
            &community,
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_ids_are_unique() {
        let spaces = fixture_spaces();
        let mut ids: Vec<_> = spaces.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), spaces.len());

        let users = fixture_users();
        let mut names: Vec<_> = users.iter().map(|u| u.username.normalized()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), users.len());
    }

    #[tokio::test]
    async fn test_seeded_service_has_sample_threads() {
        let service = seeded_service();
        seed_sample_posts(&service).await.unwrap();

        let feed = service.space_feed(&SpaceId::new(COMMUNITY)).await.unwrap();
        assert_eq!(feed.len(), 3);
        // carol's thread carries two replies
        let carol = feed
            .iter()
            .find(|fp| fp.post.author_id == UserId::new("u-carol"))
            .unwrap();
        assert_eq!(carol.replies.len(), 2);
    }
}
