//! Profile aggregation tests.
//!
//! Covers the fork attribution path: a profile lists levels the user
//! originally authored even after a fork changed ownership, and the
//! creator list then includes the current owners.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use puzzlebase::domain::{Level, LevelInfo, Review, ReviewWithLevel, User};
use puzzlebase::errors::AppResult;
use puzzlebase::infra::repositories::{
    CollectionRepository, LevelRepository, MockCollectionRepository, MockLevelRepository,
    MockReviewRepository, MockUserRepository, ReviewRepository, UserRepository,
};
use puzzlebase::infra::UnitOfWork;
use puzzlebase::services::{UserManager, UserService};

struct TestUow {
    users: Arc<dyn UserRepository>,
    levels: Arc<dyn LevelRepository>,
    reviews: Arc<dyn ReviewRepository>,
    collections: Arc<dyn CollectionRepository>,
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn levels(&self) -> Arc<dyn LevelRepository> {
        self.levels.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.reviews.clone()
    }

    fn collections(&self) -> Arc<dyn CollectionRepository> {
        self.collections.clone()
    }
}

fn service(
    users: MockUserRepository,
    levels: MockLevelRepository,
    reviews: MockReviewRepository,
    collections: MockCollectionRepository,
) -> UserManager<TestUow> {
    UserManager::new(Arc::new(TestUow {
        users: Arc::new(users),
        levels: Arc::new(levels),
        reviews: Arc::new(reviews),
        collections: Arc::new(collections),
    }))
}

fn user(name: &str) -> User {
    User::new(
        Uuid::new_v4(),
        name.to_string(),
        format!("{}@example.com", name),
        "hash".to_string(),
    )
}

fn level(owner: Uuid, original: Option<Uuid>, name: &str) -> Level {
    let now = Utc::now();
    Level {
        id: Uuid::new_v4(),
        user_id: owner,
        original_user_id: original,
        pack_id: None,
        name: name.to_string(),
        width: 5,
        height: 5,
        least_moves: 12,
        is_draft: false,
        data: "00000".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn review_at(minutes_ago: i64, text: &str) -> ReviewWithLevel {
    ReviewWithLevel::new(
        Review {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            level_id: Uuid::new_v4(),
            score: 4,
            text: Some(text.to_string()),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        },
        LevelInfo {
            id: Uuid::new_v4(),
            name: "some level".to_string(),
        },
    )
}

#[tokio::test]
async fn forked_levels_credit_both_author_and_current_owner() {
    let author = user("author");
    let new_owner = user("adopter");
    let author_id = author.id;
    let owner_id = new_owner.id;

    // One level still owned, one forked away
    let levels = vec![
        level(author_id, None, "kept"),
        level(owner_id, Some(author_id), "forked away"),
    ];

    let mut users = MockUserRepository::new();
    let found = author.clone();
    users
        .expect_find_by_name()
        .returning(move |_| Ok(Some(found.clone())));
    let creators = vec![author.clone(), new_owner.clone()];
    users.expect_find_by_ids().returning(move |ids| {
        assert_eq!(ids.len(), 2);
        Ok(creators.clone())
    });

    let mut level_repo = MockLevelRepository::new();
    level_repo
        .expect_find_by_author()
        .returning(move |_| Ok(levels.clone()));

    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_user().returning(|_| Ok(Vec::new()));

    let mut collections = MockCollectionRepository::new();
    collections.expect_find_by_ids().returning(|_| Ok(Vec::new()));

    let service = service(users, level_repo, reviews, collections);
    let profile = service.get_profile("author").await.unwrap();

    assert_eq!(profile.levels.len(), 2);
    let creator_ids: Vec<_> = profile.creators.iter().map(|c| c.id).collect();
    assert!(creator_ids.contains(&author_id));
    assert!(creator_ids.contains(&owner_id));
}

#[tokio::test]
async fn reviews_arrive_newest_first() {
    let profile_user = user("reviewer");

    let mut users = MockUserRepository::new();
    let found = profile_user.clone();
    users
        .expect_find_by_name()
        .returning(move |_| Ok(Some(found.clone())));
    users.expect_find_by_ids().returning(|_| Ok(Vec::new()));

    let mut level_repo = MockLevelRepository::new();
    level_repo.expect_find_by_author().returning(|_| Ok(Vec::new()));

    // The repository returns newest-first; the aggregate preserves it
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_user().returning(|_| {
        Ok(vec![
            review_at(1, "newest"),
            review_at(60, "older"),
            review_at(600, "oldest"),
        ])
    });

    let mut collections = MockCollectionRepository::new();
    collections.expect_find_by_ids().returning(|_| Ok(Vec::new()));

    let service = service(users, level_repo, reviews, collections);
    let profile = service.get_profile("reviewer").await.unwrap();

    let texts: Vec<_> = profile
        .reviews
        .iter()
        .map(|r| r.text.as_deref().unwrap())
        .collect();
    assert_eq!(texts, vec!["newest", "older", "oldest"]);
}
