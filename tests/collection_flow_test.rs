//! Collection membership flow tests.
//!
//! Exercises the collection and level services together over an
//! in-memory unit of work that mirrors the store semantics: collection
//! updates replace the ordered membership wholesale, while level-side
//! updates remove or append memberships without disturbing the relative
//! order of retained members.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use puzzlebase::domain::{
    Collection, CollectionWithLevels, CreateCollection, CreateLevel, Level, Review,
    ReviewWithLevel, UpdateCollection, UpdateLevel, User,
};
use puzzlebase::errors::{AppError, AppResult};
use puzzlebase::infra::repositories::{
    CollectionRepository, LevelRepository, ReviewRepository, UserRepository,
};
use puzzlebase::infra::UnitOfWork;
use puzzlebase::services::{
    CollectionManager, CollectionService, LevelManager, LevelService,
};

#[derive(Clone, Copy)]
struct Membership {
    collection_id: Uuid,
    level_id: Uuid,
    position: i32,
}

#[derive(Default)]
struct Store {
    levels: Vec<Level>,
    collections: Vec<Collection>,
    memberships: Vec<Membership>,
}

#[derive(Default)]
struct InMemory {
    store: Mutex<Store>,
}

struct InMemoryLevels(Arc<InMemory>);
struct InMemoryCollections(Arc<InMemory>);

#[async_trait]
impl LevelRepository for InMemoryLevels {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Level>> {
        let store = self.0.store.lock().unwrap();
        Ok(store.levels.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_author(&self, user_id: Uuid) -> AppResult<Vec<Level>> {
        let store = self.0.store.lock().unwrap();
        Ok(store
            .levels
            .iter()
            .filter(|l| l.user_id == user_id || l.original_user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create(&self, user_id: Uuid, fields: CreateLevel) -> AppResult<Level> {
        let now = Utc::now();
        let level = Level {
            id: Uuid::new_v4(),
            user_id,
            original_user_id: None,
            pack_id: None,
            name: fields.name,
            width: fields.width as i32,
            height: fields.height as i32,
            least_moves: 0,
            is_draft: true,
            data: fields.data,
            created_at: now,
            updated_at: now,
        };
        self.0.store.lock().unwrap().levels.push(level.clone());
        Ok(level)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        is_draft: Option<bool>,
        pack_id: Option<Option<Uuid>>,
    ) -> AppResult<Level> {
        let mut store = self.0.store.lock().unwrap();
        let level = store
            .levels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::NotFound)?;
        if let Some(name) = name {
            level.name = name;
        }
        if let Some(is_draft) = is_draft {
            level.is_draft = is_draft;
        }
        if let Some(pack_id) = pack_id {
            level.pack_id = pack_id;
        }
        level.updated_at = Utc::now();
        Ok(level.clone())
    }

    async fn set_memberships(&self, level_id: Uuid, collection_ids: &[Uuid]) -> AppResult<()> {
        let mut store = self.0.store.lock().unwrap();

        // Drop memberships not in the desired set; retained rows keep
        // their positions.
        store
            .memberships
            .retain(|m| m.level_id != level_id || collection_ids.contains(&m.collection_id));

        // Append new memberships at the end of each collection
        for collection_id in collection_ids {
            let already = store
                .memberships
                .iter()
                .any(|m| m.level_id == level_id && m.collection_id == *collection_id);
            if already {
                continue;
            }
            let max = store
                .memberships
                .iter()
                .filter(|m| m.collection_id == *collection_id)
                .map(|m| m.position)
                .max()
                .unwrap_or(-1);
            store.memberships.push(Membership {
                collection_id: *collection_id,
                level_id,
                position: max + 1,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CollectionRepository for InMemoryCollections {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Collection>> {
        let store = self.0.store.lock().unwrap();
        Ok(store.collections.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Collection>> {
        let store = self.0.store.lock().unwrap();
        Ok(store
            .collections
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_with_levels(&self, id: Uuid) -> AppResult<Option<CollectionWithLevels>> {
        let store = self.0.store.lock().unwrap();
        let Some(collection) = store.collections.iter().find(|c| c.id == id).cloned() else {
            return Ok(None);
        };

        let mut rows: Vec<&Membership> = store
            .memberships
            .iter()
            .filter(|m| m.collection_id == id)
            .collect();
        rows.sort_by_key(|m| m.position);

        let levels = rows
            .iter()
            .filter_map(|m| store.levels.iter().find(|l| l.id == m.level_id).cloned())
            .collect();

        Ok(Some(CollectionWithLevels { collection, levels }))
    }

    async fn create(
        &self,
        user_id: Uuid,
        name: String,
        author_note: Option<String>,
    ) -> AppResult<Collection> {
        let now = Utc::now();
        let collection = Collection {
            id: Uuid::new_v4(),
            user_id,
            name,
            author_note,
            created_at: now,
            updated_at: now,
        };
        self.0
            .store
            .lock()
            .unwrap()
            .collections
            .push(collection.clone());
        Ok(collection)
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        author_note: Option<String>,
        levels: Option<Vec<Uuid>>,
    ) -> AppResult<()> {
        let mut store = self.0.store.lock().unwrap();

        if let Some(collection) = store.collections.iter_mut().find(|c| c.id == id) {
            if let Some(name) = name {
                collection.name = name;
            }
            if let Some(author_note) = author_note {
                collection.author_note = Some(author_note);
            }
            collection.updated_at = Utc::now();
        }

        if let Some(level_ids) = levels {
            // Full replacement of order and contents
            store.memberships.retain(|m| m.collection_id != id);
            for (position, level_id) in level_ids.iter().enumerate() {
                store.memberships.push(Membership {
                    collection_id: id,
                    level_id: *level_id,
                    position: position as i32,
                });
            }
        }

        Ok(())
    }
}

struct StubUsers;

#[async_trait]
impl UserRepository for StubUsers {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_ids(&self, _ids: &[Uuid]) -> AppResult<Vec<User>> {
        Ok(Vec::new())
    }

    async fn create(
        &self,
        _name: String,
        _email: String,
        _password_hash: String,
    ) -> AppResult<User> {
        Err(AppError::internal("not supported in this test"))
    }
}

struct StubReviews;

#[async_trait]
impl ReviewRepository for StubReviews {
    async fn latest_with_text(&self, _limit: u64) -> AppResult<Vec<ReviewWithLevel>> {
        Ok(Vec::new())
    }

    async fn find_by_user(&self, _user_id: Uuid) -> AppResult<Vec<ReviewWithLevel>> {
        Ok(Vec::new())
    }

    async fn find_by_user_and_level(
        &self,
        _user_id: Uuid,
        _level_id: Uuid,
    ) -> AppResult<Option<Review>> {
        Ok(None)
    }

    async fn create(
        &self,
        _user_id: Uuid,
        _level_id: Uuid,
        _score: i16,
        _text: Option<String>,
    ) -> AppResult<Review> {
        Err(AppError::internal("not supported in this test"))
    }
}

struct InMemoryUow {
    inner: Arc<InMemory>,
}

impl InMemoryUow {
    fn new() -> Self {
        Self {
            inner: Arc::new(InMemory::default()),
        }
    }
}

impl UnitOfWork for InMemoryUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(StubUsers)
    }

    fn levels(&self) -> Arc<dyn LevelRepository> {
        Arc::new(InMemoryLevels(self.inner.clone()))
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        Arc::new(StubReviews)
    }

    fn collections(&self) -> Arc<dyn CollectionRepository> {
        Arc::new(InMemoryCollections(self.inner.clone()))
    }
}

struct Services {
    collections: CollectionManager<InMemoryUow>,
    levels: LevelManager<InMemoryUow>,
}

fn services() -> Services {
    let uow = Arc::new(InMemoryUow::new());
    Services {
        collections: CollectionManager::new(uow.clone()),
        levels: LevelManager::new(uow),
    }
}

async fn make_level(services: &Services, owner: Uuid, name: &str) -> Level {
    services
        .levels
        .create_level(
            owner,
            CreateLevel {
                name: name.to_string(),
                width: 5,
                height: 5,
                data: "00000".to_string(),
            },
        )
        .await
        .unwrap()
}

async fn make_collection(services: &Services, owner: Uuid) -> Collection {
    services
        .collections
        .create_collection(
            owner,
            CreateCollection {
                name: "Campaign".to_string(),
                author_note: Some("hand-picked".to_string()),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn membership_replacement_round_trips_order() {
    let services = services();
    let owner = Uuid::new_v4();
    let collection = make_collection(&services, owner).await;

    let mut ids = Vec::new();
    for i in 0..10 {
        ids.push(make_level(&services, owner, &format!("level {}", i)).await.id);
    }
    ids.reverse();

    let updated = services
        .collections
        .update_collection(
            owner,
            collection.id,
            UpdateCollection {
                levels: Some(ids.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let read_back: Vec<Uuid> = updated.levels.iter().map(|l| l.id).collect();
    assert_eq!(read_back, ids);

    // Idempotent: the same payload produces the same stored state
    let again = services
        .collections
        .update_collection(
            owner,
            collection.id,
            UpdateCollection {
                levels: Some(ids.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let again_ids: Vec<Uuid> = again.levels.iter().map(|l| l.id).collect();
    assert_eq!(again_ids, ids);
}

#[tokio::test]
async fn reordering_is_a_full_replacement() {
    let services = services();
    let owner = Uuid::new_v4();
    let collection = make_collection(&services, owner).await;

    let a = make_level(&services, owner, "a").await.id;
    let b = make_level(&services, owner, "b").await.id;
    let c = make_level(&services, owner, "c").await.id;

    for ordering in [vec![a, b, c], vec![c, a, b], vec![b, c, a]] {
        let updated = services
            .collections
            .update_collection(
                owner,
                collection.id,
                UpdateCollection {
                    levels: Some(ordering.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let ids: Vec<Uuid> = updated.levels.iter().map(|l| l.id).collect();
        assert_eq!(ids, ordering);
    }
}

#[tokio::test]
async fn level_side_removal_preserves_remaining_order() {
    let services = services();
    let owner = Uuid::new_v4();
    let collection = make_collection(&services, owner).await;

    let a = make_level(&services, owner, "a").await;
    let b = make_level(&services, owner, "b").await;
    let c = make_level(&services, owner, "c").await;
    let d = make_level(&services, owner, "d").await;

    services
        .collections
        .update_collection(
            owner,
            collection.id,
            UpdateCollection {
                levels: Some(vec![a.id, b.id, c.id, d.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Removing b from every collection goes through the level update
    services
        .levels
        .update_level(
            owner,
            b.id,
            UpdateLevel {
                collection_ids: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let read_back = services
        .collections
        .get_collection(collection.id)
        .await
        .unwrap();
    let ids: Vec<Uuid> = read_back.levels.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![a.id, c.id, d.id]);
}

#[tokio::test]
async fn level_side_addition_appends_at_the_end() {
    let services = services();
    let owner = Uuid::new_v4();
    let collection = make_collection(&services, owner).await;

    let a = make_level(&services, owner, "a").await;
    let b = make_level(&services, owner, "b").await;
    let newcomer = make_level(&services, owner, "newcomer").await;

    services
        .collections
        .update_collection(
            owner,
            collection.id,
            UpdateCollection {
                levels: Some(vec![a.id, b.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    services
        .levels
        .update_level(
            owner,
            newcomer.id,
            UpdateLevel {
                collection_ids: Some(vec![collection.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let read_back = services
        .collections
        .get_collection(collection.id)
        .await
        .unwrap();
    let ids: Vec<Uuid> = read_back.levels.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![a.id, b.id, newcomer.id]);
}

#[tokio::test]
async fn empty_update_payload_is_rejected() {
    let services = services();
    let owner = Uuid::new_v4();
    let collection = make_collection(&services, owner).await;

    let err = services
        .collections
        .update_collection(owner, collection.id, UpdateCollection::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Missing required fields");
}

#[tokio::test]
async fn only_the_owner_may_mutate() {
    let services = services();
    let owner = Uuid::new_v4();
    let collection = make_collection(&services, owner).await;

    let result = services
        .collections
        .update_collection(
            Uuid::new_v4(),
            collection.id,
            UpdateCollection {
                name: Some("stolen".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}
