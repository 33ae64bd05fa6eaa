//! Level service - creation, lookup and owner-gated updates.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateLevel, Level, UpdateLevel};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Level service trait for dependency injection.
#[async_trait]
pub trait LevelService: Send + Sync {
    /// Get a level by ID
    async fn get_level(&self, id: Uuid) -> AppResult<Level>;

    /// Create a new draft level owned by the requesting user
    async fn create_level(&self, user_id: Uuid, fields: CreateLevel) -> AppResult<Level>;

    /// Update a level. Only the owning user may mutate; `collection_ids`
    /// replaces the level's collection memberships wholesale.
    async fn update_level(&self, user_id: Uuid, id: Uuid, fields: UpdateLevel) -> AppResult<()>;
}

/// Concrete implementation of LevelService using Unit of Work.
pub struct LevelManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LevelManager<U> {
    /// Create new level service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> LevelService for LevelManager<U> {
    async fn get_level(&self, id: Uuid) -> AppResult<Level> {
        self.uow.levels().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_level(&self, user_id: Uuid, fields: CreateLevel) -> AppResult<Level> {
        self.uow.levels().create(user_id, fields).await
    }

    async fn update_level(&self, user_id: Uuid, id: Uuid, fields: UpdateLevel) -> AppResult<()> {
        // Ownership is checked before any mutation
        let level = self.uow.levels().find_by_id(id).await?.ok_or_not_found()?;
        if level.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        if fields.name.is_some() || fields.is_draft.is_some() || fields.pack_id.is_some() {
            self.uow
                .levels()
                .update(id, fields.name, fields.is_draft, fields.pack_id)
                .await?;
        }

        if let Some(collection_ids) = fields.collection_ids {
            self.uow.levels().set_memberships(id, &collection_ids).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{
        CollectionRepository, LevelRepository, MockCollectionRepository, MockLevelRepository,
        MockReviewRepository, MockUserRepository, ReviewRepository, UserRepository,
    };
    use chrono::Utc;

    struct TestUow {
        levels: Arc<dyn LevelRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn levels(&self) -> Arc<dyn LevelRepository> {
            self.levels.clone()
        }

        fn reviews(&self) -> Arc<dyn ReviewRepository> {
            Arc::new(MockReviewRepository::new())
        }

        fn collections(&self) -> Arc<dyn CollectionRepository> {
            Arc::new(MockCollectionRepository::new())
        }
    }

    fn manager(levels: MockLevelRepository) -> LevelManager<TestUow> {
        LevelManager::new(Arc::new(TestUow {
            levels: Arc::new(levels),
        }))
    }

    fn test_level(owner: Uuid) -> Level {
        let now = Utc::now();
        Level {
            id: Uuid::new_v4(),
            user_id: owner,
            original_user_id: None,
            pack_id: None,
            name: "droplet".to_string(),
            width: 4,
            height: 4,
            least_moves: 8,
            is_draft: false,
            data: "0000".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn non_owner_cannot_update() {
        let owner = Uuid::new_v4();
        let level = test_level(owner);

        let mut levels = MockLevelRepository::new();
        levels
            .expect_find_by_id()
            .returning(move |_| Ok(Some(level.clone())));
        // No update or membership call may follow the rejection
        levels.expect_update().never();
        levels.expect_set_memberships().never();

        let service = manager(levels);
        let result = service
            .update_level(Uuid::new_v4(), Uuid::new_v4(), UpdateLevel::default())
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn unknown_level_is_not_found() {
        let mut levels = MockLevelRepository::new();
        levels.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(levels);
        let result = service
            .update_level(Uuid::new_v4(), Uuid::new_v4(), UpdateLevel::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn membership_replacement_reaches_the_repository() {
        let owner = Uuid::new_v4();
        let level = test_level(owner);
        let level_id = level.id;

        let desired = vec![Uuid::new_v4(), Uuid::new_v4()];
        let expected = desired.clone();

        let mut levels = MockLevelRepository::new();
        levels
            .expect_find_by_id()
            .returning(move |_| Ok(Some(level.clone())));
        levels
            .expect_set_memberships()
            .withf(move |_, ids| ids == expected.as_slice())
            .returning(|_, _| Ok(()));

        let service = manager(levels);
        service
            .update_level(
                owner,
                level_id,
                UpdateLevel {
                    collection_ids: Some(desired),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn explicit_null_detaches_the_pack() {
        let owner = Uuid::new_v4();
        let mut level = test_level(owner);
        level.pack_id = Some(Uuid::new_v4());
        let level_id = level.id;
        let detached = test_level(owner);

        let mut levels = MockLevelRepository::new();
        levels
            .expect_find_by_id()
            .returning(move |_| Ok(Some(level.clone())));
        // The clear must reach storage as an explicit None, not be
        // swallowed as an absent field
        levels
            .expect_update()
            .withf(|_, name, is_draft, pack| {
                name.is_none() && is_draft.is_none() && *pack == Some(None)
            })
            .returning(move |_, _, _, _| Ok(detached.clone()));

        let service = manager(levels);
        service
            .update_level(
                owner,
                level_id,
                UpdateLevel {
                    pack_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn metadata_only_update_skips_memberships() {
        let owner = Uuid::new_v4();
        let level = test_level(owner);
        let level_id = level.id;
        let renamed = test_level(owner);

        let mut levels = MockLevelRepository::new();
        levels
            .expect_find_by_id()
            .returning(move |_| Ok(Some(level.clone())));
        levels
            .expect_update()
            .returning(move |_, _, _, _| Ok(renamed.clone()));
        levels.expect_set_memberships().never();

        let service = manager(levels);
        service
            .update_level(
                owner,
                level_id,
                UpdateLevel {
                    name: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
}
