//! Collection repository.
//!
//! Membership order is significant: reads resolve levels by ascending
//! position, and a replacement rewrites every membership row for the
//! collection inside one transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::entities::{
    collection::{self, ActiveModel, Entity as CollectionEntity},
    collection_level, level,
};
use crate::domain::{Collection, CollectionWithLevels, Level};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Collection repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Find collection by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Collection>>;

    /// Resolve a set of collections by ID. Each appears at most once.
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Collection>>;

    /// Find collection with its levels resolved in stored order
    async fn find_with_levels(&self, id: Uuid) -> AppResult<Option<CollectionWithLevels>>;

    /// Create a new collection owned by `user_id`
    async fn create(
        &self,
        user_id: Uuid,
        name: String,
        author_note: Option<String>,
    ) -> AppResult<Collection>;

    /// Update collection metadata and, when `levels` is given, replace
    /// the ordered membership wholesale. Runs atomically: concurrent
    /// conflicting updates are last-writer-wins, each internally
    /// consistent.
    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        author_note: Option<String>,
        levels: Option<Vec<Uuid>>,
    ) -> AppResult<()>;
}

/// Concrete implementation of CollectionRepository
pub struct CollectionStore {
    db: DatabaseConnection,
}

impl CollectionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Levels of a collection in stored membership order
    async fn levels_in_order(&self, collection_id: Uuid) -> AppResult<Vec<Level>> {
        let rows = collection_level::Entity::find()
            .filter(collection_level::Column::CollectionId.eq(collection_id))
            .order_by_asc(collection_level::Column::Position)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.level_id).collect();

        let models = level::Entity::find()
            .filter(level::Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        // Re-establish membership order in memory; the id-set query
        // returns rows in arbitrary order.
        let mut by_id: std::collections::HashMap<Uuid, Level> = models
            .into_iter()
            .map(Level::from)
            .map(|l| (l.id, l))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

#[async_trait]
impl CollectionRepository for CollectionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Collection>> {
        let result = CollectionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Collection::from))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Collection>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = CollectionEntity::find()
            .filter(collection::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Collection::from).collect())
    }

    async fn find_with_levels(&self, id: Uuid) -> AppResult<Option<CollectionWithLevels>> {
        let Some(model) = CollectionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let levels = self.levels_in_order(id).await?;

        Ok(Some(CollectionWithLevels {
            collection: Collection::from(model),
            levels,
        }))
    }

    async fn create(
        &self,
        user_id: Uuid,
        name: String,
        author_note: Option<String>,
    ) -> AppResult<Collection> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name),
            author_note: Set(author_note),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Collection::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        author_note: Option<String>,
        levels: Option<Vec<Uuid>>,
    ) -> AppResult<()> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let Some(model) = CollectionEntity::find_by_id(id).one(txn).await? else {
                        // Caller verified existence; a concurrent delete
                        // makes this write a no-op.
                        return Ok(());
                    };

                    let mut active: ActiveModel = model.into();
                    if let Some(name) = name {
                        active.name = Set(name);
                    }
                    if let Some(author_note) = author_note {
                        active.author_note = Set(Some(author_note));
                    }
                    active.updated_at = Set(chrono::Utc::now());
                    active.update(txn).await?;

                    if let Some(level_ids) = levels {
                        // Full replacement of order and contents
                        collection_level::Entity::delete_many()
                            .filter(collection_level::Column::CollectionId.eq(id))
                            .exec(txn)
                            .await?;

                        for (position, level_id) in level_ids.iter().enumerate() {
                            collection_level::ActiveModel {
                                collection_id: Set(id),
                                level_id: Set(*level_id),
                                position: Set(position as i32),
                            }
                            .insert(txn)
                            .await?;
                        }
                    }

                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                sea_orm::TransactionError::Connection(e) => AppError::Database(e),
                sea_orm::TransactionError::Transaction(e) => AppError::Database(e),
            })
    }
}
