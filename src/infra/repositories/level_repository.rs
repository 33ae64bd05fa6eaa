//! Level repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::{
    collection_level,
    level::{self, ActiveModel, Entity as LevelEntity},
};
use crate::domain::{CreateLevel, Level};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Level repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// Find level by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Level>>;

    /// Levels the user is attributed on, as current owner or as
    /// original author of a fork.
    async fn find_by_author(&self, user_id: Uuid) -> AppResult<Vec<Level>>;

    /// Create a new draft level owned by `user_id`
    async fn create(&self, user_id: Uuid, fields: CreateLevel) -> AppResult<Level>;

    /// Update level fields. Absent values are left unchanged;
    /// `pack_id` as `Some(None)` detaches the level from its pack.
    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        is_draft: Option<bool>,
        pack_id: Option<Option<Uuid>>,
    ) -> AppResult<Level>;

    /// Replace the set of collections containing this level.
    ///
    /// Memberships absent from `collection_ids` are removed; new ones
    /// are appended at the end of their collection. Retained
    /// memberships keep their position, so the relative order of the
    /// remaining members is preserved.
    async fn set_memberships(&self, level_id: Uuid, collection_ids: &[Uuid]) -> AppResult<()>;
}

/// Concrete implementation of LevelRepository
pub struct LevelStore {
    db: DatabaseConnection,
}

impl LevelStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LevelRepository for LevelStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Level>> {
        let result = LevelEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Level::from))
    }

    async fn find_by_author(&self, user_id: Uuid) -> AppResult<Vec<Level>> {
        let models = LevelEntity::find()
            .filter(
                Condition::any()
                    .add(level::Column::UserId.eq(user_id))
                    .add(level::Column::OriginalUserId.eq(user_id)),
            )
            .order_by_asc(level::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Level::from).collect())
    }

    async fn create(&self, user_id: Uuid, fields: CreateLevel) -> AppResult<Level> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            original_user_id: Set(None),
            pack_id: Set(None),
            name: Set(fields.name),
            width: Set(fields.width as i32),
            height: Set(fields.height as i32),
            least_moves: Set(0),
            is_draft: Set(true),
            data: Set(fields.data),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Level::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        is_draft: Option<bool>,
        pack_id: Option<Option<Uuid>>,
    ) -> AppResult<Level> {
        let model = LevelEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(is_draft) = is_draft {
            active.is_draft = Set(is_draft);
        }
        if let Some(pack_id) = pack_id {
            active.pack_id = Set(pack_id);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;

        Ok(Level::from(model))
    }

    async fn set_memberships(&self, level_id: Uuid, collection_ids: &[Uuid]) -> AppResult<()> {
        use sea_orm::sea_query::Expr;

        let desired: Vec<Uuid> = collection_ids.to_vec();

        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let current: Vec<Uuid> = collection_level::Entity::find()
                        .filter(collection_level::Column::LevelId.eq(level_id))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|row| row.collection_id)
                        .collect();

                    // Remove memberships not in the desired set. Retained
                    // rows keep their positions, so the relative order of
                    // the remaining members is untouched.
                    let removed: Vec<Uuid> = current
                        .iter()
                        .copied()
                        .filter(|c| !desired.contains(c))
                        .collect();
                    if !removed.is_empty() {
                        collection_level::Entity::delete_many()
                            .filter(collection_level::Column::LevelId.eq(level_id))
                            .filter(collection_level::Column::CollectionId.is_in(removed))
                            .exec(txn)
                            .await?;
                    }

                    // Append new memberships at the end of each collection
                    for collection_id in desired.iter().copied() {
                        if current.contains(&collection_id) {
                            continue;
                        }

                        let max_position: Option<i32> = collection_level::Entity::find()
                            .filter(collection_level::Column::CollectionId.eq(collection_id))
                            .select_only()
                            .column_as(Expr::col(collection_level::Column::Position).max(), "max")
                            .into_tuple()
                            .one(txn)
                            .await?
                            .flatten();

                        collection_level::ActiveModel {
                            collection_id: Set(collection_id),
                            level_id: Set(level_id),
                            position: Set(max_position.unwrap_or(-1) + 1),
                        }
                        .insert(txn)
                        .await?;
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
