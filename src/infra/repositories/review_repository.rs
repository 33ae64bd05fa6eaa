//! Review repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::{
    level,
    review::{self, ActiveModel, Entity as ReviewEntity},
};
use crate::domain::{LevelInfo, Review, ReviewWithLevel};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Most recent reviews carrying non-empty text, newest first, with
    /// the reviewed level resolved. Textless reviews are filtered in
    /// the query so the window still reaches `limit` when enough
    /// text-bearing reviews exist further back in time.
    async fn latest_with_text(&self, limit: u64) -> AppResult<Vec<ReviewWithLevel>>;

    /// All reviews by a user, newest first, with level identity resolved
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<ReviewWithLevel>>;

    /// Find the review a user left on a level, if any
    async fn find_by_user_and_level(
        &self,
        user_id: Uuid,
        level_id: Uuid,
    ) -> AppResult<Option<Review>>;

    /// Create a new review
    async fn create(
        &self,
        user_id: Uuid,
        level_id: Uuid,
        score: i16,
        text: Option<String>,
    ) -> AppResult<Review>;
}

/// Concrete implementation of ReviewRepository
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Join rows into the display shape, dropping any review whose level is
/// missing (cannot happen under the FK, but the join type is optional).
fn into_views(rows: Vec<(review::Model, Option<level::Model>)>) -> Vec<ReviewWithLevel> {
    rows.into_iter()
        .filter_map(|(review, level)| {
            let level = level?;
            Some(ReviewWithLevel::new(
                Review::from(review),
                LevelInfo {
                    id: level.id,
                    name: level.name,
                },
            ))
        })
        .collect()
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn latest_with_text(&self, limit: u64) -> AppResult<Vec<ReviewWithLevel>> {
        let rows = ReviewEntity::find()
            .find_also_related(level::Entity)
            .filter(review::Column::Text.is_not_null())
            .filter(review::Column::Text.ne(""))
            .order_by_desc(review::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(into_views(rows))
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<ReviewWithLevel>> {
        let rows = ReviewEntity::find()
            .find_also_related(level::Entity)
            .filter(review::Column::UserId.eq(user_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(into_views(rows))
    }

    async fn find_by_user_and_level(
        &self,
        user_id: Uuid,
        level_id: Uuid,
    ) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::LevelId.eq(level_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Review::from))
    }

    async fn create(
        &self,
        user_id: Uuid,
        level_id: Uuid,
        score: i16,
        text: Option<String>,
    ) -> AppResult<Review> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            level_id: Set(level_id),
            score: Set(score),
            text: Set(text),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        Ok(Review::from(model))
    }
}
