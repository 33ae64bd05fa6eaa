//! Review service - the latest-reviews feed and review creation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::LATEST_REVIEWS_LIMIT;
use crate::domain::{CreateReview, Review, ReviewWithLevel};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// The most recent reviews carrying text, newest first, capped at
    /// the feed limit.
    async fn latest(&self) -> AppResult<Vec<ReviewWithLevel>>;

    /// Create a review. One review per (user, level) pair.
    async fn create_review(&self, user_id: Uuid, fields: CreateReview) -> AppResult<Review>;
}

/// Concrete implementation of ReviewService using Unit of Work.
pub struct ReviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReviewManager<U> {
    /// Create new review service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ReviewService for ReviewManager<U> {
    async fn latest(&self) -> AppResult<Vec<ReviewWithLevel>> {
        // Any storage failure collapses to the uniform lookup error;
        // the feed never returns partial results.
        self.uow
            .reviews()
            .latest_with_text(LATEST_REVIEWS_LIMIT)
            .await
            .map_err(|_| AppError::data_access("Reviews"))
    }

    async fn create_review(&self, user_id: Uuid, fields: CreateReview) -> AppResult<Review> {
        self.uow
            .levels()
            .find_by_id(fields.level_id)
            .await?
            .ok_or_not_found()?;

        if self
            .uow
            .reviews()
            .find_by_user_and_level(user_id, fields.level_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Review"));
        }

        // Whitespace-only text is stored as absent
        let text = fields
            .text
            .filter(|t| !t.trim().is_empty());

        self.uow
            .reviews()
            .create(user_id, fields.level_id, fields.score, text)
            .await
    }
}
