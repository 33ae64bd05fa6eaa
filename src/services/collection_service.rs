//! Collection service - owner-gated updates over ordered membership.
//!
//! The membership list in an update is a full replacement of order and
//! contents; a payload carrying none of the updatable fields is
//! rejected before any mutation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Collection, CollectionWithLevels, CreateCollection, UpdateCollection};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Collection service trait for dependency injection.
#[async_trait]
pub trait CollectionService: Send + Sync {
    /// Get a collection with its levels resolved in stored order
    async fn get_collection(&self, id: Uuid) -> AppResult<CollectionWithLevels>;

    /// Create a new collection owned by the requesting user
    async fn create_collection(
        &self,
        user_id: Uuid,
        fields: CreateCollection,
    ) -> AppResult<Collection>;

    /// Update a collection. Only the owning user may mutate; `levels`
    /// replaces the ordered membership wholesale. Returns the updated
    /// collection with levels in the new order.
    async fn update_collection(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: UpdateCollection,
    ) -> AppResult<CollectionWithLevels>;
}

/// Concrete implementation of CollectionService using Unit of Work.
pub struct CollectionManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CollectionManager<U> {
    /// Create new collection service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CollectionService for CollectionManager<U> {
    async fn get_collection(&self, id: Uuid) -> AppResult<CollectionWithLevels> {
        self.uow
            .collections()
            .find_with_levels(id)
            .await?
            .ok_or_not_found()
    }

    async fn create_collection(
        &self,
        user_id: Uuid,
        fields: CreateCollection,
    ) -> AppResult<Collection> {
        self.uow
            .collections()
            .create(user_id, fields.name, fields.author_note)
            .await
    }

    async fn update_collection(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: UpdateCollection,
    ) -> AppResult<CollectionWithLevels> {
        // Validation and authorization both precede any mutation
        if fields.is_empty() {
            return Err(AppError::validation("Missing required fields"));
        }

        let collection = self
            .uow
            .collections()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        if collection.user_id != user_id {
            return Err(AppError::Forbidden);
        }

        self.uow
            .collections()
            .update(id, fields.name, fields.author_note, fields.levels)
            .await?;

        self.uow
            .collections()
            .find_with_levels(id)
            .await?
            .ok_or_not_found()
    }
}
