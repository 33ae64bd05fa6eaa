//! Unit of Work - centralized repository access.
//!
//! A single `Persistence` instance hangs off the process-wide database
//! connection and hands out the per-entity repositories. Multi-statement
//! writes (the ordered-membership replacements) are owned by the stores
//! themselves, which run them inside a database transaction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    CollectionRepository, CollectionStore, LevelRepository, LevelStore, ReviewRepository,
    ReviewStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get level repository
    fn levels(&self) -> Arc<dyn LevelRepository>;

    /// Get review repository
    fn reviews(&self) -> Arc<dyn ReviewRepository>;

    /// Get collection repository
    fn collections(&self) -> Arc<dyn CollectionRepository>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    level_repo: Arc<LevelStore>,
    review_repo: Arc<ReviewStore>,
    collection_repo: Arc<CollectionStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance over a shared connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            level_repo: Arc::new(LevelStore::new(db.clone())),
            review_repo: Arc::new(ReviewStore::new(db.clone())),
            collection_repo: Arc::new(CollectionStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn levels(&self) -> Arc<dyn LevelRepository> {
        self.level_repo.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewRepository> {
        self.review_repo.clone()
    }

    fn collections(&self) -> Arc<dyn CollectionRepository> {
        self.collection_repo.clone()
    }
}
