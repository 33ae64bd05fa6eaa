//! Service Container - Centralized service access with parallel execution support.
//!
//! Holds one instance of every application service behind its trait,
//! plus the small parallel-execution helpers the aggregating services
//! use for independent reads.

use std::future::Future;
use std::sync::Arc;

use super::{AuthService, CollectionService, LevelService, ReviewService, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get level service
    fn levels(&self) -> Arc<dyn LevelService>;

    /// Get review service
    fn reviews(&self) -> Arc<dyn ReviewService>;

    /// Get collection service
    fn collections(&self) -> Arc<dyn CollectionService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    level_service: Arc<dyn LevelService>,
    review_service: Arc<dyn ReviewService>,
    collection_service: Arc<dyn CollectionService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        level_service: Arc<dyn LevelService>,
        review_service: Arc<dyn ReviewService>,
        collection_service: Arc<dyn CollectionService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            level_service,
            review_service,
            collection_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            Authenticator, CollectionManager, LevelManager, ReviewManager, UserManager,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            level_service: Arc::new(LevelManager::new(uow.clone())),
            review_service: Arc::new(ReviewManager::new(uow.clone())),
            collection_service: Arc::new(CollectionManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn levels(&self) -> Arc<dyn LevelService> {
        self.level_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }

    fn collections(&self) -> Arc<dyn CollectionService> {
        self.collection_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when
    /// both complete. If either operation fails, the error is returned
    /// immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}
