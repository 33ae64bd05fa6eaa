//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CollectionService, LevelService, ReviewService, ServiceContainer, Services,
    UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Level service
    pub level_service: Arc<dyn LevelService>,
    /// Review service
    pub review_service: Arc<dyn ReviewService>,
    /// Collection service
    pub collection_service: Arc<dyn CollectionService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config.clone());

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            level_service: container.levels(),
            review_service: container.reviews(),
            collection_service: container.collections(),
            database,
            config,
        }
    }
}
