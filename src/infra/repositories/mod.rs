//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod collection_repository;
pub(crate) mod entities;
mod level_repository;
mod review_repository;
mod user_repository;

pub use collection_repository::{CollectionRepository, CollectionStore};
pub use level_repository::{LevelRepository, LevelStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use collection_repository::MockCollectionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use level_repository::MockLevelRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
