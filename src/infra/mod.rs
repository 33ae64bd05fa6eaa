//! Infrastructure layer - database, repositories and unit of work.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCollectionRepository, MockLevelRepository, MockReviewRepository, MockUserRepository,
};
