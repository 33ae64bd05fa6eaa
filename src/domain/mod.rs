//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod collection;
pub mod level;
pub mod password;
pub mod review;
pub mod user;

pub use collection::{Collection, CollectionWithLevels, CreateCollection, UpdateCollection};
pub use level::{compare_levels_by_name, CreateLevel, Level, LevelInfo, UpdateLevel};
pub use password::Password;
pub use review::{CreateReview, Review, ReviewWithLevel};
pub use user::{compare_creators, User, UserResponse, UserRole};
