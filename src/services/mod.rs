//! Service layer - Business logic
//!
//! Services orchestrate domain objects and repositories to implement
//! the application's use cases. Each service is defined as a trait for
//! dependency injection, with one concrete implementation.

mod auth_service;
mod collection_service;
pub mod container;
mod level_service;
mod review_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use collection_service::{CollectionManager, CollectionService};
pub use container::{ServiceContainer, Services};
pub use level_service::{LevelManager, LevelService};
pub use review_service::{ReviewManager, ReviewService};
pub use user_service::{Profile, UserManager, UserService};
