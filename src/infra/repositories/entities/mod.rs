//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod collection;
pub mod collection_level;
pub mod level;
pub mod review;
pub mod user;
