//! User service - profile aggregation and account lookups.
//!
//! The profile is a derived view: the user's levels drive the pack and
//! creator sets, while reviews are fetched independently. An unknown
//! name is a renderable empty state, never an error.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    compare_creators, compare_levels_by_name, Collection, Level, ReviewWithLevel, User,
    UserResponse,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

use super::container::parallel;

/// Aggregated profile page data for a user.
#[derive(Debug, Serialize, ToSchema)]
pub struct Profile {
    /// The profile user, or `null` when no user matches the name
    pub user: Option<UserResponse>,
    /// The user's levels (owned or originally authored), sorted
    /// case-insensitively by name
    pub levels: Vec<Level>,
    /// Distinct packs those levels belong to, sorted case-insensitively
    /// by name
    pub packs: Vec<Collection>,
    /// Distinct owners of those levels, official accounts first
    pub creators: Vec<UserResponse>,
    /// The user's reviews, newest first
    pub reviews: Vec<ReviewWithLevel>,
}

impl Profile {
    /// The renderable not-found state.
    fn not_found() -> Self {
        Self {
            user: None,
            levels: Vec::new(),
            packs: Vec::new(),
            creators: Vec::new(),
            reviews: Vec::new(),
        }
    }
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Aggregate the profile page data for a user name
    async fn get_profile(&self, name: &str) -> AppResult<Profile>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_profile(&self, name: &str) -> AppResult<Profile> {
        let Some(user) = self.uow.users().find_by_name(name).await? else {
            return Ok(Profile::not_found());
        };

        // Levels and reviews are independent reads
        let levels_repo = self.uow.levels();
        let reviews_repo = self.uow.reviews();
        let (mut levels, reviews) = parallel::join2(
            levels_repo.find_by_author(user.id),
            reviews_repo.find_by_user(user.id),
        )
        .await?;

        // Stable sort: ties keep fetch order
        levels.sort_by(compare_levels_by_name);

        let pack_ids = distinct(levels.iter().filter_map(|l| l.pack_id));
        let creator_ids = distinct(levels.iter().map(|l| l.user_id));

        let collections_repo = self.uow.collections();
        let users_repo = self.uow.users();
        let (mut packs, mut creators) = parallel::join2(
            collections_repo.find_by_ids(&pack_ids),
            users_repo.find_by_ids(&creator_ids),
        )
        .await?;

        packs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        creators.sort_by(compare_creators);

        Ok(Profile {
            user: Some(UserResponse::from(user)),
            levels,
            packs,
            creators: creators.into_iter().map(UserResponse::from).collect(),
            reviews,
        })
    }
}

/// De-duplicate by identity, preserving first-seen order.
fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
