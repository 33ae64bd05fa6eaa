//! User domain entity and related types.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_CURATOR, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Curator,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_CURATOR => UserRole::Curator,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Curator => write!(f, "{}", ROLE_CURATOR),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Display name, unique across all users
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<UserRole>,
    /// Aggregate completion score
    pub score: i64,
    /// Curated first-party content source; sorts ahead of other
    /// creators in derived lists
    pub official: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(id: Uuid, name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            password_hash,
            roles: vec![UserRole::User],
            score: 0,
            official: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(UserRole::is_admin)
    }
}

/// Two-key creator ordering: official accounts first, then
/// case-insensitive name ascending.
pub fn compare_creators(a: &User, b: &User) -> Ordering {
    b.official
        .cmp(&a.official)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// User response (safe to return to client, credential redacted)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User display name
    #[schema(example = "sspenst")]
    pub name: String,
    pub roles: Vec<UserRole>,
    /// Aggregate completion score
    pub score: i64,
    pub official: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            roles: user.roles,
            score: user.score,
            official: user.official,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, official: bool) -> User {
        let mut u = User::new(
            Uuid::new_v4(),
            name.to_string(),
            format!("{}@example.com", name),
            "hashed".to_string(),
        );
        u.official = official;
        u
    }

    #[test]
    fn official_creators_sort_first() {
        let mut creators = vec![
            user("zed", false),
            user("Official", true),
            user("alice", false),
        ];
        creators.sort_by(compare_creators);

        let names: Vec<_> = creators.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Official", "alice", "zed"]);
    }

    #[test]
    fn creators_sort_case_insensitively_within_officialness() {
        let mut creators = vec![user("Banana", false), user("apple", false)];
        creators.sort_by(compare_creators);
        assert_eq!(creators[0].name, "apple");
    }

    #[test]
    fn role_round_trip() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("curator"), UserRole::Curator);
        assert_eq!(UserRole::from("anything-else"), UserRole::User);
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }
}
