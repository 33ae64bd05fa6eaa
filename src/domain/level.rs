//! Level domain entity and related types.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Level domain entity: a single puzzle/board definition owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Level {
    pub id: Uuid,
    /// Current owner
    pub user_id: Uuid,
    /// Original author; differs from `user_id` when the level was forked
    pub original_user_id: Option<Uuid>,
    /// The pack this level belongs to, if any
    pub pack_id: Option<Uuid>,
    pub name: String,
    pub width: i32,
    pub height: i32,
    /// Best known move-count bound
    pub least_moves: i32,
    pub is_draft: bool,
    /// Textual puzzle encoding (one row per line)
    pub data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Level {
    /// The user credited as author: the original author when the level
    /// was forked, otherwise the current owner.
    pub fn author_id(&self) -> Uuid {
        self.original_user_id.unwrap_or(self.user_id)
    }
}

/// Case-insensitive name ordering; ties keep insertion order when used
/// with a stable sort.
pub fn compare_levels_by_name(a: &Level, b: &Level) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Minimal level identity for joined views (e.g. review feeds)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelInfo {
    pub id: Uuid,
    #[schema(example = "Tunnel Vision")]
    pub name: String,
}

impl From<&Level> for LevelInfo {
    fn from(level: &Level) -> Self {
        Self {
            id: level.id,
            name: level.name.clone(),
        }
    }
}

/// Level creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLevel {
    /// Level name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Tunnel Vision")]
    pub name: String,
    /// Board width in cells
    #[validate(range(min = 1, max = 40, message = "Invalid board width"))]
    pub width: u32,
    /// Board height in cells
    #[validate(range(min = 1, max = 40, message = "Invalid board height"))]
    pub height: u32,
    /// Textual puzzle encoding
    #[validate(length(min = 1, message = "Level data is required"))]
    pub data: String,
}

/// Level update payload. Absent fields are left unchanged;
/// `collection_ids` is a full replacement of the level's memberships.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateLevel {
    /// New level name
    pub name: Option<String>,
    /// Draft/published state
    pub is_draft: Option<bool>,
    /// Pack attribution. An explicit null detaches the level from its
    /// pack; an absent field leaves it unchanged.
    #[serde(default, deserialize_with = "present_or_null")]
    #[schema(value_type = Option<Uuid>)]
    pub pack_id: Option<Option<Uuid>>,
    /// Complete desired set of collections containing this level
    pub collection_ids: Option<Vec<Uuid>>,
}

/// An absent field stays `None`; a present field, including explicit
/// null, becomes `Some(inner)`.
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(name: &str) -> Level {
        let now = Utc::now();
        Level {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            original_user_id: None,
            pack_id: None,
            name: name.to_string(),
            width: 5,
            height: 5,
            least_moves: 10,
            is_draft: false,
            data: "00000".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn levels_sort_case_insensitively() {
        let mut levels = vec![level("beta"), level("Alpha"), level("gamma")];
        levels.sort_by(compare_levels_by_name);

        let names: Vec<_> = levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn update_distinguishes_absent_pack_from_explicit_null() {
        let absent: UpdateLevel = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.pack_id, None);

        let cleared: UpdateLevel = serde_json::from_str(r#"{"pack_id": null}"#).unwrap();
        assert_eq!(cleared.pack_id, Some(None));

        let pack = Uuid::new_v4();
        let set: UpdateLevel =
            serde_json::from_str(&format!(r#"{{"pack_id": "{}"}}"#, pack)).unwrap();
        assert_eq!(set.pack_id, Some(Some(pack)));
    }

    #[test]
    fn author_falls_back_to_owner() {
        let mut l = level("fork me");
        assert_eq!(l.author_id(), l.user_id);

        let original = Uuid::new_v4();
        l.original_user_id = Some(original);
        assert_eq!(l.author_id(), original);
    }
}
