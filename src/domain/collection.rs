//! Collection domain entity and related types.
//!
//! A collection (or pack) is a named, ordered grouping of levels.
//! Membership order is caller-supplied and significant: it is preserved
//! verbatim on read after a write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::level::Level;

/// Collection domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Collection {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub name: String,
    pub author_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collection with its levels resolved in stored order
#[derive(Debug, Clone, Serialize)]
pub struct CollectionWithLevels {
    #[serde(flatten)]
    pub collection: Collection,
    pub levels: Vec<Level>,
}

/// Collection creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCollection {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Starter Pack")]
    pub name: String,
    pub author_note: Option<String>,
}

/// Collection update payload. `levels` is a full replacement of the
/// ordered membership list, never a merge.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCollection {
    pub name: Option<String>,
    pub author_note: Option<String>,
    /// Complete desired level ordering
    pub levels: Option<Vec<Uuid>>,
}

impl UpdateCollection {
    /// A payload carrying none of the updatable fields is rejected
    /// before any mutation.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.author_note.is_none() && self.levels.is_none()
    }
}
