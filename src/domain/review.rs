//! Review domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::level::LevelInfo;

/// Review domain entity: a user's scored, optionally-commented
/// evaluation of a level. One review per (user, level) pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub level_id: Uuid,
    pub score: i16,
    /// Free-text commentary. Reviews without text are valid records but
    /// are excluded from the latest-reviews feed.
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Whether the review carries non-empty commentary.
    pub fn has_text(&self) -> bool {
        self.text
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Review joined with the identity of the level it evaluates
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewWithLevel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub score: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    /// The reviewed level, resolved for display
    pub level: LevelInfo,
}

impl ReviewWithLevel {
    pub fn new(review: Review, level: LevelInfo) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            score: review.score,
            text: review.text,
            created_at: review.created_at,
            level,
        }
    }
}

/// Review creation payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    /// The level being reviewed
    pub level_id: Uuid,
    /// Score from 0 to 5
    #[validate(range(min = 0, max = 5, message = "Score must be between 0 and 5"))]
    pub score: i16,
    /// Optional commentary
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: Option<&str>) -> Review {
        Review {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            level_id: Uuid::new_v4(),
            score: 4,
            text: text.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn whitespace_only_text_does_not_count() {
        assert!(!review(None).has_text());
        assert!(!review(Some("   ")).has_text());
        assert!(review(Some("great level")).has_text());
    }
}
