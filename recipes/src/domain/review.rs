//! Review data model.
//!
//! A review is one user's star rating and comment for one recipe. At most one
//! review per (user, recipe) pair is intended; the review service enforces it
//! on write by reusing the existing review id.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecipeId, ReviewId, UserId};

/// Lowest accepted star rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted star rating.
pub const RATING_MAX: u8 = 5;
/// Maximum comment length in characters.
pub const COMMENT_MAX: usize = 1000;

/// Validation errors for review input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// Rating outside `RATING_MIN..=RATING_MAX`.
    RatingOutOfRange {
        /// The rejected value.
        value: u8,
    },
    /// Comment longer than [`COMMENT_MAX`] characters.
    CommentTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RatingOutOfRange { value } => write!(
                f,
                "rating must be between {RATING_MIN} and {RATING_MAX}, got {value}"
            ),
            Self::CommentTooLong { max } => {
                write!(f, "comment must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Star rating from 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate and construct a rating.
    pub fn new(value: u8) -> Result<Self, ReviewValidationError> {
        if (RATING_MIN..=RATING_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewValidationError::RatingOutOfRange { value })
        }
    }

    /// Numeric star count.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Document id.
    pub id: ReviewId,
    /// Reviewed recipe.
    pub recipe_id: RecipeId,
    /// Author.
    pub user_id: UserId,
    /// Star rating.
    pub rating: Rating,
    /// Free-text comment; may be empty.
    #[serde(default)]
    pub comment: String,
    /// Creation time; kept unchanged when the author edits the review.
    pub created_at: DateTime<Utc>,
}

/// User input for creating or replacing a review.
///
/// # Examples
/// ```
/// use recipes::domain::ReviewDraft;
///
/// let draft = ReviewDraft::try_new(4, "  Lovely broth ").unwrap();
/// assert_eq!(draft.rating().value(), 4);
/// assert_eq!(draft.comment(), "Lovely broth");
/// assert!(ReviewDraft::try_new(6, "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: Rating,
    comment: String,
}

impl ReviewDraft {
    /// Validate raw form input. The comment is trimmed.
    pub fn try_new(rating: u8, comment: &str) -> Result<Self, ReviewValidationError> {
        let rating = Rating::new(rating)?;
        let comment = comment.trim();
        if comment.chars().count() > COMMENT_MAX {
            return Err(ReviewValidationError::CommentTooLong { max: COMMENT_MAX });
        }
        Ok(Self {
            rating,
            comment: comment.to_owned(),
        })
    }

    /// Selected star rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Trimmed comment text.
    pub fn comment(&self) -> &str {
        self.comment.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(u8::MAX)]
    fn rating_rejects_out_of_range(#[case] value: u8) {
        assert_eq!(
            Rating::new(value),
            Err(ReviewValidationError::RatingOutOfRange { value })
        );
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn rating_accepts_star_range(#[case] value: u8) {
        assert_eq!(Rating::new(value).map(Rating::value), Ok(value));
    }

    #[test]
    fn draft_rejects_long_comment() {
        let comment = "a".repeat(COMMENT_MAX + 1);
        assert_eq!(
            ReviewDraft::try_new(3, &comment),
            Err(ReviewValidationError::CommentTooLong { max: COMMENT_MAX })
        );
    }

    #[test]
    fn review_uses_camel_case_fields() {
        let review: Review = serde_json::from_value(json!({
            "id": "rev-1",
            "recipeId": "pho-bo",
            "userId": "u123",
            "rating": 5,
            "comment": "Great",
            "createdAt": "2026-03-01T08:30:00Z"
        }))
        .expect("decode review");

        assert_eq!(review.rating.value(), 5);
        assert_eq!(review.user_id.as_ref(), "u123");
    }

    #[test]
    fn review_with_invalid_stored_rating_fails_to_decode() {
        let result: Result<Review, _> = serde_json::from_value(json!({
            "id": "rev-1",
            "recipeId": "pho-bo",
            "userId": "u123",
            "rating": 9,
            "createdAt": "2026-03-01T08:30:00Z"
        }));
        assert!(result.is_err());
    }
}
