//! Review aggregation.
//!
//! Stats are derived on demand from the current review set and never stored.

use super::{Review, UserId};

/// Derived rating summary for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReviewStats {
    /// Arithmetic mean of ratings; `0.0` when there are no reviews.
    pub average_rating: f64,
    /// Number of reviews.
    pub total_reviews: usize,
}

/// Compute count and mean rating over `reviews`.
///
/// No rounding is applied; presentation rounds for display.
///
/// # Examples
/// ```
/// use recipes::domain::{ReviewStats, compute_stats};
///
/// assert_eq!(compute_stats(&[]), ReviewStats { average_rating: 0.0, total_reviews: 0 });
/// ```
pub fn compute_stats(reviews: &[Review]) -> ReviewStats {
    if reviews.is_empty() {
        return ReviewStats::default();
    }

    let total: u32 = reviews
        .iter()
        .map(|review| u32::from(review.rating.value()))
        .sum();
    let count = reviews.len();
    ReviewStats {
        average_rating: f64::from(total) / count as f64,
        total_reviews: count,
    }
}

/// Find `user_id`'s review among `reviews`.
///
/// When the store holds more than one review by the same user, the earliest
/// `created_at` wins (ties broken by review id) so repeated reads agree.
pub fn find_user_review<'a>(reviews: &'a [Review], user_id: &UserId) -> Option<&'a Review> {
    reviews
        .iter()
        .filter(|review| &review.user_id == user_id)
        .min_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        })
}
