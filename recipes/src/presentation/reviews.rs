//! View models for the review summary and review list.

use crate::domain::{RATING_MAX, Review, ReviewStats};

/// Number of stars drawn per row.
pub const STAR_COUNT: usize = RATING_MAX as usize;

/// One star in a rating row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarState {
    /// Solid star.
    Filled,
    /// Outline star.
    Outline,
}

/// Star row for `value`: star `n` (1-based) is filled when `n <= value`.
///
/// # Examples
/// ```
/// use recipes::presentation::{StarState, star_row};
///
/// let row = star_row(3.5);
/// assert_eq!(row[2], StarState::Filled);
/// assert_eq!(row[3], StarState::Outline);
/// ```
pub fn star_row(value: f64) -> [StarState; STAR_COUNT] {
    let mut row = [StarState::Outline; STAR_COUNT];
    for (index, star) in (1_u8..).zip(row.iter_mut()) {
        if f64::from(index) <= value {
            *star = StarState::Filled;
        }
    }
    row
}

/// Aggregate header shown above the review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummaryView {
    /// Average rating with one decimal place, e.g. `4.3`.
    pub average_text: String,
    /// Stars filled up to the average.
    pub stars: [StarState; STAR_COUNT],
    /// Review count caption, e.g. `3 reviews`.
    pub caption: String,
}

impl ReviewSummaryView {
    /// Build the summary from computed stats.
    pub fn from_stats(stats: &ReviewStats) -> Self {
        let noun = if stats.total_reviews == 1 {
            "review"
        } else {
            "reviews"
        };
        Self {
            average_text: format!("{:.1}", stats.average_rating),
            stars: star_row(stats.average_rating),
            caption: format!("{} {noun}", stats.total_reviews),
        }
    }
}

/// One review row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItemView {
    /// Review id, used as the row key.
    pub id: String,
    /// Stars filled up to the rating.
    pub stars: [StarState; STAR_COUNT],
    /// Creation date as `YYYY-MM-DD` (UTC).
    pub date: String,
    /// Comment text.
    pub comment: String,
}

impl From<&Review> for ReviewItemView {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            stars: star_row(f64::from(review.rating.value())),
            date: review.created_at.format("%Y-%m-%d").to_string(),
            comment: review.comment.clone(),
        }
    }
}

/// Summary header plus one row per review, in the given order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewListView {
    /// Aggregate header.
    pub summary: ReviewSummaryView,
    /// Review rows.
    pub items: Vec<ReviewItemView>,
}

impl ReviewListView {
    /// Build the list view.
    pub fn new(reviews: &[Review], stats: &ReviewStats) -> Self {
        Self {
            summary: ReviewSummaryView::from_stats(stats),
            items: reviews.iter().map(ReviewItemView::from).collect(),
        }
    }
}
