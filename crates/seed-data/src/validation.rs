//! Seed id and coordinate validation mirroring the store constraints.
//!
//! Document ids become path segments in the remote store, so they must be
//! non-empty, carry no surrounding whitespace, and contain no `/`. The
//! `recipes` crate applies the same rules to its id newtypes.

use std::ops::RangeInclusive;

/// Valid latitude range in decimal degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in decimal degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Returns `true` when `id` can be used as a document id.
///
/// # Examples
///
/// ```
/// use seed_data::is_valid_seed_id;
///
/// assert!(is_valid_seed_id("pho-bo"));
/// assert!(!is_valid_seed_id(""));
/// assert!(!is_valid_seed_id(" pho"));
/// assert!(!is_valid_seed_id("regions/north"));
/// ```
#[must_use]
pub fn is_valid_seed_id(id: &str) -> bool {
    !id.is_empty() && id.trim() == id && !id.contains('/')
}

/// Returns `true` when both coordinate parts are finite and within range.
#[must_use]
pub(crate) fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && LATITUDE_RANGE.contains(&latitude)
        && LONGITUDE_RANGE.contains(&longitude)
}
