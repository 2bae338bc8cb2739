//! Seed record types.
//!
//! These mirror the stored region and recipe shapes without depending on the
//! `recipes` domain crate. Conversion into domain types happens at the point
//! of import.

use serde::{Deserialize, Serialize};

/// Map coordinate of a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSeed {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A recipe as written in the seed catalogue.
///
/// # Example
///
/// ```
/// use seed_data::RecipeSeed;
///
/// let recipe = RecipeSeed {
///     id: "bun-bo-hue".to_owned(),
///     name: "Bun bo Hue".to_owned(),
///     region: "Central Vietnam".to_owned(),
///     image: "https://images.example/bun-bo-hue.jpg".to_owned(),
///     ingredients: vec!["Rice vermicelli".to_owned()],
///     instructions: vec!["Cook the broth".to_owned()],
/// };
///
/// assert_eq!(recipe.ingredients.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSeed {
    /// Stable document id.
    pub id: String,
    /// Display name of the dish.
    pub name: String,
    /// Region label shown on recipe cards.
    pub region: String,
    /// Image URL.
    pub image: String,
    /// Ordered ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered instruction steps.
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// A region with its embedded recipes as written in the seed catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSeed {
    /// Stable document id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Map coordinate.
    pub coordinate: CoordinateSeed,
    /// Recipes belonging to this region.
    #[serde(default)]
    pub recipes: Vec<RecipeSeed>,
}
