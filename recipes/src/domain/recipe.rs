//! Recipe data model.
//!
//! Recipes are written once by the seed import and read-only afterwards. The
//! stored document is the recipe itself plus a `regionId` foreign key.

use serde::{Deserialize, Serialize};

use super::{RecipeId, RegionId};

/// A named dish with its ingredients, instructions, and region label.
///
/// Field order of `ingredients` and `instructions` is significant and kept as
/// written by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Document id.
    pub id: RecipeId,
    /// Display name of the dish.
    pub name: String,
    /// Region label shown on cards.
    pub region: String,
    /// Image reference (URL).
    pub image: String,
    /// Ordered ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered instruction steps.
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Stored shape of a recipe: the recipe tagged with its owning region.
///
/// # Examples
/// ```
/// use recipes::domain::{Recipe, RecipeId, RecipeRecord, RegionId};
///
/// let recipe = Recipe {
///     id: RecipeId::new("pho-bo").unwrap(),
///     name: "Pho bo".to_owned(),
///     region: "Northern Vietnam".to_owned(),
///     image: String::new(),
///     ingredients: vec![],
///     instructions: vec![],
/// };
/// let record = RecipeRecord::new(recipe, RegionId::new("mien-bac").unwrap());
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["regionId"], "mien-bac");
/// assert_eq!(json["name"], "Pho bo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    /// The recipe payload, flattened into the document.
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Foreign key of the owning region.
    pub region_id: RegionId,
}

impl RecipeRecord {
    /// Tag a recipe with its owning region.
    pub fn new(recipe: Recipe, region_id: RegionId) -> Self {
        Self { recipe, region_id }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn recipe_ignores_region_foreign_key_when_read() {
        let document = json!({
            "id": "bun-cha",
            "name": "Bun cha",
            "region": "Northern Vietnam",
            "image": "https://images.example/bun-cha.jpg",
            "ingredients": ["Pork"],
            "instructions": ["Grill"],
            "regionId": "mien-bac"
        });
        let recipe: Recipe = serde_json::from_value(document).expect("decode recipe");
        assert_eq!(recipe.id.as_ref(), "bun-cha");
        assert_eq!(recipe.ingredients, vec!["Pork".to_owned()]);
    }

    #[test]
    fn record_round_trips_foreign_key() {
        let document = json!({
            "id": "com-tam",
            "name": "Com tam",
            "region": "Southern Vietnam",
            "image": "",
            "regionId": "mien-nam"
        });
        let record: RecipeRecord = serde_json::from_value(document).expect("decode record");
        assert_eq!(record.region_id.as_ref(), "mien-nam");
        assert!(record.recipe.instructions.is_empty());
    }
}
