//! Conversion from seed catalogue records into domain regions.

use seed_data::{RecipeSeed, RegionSeed};
use thiserror::Error;

use super::{
    Coordinate, CoordinateValidationError, DocumentIdValidationError, Recipe, RecipeId, Region,
    RegionId,
};

/// Errors raised when a seed record does not satisfy domain invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedConversionError {
    /// A region or recipe id is not a valid document id.
    #[error("seed id {id:?} is invalid: {source}")]
    InvalidId {
        /// The rejected id.
        id: String,
        /// Underlying validation failure.
        source: DocumentIdValidationError,
    },
    /// The region coordinate is out of range.
    #[error("region {id} has an invalid coordinate: {source}")]
    InvalidCoordinate {
        /// Region id.
        id: String,
        /// Underlying validation failure.
        source: CoordinateValidationError,
    },
}

impl TryFrom<RecipeSeed> for Recipe {
    type Error = SeedConversionError;

    fn try_from(seed: RecipeSeed) -> Result<Self, Self::Error> {
        let id = RecipeId::new(&seed.id).map_err(|source| SeedConversionError::InvalidId {
            id: seed.id.clone(),
            source,
        })?;
        Ok(Self {
            id,
            name: seed.name,
            region: seed.region,
            image: seed.image,
            ingredients: seed.ingredients,
            instructions: seed.instructions,
        })
    }
}

impl TryFrom<RegionSeed> for Region {
    type Error = SeedConversionError;

    fn try_from(seed: RegionSeed) -> Result<Self, Self::Error> {
        let id = RegionId::new(&seed.id).map_err(|source| SeedConversionError::InvalidId {
            id: seed.id.clone(),
            source,
        })?;
        let coordinate = Coordinate::new(seed.coordinate.latitude, seed.coordinate.longitude)
            .map_err(|source| SeedConversionError::InvalidCoordinate {
                id: seed.id.clone(),
                source,
            })?;
        let recipes = seed
            .recipes
            .into_iter()
            .map(Recipe::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name: seed.name,
            coordinate,
            recipes,
        })
    }
}

/// Convert every seed region, failing on the first invalid record.
///
/// # Errors
///
/// Returns [`SeedConversionError`] for the first region or recipe that breaks
/// a domain invariant.
pub fn regions_from_seeds(
    seeds: Vec<RegionSeed>,
) -> Result<Vec<Region>, SeedConversionError> {
    seeds.into_iter().map(Region::try_from).collect()
}
