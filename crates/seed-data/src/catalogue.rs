//! Seed catalogue parsing and validation.
//!
//! The catalogue is a versioned JSON document listing regions with their
//! embedded recipes. Parsing validates ids, names, coordinates, and id
//! uniqueness up front so an import never starts from a catalogue that would
//! fail halfway through.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogueError;
use crate::seed::RegionSeed;
use crate::validation::{is_valid_coordinate, is_valid_seed_id};

/// Current supported catalogue version.
const SUPPORTED_VERSION: u32 = 1;

/// A validated seed catalogue of regions and their recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedCatalogue {
    version: u32,
    regions: Vec<RegionSeed>,
}

impl SeedCatalogue {
    /// Parses a seed catalogue from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if:
    /// - The JSON is malformed or missing required fields
    /// - The version is unsupported
    /// - The catalogue has no regions
    /// - Any id is blank, padded, or contains `/`
    /// - Any name is blank
    /// - Region or recipe ids repeat
    /// - A coordinate is out of range
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let raw: RawSeedCatalogue =
            serde_json::from_str(json).map_err(|e| CatalogueError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogueError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogueError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedCatalogue) -> Result<Self, CatalogueError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CatalogueError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.regions.is_empty() {
            return Err(CatalogueError::EmptyRegions);
        }

        let mut region_ids = HashSet::new();
        let mut recipe_ids = HashSet::new();
        for region in &raw.regions {
            validate_region(region)?;
            if !region_ids.insert(region.id.as_str()) {
                return Err(CatalogueError::DuplicateRegionId {
                    id: region.id.clone(),
                });
            }

            for recipe in &region.recipes {
                validate_entry("recipe", &recipe.id, &recipe.name)?;
                if !recipe_ids.insert(recipe.id.as_str()) {
                    return Err(CatalogueError::DuplicateRecipeId {
                        id: recipe.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            version: raw.version,
            regions: raw.regions,
        })
    }

    /// Returns the catalogue version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the regions in catalogue order.
    #[must_use]
    pub fn regions(&self) -> &[RegionSeed] {
        &self.regions
    }

    /// Consumes the catalogue, yielding its regions.
    #[must_use]
    pub fn into_regions(self) -> Vec<RegionSeed> {
        self.regions
    }

    /// Total number of recipes across all regions.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.regions.iter().map(|region| region.recipes.len()).sum()
    }
}

fn validate_region(region: &RegionSeed) -> Result<(), CatalogueError> {
    validate_entry("region", &region.id, &region.name)?;
    let coordinate = region.coordinate;
    if !is_valid_coordinate(coordinate.latitude, coordinate.longitude) {
        return Err(CatalogueError::InvalidCoordinate {
            id: region.id.clone(),
            latitude: coordinate.latitude.to_string(),
            longitude: coordinate.longitude.to_string(),
        });
    }
    Ok(())
}

fn validate_entry(kind: &'static str, id: &str, name: &str) -> Result<(), CatalogueError> {
    if !is_valid_seed_id(id) {
        return Err(CatalogueError::InvalidId {
            kind,
            value: id.to_owned(),
        });
    }
    if name.trim().is_empty() {
        return Err(CatalogueError::BlankName {
            kind,
            id: id.to_owned(),
        });
    }
    Ok(())
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedCatalogue {
    version: u32,
    regions: Vec<RegionSeed>,
}
