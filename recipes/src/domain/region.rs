//! Region data model.
//!
//! A region owns its recipes by reference only: the stored region document
//! carries id, name, and coordinate, while recipes point back through their
//! `regionId`. [`Region`] is the read-side assembly of both.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Recipe, RegionId};

/// Validation errors for map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateValidationError {
    /// Latitude was not finite or outside `[-90, 90]`.
    LatitudeOutOfRange,
    /// Longitude was not finite or outside `[-180, 180]`.
    LongitudeOutOfRange,
}

impl fmt::Display for CoordinateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatitudeOutOfRange => write!(f, "latitude must be within [-90, 90]"),
            Self::LongitudeOutOfRange => write!(f, "longitude must be within [-180, 180]"),
        }
    }
}

impl std::error::Error for CoordinateValidationError {}

/// Map coordinate of a region in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinateDto", into = "CoordinateDto")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validate and construct a coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateValidationError::LatitudeOutOfRange);
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateValidationError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CoordinateDto {
    latitude: f64,
    longitude: f64,
}

impl From<Coordinate> for CoordinateDto {
    fn from(value: Coordinate) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<CoordinateDto> for Coordinate {
    type Error = CoordinateValidationError;

    fn try_from(value: CoordinateDto) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

/// Stored shape of a region document (no embedded recipes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Document id.
    pub id: RegionId,
    /// Display name.
    pub name: String,
    /// Map coordinate.
    pub coordinate: Coordinate,
}

/// A region together with the recipes whose `regionId` matches it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Document id.
    pub id: RegionId,
    /// Display name.
    pub name: String,
    /// Map coordinate.
    pub coordinate: Coordinate,
    /// Recipes referencing this region.
    pub recipes: Vec<Recipe>,
}

impl Region {
    /// Assemble a region from its stored record and its recipes.
    pub fn from_record(record: RegionRecord, recipes: Vec<Recipe>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            coordinate: record.coordinate,
            recipes,
        }
    }

    /// Split a region into its stored record and its recipes.
    pub fn into_parts(self) -> (RegionRecord, Vec<Recipe>) {
        let record = RegionRecord {
            id: self.id,
            name: self.name,
            coordinate: self.coordinate,
        };
        (record, self.recipes)
    }
}
