//! Error types for the seed-data crate.
//!
//! Catalogue parsing and validation failures are reported through a single
//! semantic enum so callers can tell I/O, JSON, and content problems apart.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a seed catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read.
    #[error("failed to read seed catalogue at '{path}': {message}")]
    IoError {
        /// Path to the catalogue file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The catalogue JSON is malformed or missing required fields.
    #[error("invalid seed catalogue JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The catalogue version is not supported.
    #[error("unsupported seed catalogue version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the catalogue.
        actual: u32,
    },

    /// The catalogue contains no regions.
    #[error("seed catalogue contains no regions")]
    EmptyRegions,

    /// A region or recipe id is blank or not usable as a document id.
    #[error("invalid {kind} id '{value}'")]
    InvalidId {
        /// Either `region` or `recipe`.
        kind: &'static str,
        /// The rejected id.
        value: String,
    },

    /// A region or recipe has a blank name.
    #[error("{kind} '{id}' has a blank name")]
    BlankName {
        /// Either `region` or `recipe`.
        kind: &'static str,
        /// Id of the offending entry.
        id: String,
    },

    /// Two regions share the same id.
    #[error("duplicate region id '{id}'")]
    DuplicateRegionId {
        /// The repeated id.
        id: String,
    },

    /// Two recipes share the same id anywhere in the catalogue.
    #[error("duplicate recipe id '{id}'")]
    DuplicateRecipeId {
        /// The repeated id.
        id: String,
    },

    /// A region coordinate lies outside the valid latitude/longitude range.
    #[error("region '{id}' has an out-of-range coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Id of the offending region.
        id: String,
        /// Latitude as written in the catalogue.
        latitude: String,
        /// Longitude as written in the catalogue.
        longitude: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_formats_correctly() {
        let err = CatalogueError::IoError {
            path: PathBuf::from("/tmp/regions.json"),
            message: "file not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read seed catalogue at '/tmp/regions.json': file not found"
        );
    }

    #[test]
    fn version_error_formats_correctly() {
        let err = CatalogueError::UnsupportedVersion {
            expected: 1,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "unsupported seed catalogue version: expected 1, found 3"
        );
    }

    #[test]
    fn invalid_id_formats_correctly() {
        let err = CatalogueError::InvalidId {
            kind: "recipe",
            value: "a/b".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid recipe id 'a/b'");
    }

    #[test]
    fn coordinate_error_formats_correctly() {
        let err = CatalogueError::InvalidCoordinate {
            id: "north".to_owned(),
            latitude: "91".to_owned(),
            longitude: "105.8".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "region 'north' has an out-of-range coordinate (91, 105.8)"
        );
    }
}
