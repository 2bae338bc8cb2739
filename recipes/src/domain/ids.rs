//! Document identifiers.
//!
//! Every stored record is addressed by a string id issued either by the seed
//! catalogue, the identity provider, or (for reviews) a fresh UUID. Ids become
//! path segments in the remote store, so they share one set of rules.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when constructing document ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIdValidationError {
    /// The id was empty.
    Empty,
    /// The id had leading or trailing whitespace.
    Padded,
    /// The id contained a `/` path separator.
    ContainsSlash,
}

impl fmt::Display for DocumentIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "id must not be empty"),
            Self::Padded => write!(f, "id must not have surrounding whitespace"),
            Self::ContainsSlash => write!(f, "id must not contain '/'"),
        }
    }
}

impl std::error::Error for DocumentIdValidationError {}

fn validate_document_id(id: &str) -> Result<(), DocumentIdValidationError> {
    if id.is_empty() {
        return Err(DocumentIdValidationError::Empty);
    }
    if id.trim() != id {
        return Err(DocumentIdValidationError::Padded);
    }
    if id.contains('/') {
        return Err(DocumentIdValidationError::ContainsSlash);
    }
    Ok(())
}

macro_rules! define_document_id {
    ($(#[$outer:meta])* $name:ident) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the id from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, DocumentIdValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            fn from_owned(id: String) -> Result<Self, DocumentIdValidationError> {
                validate_document_id(&id)?;
                Ok(Self(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DocumentIdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }
    };
}

define_document_id! {
    /// Identifier of a region document.
    RegionId
}

define_document_id! {
    /// Identifier of a recipe document.
    RecipeId
}

define_document_id! {
    /// Identifier of a review document.
    ReviewId
}

define_document_id! {
    /// Opaque user identifier issued by the identity provider.
    UserId
}

impl ReviewId {
    /// Generate a new random review id.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
