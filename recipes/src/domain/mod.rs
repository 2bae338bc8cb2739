//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed records for regions, recipes, and reviews,
//! the credential and session types used by authentication, and the services
//! that orchestrate the document store and identity provider ports.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`) with a stable [`ErrorCode`].
//! - Record types: [`Region`], [`Recipe`], [`Review`] and their ids.
//! - Services: [`RegionCatalogueService`], [`ReviewService`],
//!   [`AuthenticationService`].

pub mod auth;
pub mod authentication_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod recipe;
pub mod region;
pub mod region_catalogue_service;
pub mod review;
pub mod review_service;
pub mod review_stats;
mod seed;

pub use self::auth::{
    CredentialValidationError, Credentials, PASSWORD_MIN_LENGTH, Session, is_valid_email,
    is_valid_password,
};
pub use self::authentication_service::AuthenticationService;
pub use self::error::{DomainError as Error, DomainErrorValidationError, ErrorCode};
pub use self::ids::{DocumentIdValidationError, RecipeId, RegionId, ReviewId, UserId};
pub use self::recipe::{Recipe, RecipeRecord};
pub use self::region::{Coordinate, CoordinateValidationError, Region, RegionRecord};
pub use self::region_catalogue_service::{ImportSummary, RegionCatalogueService};
pub use self::review::{
    COMMENT_MAX, RATING_MAX, RATING_MIN, Rating, Review, ReviewDraft, ReviewValidationError,
};
pub use self::review_service::{ReviewPanel, ReviewService};
pub use self::review_stats::{ReviewStats, compute_stats, find_user_review};
pub use self::seed::{SeedConversionError, regions_from_seeds};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use recipes::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::not_found("no such recipe"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
