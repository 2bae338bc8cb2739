//! Static regional recipe catalogue used to seed the document store.
//!
//! This crate parses and validates the JSON seed catalogue that the admin
//! "import data" action copies into the document store. It is independent of
//! the `recipes` domain types so the catalogue format can be consumed and
//! checked without pulling in the store or identity adapters.
//!
//! # Example
//!
//! ```
//! use seed_data::SeedCatalogue;
//!
//! let json = r#"{
//!     "version": 1,
//!     "regions": [{
//!         "id": "north",
//!         "name": "Northern Vietnam",
//!         "coordinate": {"latitude": 21.0285, "longitude": 105.8542},
//!         "recipes": [{
//!             "id": "pho-bo",
//!             "name": "Pho bo",
//!             "region": "Northern Vietnam",
//!             "image": "https://images.example/pho.jpg",
//!             "ingredients": ["Rice noodles", "Beef"],
//!             "instructions": ["Simmer the broth", "Assemble the bowl"]
//!         }]
//!     }]
//! }"#;
//!
//! let catalogue = SeedCatalogue::from_json(json).expect("valid catalogue");
//! assert_eq!(catalogue.regions().len(), 1);
//! assert_eq!(catalogue.recipe_count(), 1);
//! ```

mod catalogue;
mod error;
mod seed;
mod validation;

pub use catalogue::SeedCatalogue;
pub use error::CatalogueError;
pub use seed::{CoordinateSeed, RecipeSeed, RegionSeed};
pub use validation::{LATITUDE_RANGE, LONGITUDE_RANGE, is_valid_seed_id};
