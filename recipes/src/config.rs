//! Application configuration loaded via OrthoConfig.
//!
//! Every value may come from `RECIPES_*` environment variables or a config
//! file; accessors supply defaults for anything left unset.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1/";
const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_seed_catalogue_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("seed-data")
        .join("regions.json")
}

/// Which document store adapter to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process store; nothing survives the process.
    Memory,
    /// Firestore REST API.
    Firestore,
}

/// Errors raised when configured values cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `store_backend` is not a known backend.
    #[error("unknown store backend {value:?}; expected \"memory\" or \"firestore\"")]
    UnknownBackend {
        /// The configured value.
        value: String,
    },
    /// A required value is missing for the chosen backend.
    #[error("{field} must be set when using the {backend} backend")]
    Missing {
        /// Setting name.
        field: &'static str,
        /// Backend requiring it.
        backend: &'static str,
    },
    /// A URL setting does not parse.
    #[error("{field} is not a valid URL: {message}")]
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Parser message.
        message: String,
    },
}

/// Configuration for the store and identity adapters and the seed import.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct AppSettings {
    /// `memory` (default) or `firestore`.
    pub store_backend: Option<String>,
    /// Firestore project id; required for the Firestore backend.
    pub firestore_project_id: Option<String>,
    /// Firestore REST API root.
    pub firestore_base_url: Option<String>,
    /// Web API key sent to Firestore and Identity Toolkit.
    pub api_key: Option<String>,
    /// Identity Toolkit REST API root.
    pub identity_base_url: Option<String>,
    /// Per-request timeout in seconds for HTTP adapters.
    pub request_timeout_secs: Option<u64>,
    /// Seed catalogue JSON used by the import.
    pub seed_catalogue_path: Option<PathBuf>,
}

impl AppSettings {
    /// Return the configured backend, defaulting to [`StoreBackend::Memory`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::UnknownBackend`] for unrecognised values.
    pub fn store_backend(&self) -> Result<StoreBackend, SettingsError> {
        match self.store_backend.as_deref().map(str::trim) {
            None | Some("") => Ok(StoreBackend::Memory),
            Some(value) if value.eq_ignore_ascii_case("memory") => Ok(StoreBackend::Memory),
            Some(value) if value.eq_ignore_ascii_case("firestore") => Ok(StoreBackend::Firestore),
            Some(value) => Err(SettingsError::UnknownBackend {
                value: value.to_owned(),
            }),
        }
    }

    /// Return the Firestore project id.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn firestore_project_id(&self) -> Result<&str, SettingsError> {
        self.firestore_project_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SettingsError::Missing {
                field: "firestore_project_id",
                backend: "firestore",
            })
    }

    /// Return the Firestore API root, falling back to the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the override does not parse.
    pub fn firestore_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "firestore_base_url",
            self.firestore_base_url
                .as_deref()
                .unwrap_or(DEFAULT_FIRESTORE_BASE_URL),
        )
    }

    /// Return the Identity Toolkit API root, falling back to the public
    /// endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the override does not parse.
    pub fn identity_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "identity_base_url",
            self.identity_base_url
                .as_deref()
                .unwrap_or(DEFAULT_IDENTITY_BASE_URL),
        )
    }

    /// Return the API key, if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Return the HTTP request timeout, falling back to ten seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the seed catalogue path, falling back to the bundled fixture.
    pub fn seed_catalogue_path(&self) -> PathBuf {
        self.seed_catalogue_path
            .clone()
            .unwrap_or_else(default_seed_catalogue_path)
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|error| SettingsError::InvalidUrl {
        field,
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for application configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "RECIPES_STORE_BACKEND",
        "RECIPES_FIRESTORE_PROJECT_ID",
        "RECIPES_FIRESTORE_BASE_URL",
        "RECIPES_API_KEY",
        "RECIPES_IDENTITY_BASE_URL",
        "RECIPES_REQUEST_TIMEOUT_SECS",
        "RECIPES_SEED_CATALOGUE_PATH",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("recipes")]).expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None::<String>)).collect()
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(settings.store_backend(), Ok(StoreBackend::Memory));
        assert_eq!(
            settings.firestore_base_url().map(String::from),
            Ok(DEFAULT_FIRESTORE_BASE_URL.to_owned())
        );
        assert_eq!(
            settings.identity_base_url().map(String::from),
            Ok(DEFAULT_IDENTITY_BASE_URL.to_owned())
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.seed_catalogue_path(), default_seed_catalogue_path());
        assert!(settings.api_key().is_none());
        assert!(settings.firestore_project_id().is_err());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.retain(|(name, _)| {
            !matches!(
                *name,
                "RECIPES_STORE_BACKEND"
                    | "RECIPES_FIRESTORE_PROJECT_ID"
                    | "RECIPES_REQUEST_TIMEOUT_SECS"
                    | "RECIPES_SEED_CATALOGUE_PATH"
            )
        });
        vars.extend([
            ("RECIPES_STORE_BACKEND", Some("firestore".to_owned())),
            ("RECIPES_FIRESTORE_PROJECT_ID", Some("recipes-demo".to_owned())),
            ("RECIPES_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
            (
                "RECIPES_SEED_CATALOGUE_PATH",
                Some("/tmp/regions.json".to_owned()),
            ),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(settings.store_backend(), Ok(StoreBackend::Firestore));
        assert_eq!(settings.firestore_project_id(), Ok("recipes-demo"));
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(
            settings.seed_catalogue_path(),
            PathBuf::from("/tmp/regions.json")
        );
    }

    #[rstest]
    #[case(Some("MEMORY"), Ok(StoreBackend::Memory))]
    #[case(Some(" firestore "), Ok(StoreBackend::Firestore))]
    #[case(Some(""), Ok(StoreBackend::Memory))]
    #[case(Some("sqlite"), Err(SettingsError::UnknownBackend { value: "sqlite".to_owned() }))]
    fn backend_names_are_parsed(
        #[case] raw: Option<&str>,
        #[case] expected: Result<StoreBackend, SettingsError>,
    ) {
        let settings = AppSettings {
            store_backend: raw.map(str::to_owned),
            firestore_project_id: None,
            firestore_base_url: None,
            api_key: None,
            identity_base_url: None,
            request_timeout_secs: None,
            seed_catalogue_path: None,
        };
        assert_eq!(settings.store_backend(), expected);
    }

    #[test]
    fn invalid_url_override_is_reported() {
        let settings = AppSettings {
            store_backend: None,
            firestore_project_id: None,
            firestore_base_url: Some("not a url".to_owned()),
            api_key: None,
            identity_base_url: None,
            request_timeout_secs: Some(0),
            seed_catalogue_path: None,
        };
        assert!(matches!(
            settings.firestore_base_url(),
            Err(SettingsError::InvalidUrl {
                field: "firestore_base_url",
                ..
            })
        ));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }
}
