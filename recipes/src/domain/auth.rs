//! Authentication primitives: credentials and sessions.
//!
//! Credential checks here are client-side UX guards run before the identity
//! provider is contacted. They are not a security boundary.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

use super::UserId;

/// Minimum password length accepted before contacting the provider.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when login or registration input is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email does not look like `local@domain.tld`.
    InvalidEmail,
    /// Password shorter than the minimum.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Registration password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Invalid email"),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters")
            }
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` when `email` has the `local@domain.tld` shape.
///
/// # Examples
/// ```
/// use recipes::domain::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@b"));
/// assert!(!is_valid_email("a.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Returns `true` when `password` meets the minimum length.
///
/// Length is counted in UTF-16 code units, matching how the app's form and
/// the identity provider measure it; a character outside the Basic
/// Multilingual Plane counts as two.
pub fn is_valid_password(password: &str) -> bool {
    password.encode_utf16().count() >= PASSWORD_MIN_LENGTH
}

/// Validated email/password pair sent to the identity provider.
///
/// ## Invariants
/// - `email` matches [`is_valid_email`].
/// - `password` has at least [`PASSWORD_MIN_LENGTH`] characters and is kept
///   exactly as typed.
///
/// # Examples
/// ```
/// use recipes::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("cook@example.com", "secret1").unwrap();
/// assert_eq!(creds.email(), "cook@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate login input. The email is checked before the password.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        if !is_valid_email(email) {
            return Err(CredentialValidationError::InvalidEmail);
        }
        if !is_valid_password(password) {
            return Err(CredentialValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }

        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Validate registration input, additionally requiring the confirmation
    /// to match.
    pub fn for_registration(
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, CredentialValidationError> {
        let credentials = Self::try_from_parts(email, password)?;
        if password != confirmation {
            return Err(CredentialValidationError::PasswordMismatch);
        }
        Ok(credentials)
    }

    /// Email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as typed.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Authenticated principal issued by the identity provider.
///
/// Sessions are passed explicitly to the services that need them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
    email: String,
    id_token: Option<Zeroizing<String>>,
}

impl Session {
    /// Build a session without a provider token.
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            id_token: None,
        }
    }

    /// Attach the provider-issued ID token.
    #[must_use]
    pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(Zeroizing::new(token.into()));
        self
    }

    /// Opaque user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Email the user signed in with.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Provider-issued ID token, when the provider returns one.
    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_ref().map(|token| token.as_str())
    }
}
