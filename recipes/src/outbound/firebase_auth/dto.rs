//! DTOs for the Identity Toolkit REST API.

use serde::{Deserialize, Serialize};

use crate::domain::ports::AuthError;
use crate::domain::{Session, UserId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AuthResponseDto {
    pub(super) local_id: String,
    #[serde(default)]
    pub(super) email: String,
    pub(super) id_token: Option<String>,
}

impl AuthResponseDto {
    /// Build a session, falling back to the submitted email when the
    /// response omits it.
    pub(super) fn into_session(self, submitted_email: &str) -> Result<Session, AuthError> {
        let user_id = UserId::new(&self.local_id).map_err(|error| {
            AuthError::unavailable(format!("provider returned invalid user id: {error}"))
        })?;
        let email = if self.email.is_empty() {
            submitted_email.to_owned()
        } else {
            self.email
        };
        let session = Session::new(user_id, email);
        Ok(match self.id_token {
            Some(token) => session.with_id_token(token),
            None => session,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: String,
}

/// Map an Identity Toolkit error message such as `EMAIL_EXISTS` or
/// `WEAK_PASSWORD : Password should be at least 6 characters`.
pub(super) fn map_error_message(message: &str) -> AuthError {
    let (code, detail) = match message.split_once(':') {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    };
    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "INVALID_EMAIL" => {
            AuthError::invalid_credentials()
        }
        "EMAIL_EXISTS" => AuthError::email_in_use(),
        "USER_DISABLED" => AuthError::user_disabled(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::too_many_attempts(),
        "WEAK_PASSWORD" if detail.is_empty() => {
            AuthError::weak_password("Password should be at least 6 characters")
        }
        "WEAK_PASSWORD" => AuthError::weak_password(detail),
        "" => AuthError::rejected("Authentication failed"),
        other => AuthError::rejected(other),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("EMAIL_NOT_FOUND", AuthError::InvalidCredentials)]
    #[case("INVALID_PASSWORD", AuthError::InvalidCredentials)]
    #[case("INVALID_LOGIN_CREDENTIALS", AuthError::InvalidCredentials)]
    #[case("EMAIL_EXISTS", AuthError::EmailInUse)]
    #[case("USER_DISABLED", AuthError::UserDisabled)]
    #[case(
        "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled",
        AuthError::TooManyAttempts
    )]
    #[case(
        "WEAK_PASSWORD : Password should be at least 6 characters",
        AuthError::weak_password("Password should be at least 6 characters")
    )]
    #[case("OPERATION_NOT_ALLOWED", AuthError::rejected("OPERATION_NOT_ALLOWED"))]
    fn maps_identity_toolkit_codes(#[case] message: &str, #[case] expected: AuthError) {
        assert_eq!(map_error_message(message), expected);
    }

    #[test]
    fn response_without_email_uses_submitted_email() {
        let dto: AuthResponseDto =
            serde_json::from_str(r#"{"localId": "u123", "idToken": "tok"}"#).expect("decode");
        let session = dto.into_session("cook@example.com").expect("session");
        assert_eq!(session.email(), "cook@example.com");
        assert_eq!(session.id_token(), Some("tok"));
    }

    #[test]
    fn password_request_uses_camel_case() {
        let body = serde_json::to_value(PasswordRequestDto {
            email: "cook@example.com",
            password: "secret1",
            return_secure_token: true,
        })
        .expect("encode");
        assert_eq!(body["returnSecureToken"], true);
    }
}
