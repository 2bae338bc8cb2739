//! Login, registration, and logout against the identity provider.
//!
//! Form input is validated locally first; the provider is only contacted
//! with well-formed credentials.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::ports::{AuthError, IdentityProvider};
use crate::domain::{CredentialValidationError, Credentials, Error, Session};

/// Authentication use-cases consumed by the profile screen.
#[derive(Clone)]
pub struct AuthenticationService<P> {
    provider: Arc<P>,
}

impl<P> AuthenticationService<P> {
    /// Create a new service over the given identity provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P> AuthenticationService<P>
where
    P: IdentityProvider,
{
    /// Sign in with `email` and `password`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for malformed input (nothing is sent),
    /// `Unauthorized` when the provider rejects the attempt, and
    /// `ServiceUnavailable` when it cannot be reached.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let credentials = Credentials::try_from_parts(email, password).map_err(map_validation)?;
        let session = self
            .provider
            .sign_in(&credentials)
            .await
            .map_err(map_auth_error)?;
        info!(user_id = %session.user_id(), "signed in");
        Ok(session)
    }

    /// Create an account for `email` after checking the confirmation.
    ///
    /// # Errors
    ///
    /// As [`Self::login`], plus `InvalidRequest` when `confirmation` differs
    /// from `password`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<Session, Error> {
        let credentials =
            Credentials::for_registration(email, password, confirmation).map_err(map_validation)?;
        let session = self
            .provider
            .sign_up(&credentials)
            .await
            .map_err(map_auth_error)?;
        info!(user_id = %session.user_id(), "registered");
        Ok(session)
    }

    /// Clear the current session.
    ///
    /// # Errors
    ///
    /// Returns the mapped provider error.
    pub async fn logout(&self) -> Result<(), Error> {
        self.provider.sign_out().await.map_err(map_auth_error)?;
        info!("signed out");
        Ok(())
    }

    /// Observe the current session.
    pub fn sessions(&self) -> watch::Receiver<Option<Session>> {
        self.provider.sessions()
    }

    /// Snapshot of the current session.
    pub fn current_session(&self) -> Option<Session> {
        self.provider.sessions().borrow().clone()
    }
}

fn map_validation(error: CredentialValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

fn map_auth_error(error: AuthError) -> Error {
    match error {
        AuthError::Unavailable { .. } => {
            warn!(error = %error, "identity provider unavailable");
            Error::service_unavailable(error.to_string())
        }
        other => Error::unauthorized(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockIdentityProvider;
    use crate::domain::{ErrorCode, UserId};
    use rstest::rstest;

    fn session(email: &str) -> Session {
        Session::new(UserId::new("u123").expect("user id"), email)
    }

    #[tokio::test]
    async fn login_passes_validated_credentials() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_in()
            .withf(|creds| creds.email() == "cook@example.com" && creds.password() == "secret1")
            .times(1)
            .returning(|creds| Ok(session(creds.email())));

        let service = AuthenticationService::new(Arc::new(provider));
        let session = service
            .login("cook@example.com", "secret1")
            .await
            .expect("login succeeds");
        assert_eq!(session.email(), "cook@example.com");
    }

    #[rstest]
    #[case("a@b", "secret1", "Invalid email")]
    #[case("a.com", "secret1", "Invalid email")]
    #[case("a@b.com", "12345", "Password must be at least 6 characters")]
    #[tokio::test]
    async fn invalid_login_input_never_reaches_provider(
        #[case] email: &str,
        #[case] password: &str,
        #[case] message: &str,
    ) {
        let mut provider = MockIdentityProvider::new();
        provider.expect_sign_in().never();

        let service = AuthenticationService::new(Arc::new(provider));
        let err = service
            .login(email, password)
            .await
            .expect_err("validation must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[tokio::test]
    async fn mismatched_confirmation_fails_before_provider() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_sign_up().never();

        let service = AuthenticationService::new(Arc::new(provider));
        let err = service
            .register("cook@example.com", "secret1", "secret2")
            .await
            .expect_err("mismatch must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Passwords do not match");
    }

    #[rstest]
    #[case(AuthError::invalid_credentials(), ErrorCode::Unauthorized)]
    #[case(AuthError::email_in_use(), ErrorCode::Unauthorized)]
    #[case(AuthError::weak_password("too short"), ErrorCode::Unauthorized)]
    #[case(AuthError::unavailable("dns failure"), ErrorCode::ServiceUnavailable)]
    #[tokio::test]
    async fn provider_errors_are_surfaced_verbatim(
        #[case] provider_error: AuthError,
        #[case] expected: ErrorCode,
    ) {
        let message = provider_error.to_string();
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sign_up()
            .times(1)
            .return_once(move |_| Err(provider_error));

        let service = AuthenticationService::new(Arc::new(provider));
        let err = service
            .register("cook@example.com", "secret1", "secret1")
            .await
            .expect_err("provider rejects");
        assert_eq!(err.code(), expected);
        assert_eq!(err.message(), message);
    }

    #[tokio::test]
    async fn logout_delegates_to_provider() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_sign_out().times(1).returning(|| Ok(()));

        let service = AuthenticationService::new(Arc::new(provider));
        service.logout().await.expect("logout succeeds");
    }

    #[test]
    fn current_session_reads_provider_channel() {
        let (_sender, receiver) = watch::channel(Some(session("cook@example.com")));
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_sessions()
            .returning(move || receiver.clone());

        let service = AuthenticationService::new(Arc::new(provider));
        let current = service.current_session().expect("session present");
        assert_eq!(current.email(), "cook@example.com");
    }
}
