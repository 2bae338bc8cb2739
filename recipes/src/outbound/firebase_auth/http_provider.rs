//! Reqwest-backed Firebase Authentication adapter.
//!
//! Uses the Identity Toolkit email/password endpoints. The adapter keeps the
//! current session in a [`SessionChannel`]; sign-out is local.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

use super::dto::{AuthResponseDto, ErrorEnvelopeDto, PasswordRequestDto, map_error_message};
use crate::domain::ports::{AuthError, IdentityProvider, SessionChannel};
use crate::domain::{Credentials, Session};

const SIGN_IN_PATH: &str = "accounts:signInWithPassword";
const SIGN_UP_PATH: &str = "accounts:signUp";

/// Identity provider adapter backed by Firebase Authentication.
pub struct FirebaseAuthProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    sessions: SessionChannel,
}

impl FirebaseAuthProvider {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// `base_url` is the API root, e.g.
    /// `https://identitytoolkit.googleapis.com/v1/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            sessions: SessionChannel::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AuthError::unavailable(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push(path);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn exchange(&self, path: &str, credentials: &Credentials) -> Result<Session, AuthError> {
        let url = self.endpoint(path)?;
        debug!(endpoint = path, "calling identity provider");
        let response = self
            .client
            .post(url)
            .json(&PasswordRequestDto {
                email: credentials.email(),
                password: credentials.password(),
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|error| AuthError::unavailable(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| AuthError::unavailable(error.to_string()))?;

        if status.is_success() {
            let dto: AuthResponseDto = serde_json::from_slice(&body).map_err(|error| {
                AuthError::unavailable(format!("invalid identity provider payload: {error}"))
            })?;
            let session = dto.into_session(credentials.email())?;
            self.sessions.publish(session.clone());
            return Ok(session);
        }

        Err(map_failure(status, &body))
    }
}

fn map_failure(status: reqwest::StatusCode, body: &[u8]) -> AuthError {
    if status.is_server_error() {
        return AuthError::unavailable(format!("status {}", status.as_u16()));
    }
    match serde_json::from_slice::<ErrorEnvelopeDto>(body) {
        Ok(envelope) => map_error_message(&envelope.error.message),
        Err(_) => AuthError::unavailable(format!("status {}", status.as_u16())),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.exchange(SIGN_IN_PATH, credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.exchange(SIGN_UP_PATH, credentials).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sessions.clear();
        Ok(())
    }

    fn sessions(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network Firebase helpers.

    use super::*;
    use reqwest::StatusCode;
    use rstest::rstest;

    fn provider() -> FirebaseAuthProvider {
        let base = Url::parse("https://identitytoolkit.googleapis.com/v1/").expect("base url");
        FirebaseAuthProvider::new(base, "api-key", Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn endpoint_appends_method_and_key() {
        let url = provider().endpoint(SIGN_IN_PATH).expect("url");
        assert_eq!(
            url.as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=api-key"
        );
    }

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, br#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#.as_slice(), AuthError::EmailInUse)]
    #[case(StatusCode::BAD_REQUEST, b"not json".as_slice(), AuthError::unavailable("status 400"))]
    #[case(StatusCode::SERVICE_UNAVAILABLE, b"".as_slice(), AuthError::unavailable("status 503"))]
    fn maps_failure_responses(
        #[case] status: StatusCode,
        #[case] body: &[u8],
        #[case] expected: AuthError,
    ) {
        assert_eq!(map_failure(status, body), expected);
    }

    #[tokio::test]
    async fn sign_out_clears_session_locally() {
        let provider = provider();
        provider.sessions.publish(Session::new(
            crate::domain::UserId::new("u1").expect("user id"),
            "cook@example.com",
        ));
        let receiver = provider.sessions();
        assert!(receiver.borrow().is_some());

        provider.sign_out().await.expect("sign out");
        assert!(provider.sessions().borrow().is_none());
    }
}
