//! Driven port for the remote identity provider.
//!
//! The provider verifies email/password pairs, creates accounts, and owns the
//! notion of "the current session". Consumers observe session changes through
//! a `tokio::sync::watch` receiver instead of polling.

use async_trait::async_trait;
use tokio::sync::watch;

use super::define_port_error;
use crate::domain::{Credentials, Session};

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum AuthError {
        /// Unknown email or wrong password.
        InvalidCredentials => "Invalid email or password",
        /// Registration with an email that already has an account.
        EmailInUse => "Email is already registered",
        /// The provider rejected the password as too weak.
        WeakPassword { message: String } => "Weak password: {message}",
        /// The account exists but is disabled.
        UserDisabled => "This account has been disabled",
        /// The provider is throttling attempts for this account or client.
        TooManyAttempts => "Too many attempts, try again later",
        /// Transport failure or an unexpected response from the provider.
        Unavailable { message: String } => "Identity provider unavailable: {message}",
        /// Any other provider-side rejection.
        Rejected { message: String } => "{message}",
    }
}

/// Port for authenticating users and observing the current session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with existing credentials and make the session current.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Create an account and make its session current.
    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Clear the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Subscribe to current-session changes.
    ///
    /// The receiver starts with the session current at subscription time.
    fn sessions(&self) -> watch::Receiver<Option<Session>>;
}

/// Holder for the current session shared by provider adapters.
///
/// Every publish notifies all live receivers; receivers created later observe
/// the latest value.
#[derive(Debug)]
pub struct SessionChannel {
    sender: watch::Sender<Option<Session>>,
}

impl Default for SessionChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionChannel {
    /// Create a channel with no current session.
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(None);
        Self { sender }
    }

    /// Make `session` current.
    pub fn publish(&self, session: Session) {
        self.sender.send_replace(Some(session));
    }

    /// Clear the current session.
    pub fn clear(&self) {
        self.sender.send_replace(None);
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    /// New receiver primed with the current session.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }
}
