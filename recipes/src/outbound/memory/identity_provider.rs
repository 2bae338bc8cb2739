//! In-process identity provider for tests and offline runs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::{AuthError, IdentityProvider, SessionChannel};
use crate::domain::{Credentials, Session, UserId};

struct Account {
    user_id: UserId,
    email: String,
    password: Zeroizing<String>,
}

/// Identity provider that keeps accounts in memory.
///
/// Emails are matched case-insensitively.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: SessionChannel,
}

impl InMemoryIdentityProvider {
    /// Create a provider with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Account>>, AuthError> {
        self.accounts
            .lock()
            .map_err(|_| AuthError::unavailable("in-memory account lock poisoned"))
    }
}

fn account_key(email: &str) -> String {
    email.to_lowercase()
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = {
            let accounts = self.lock()?;
            let account = accounts
                .get(&account_key(credentials.email()))
                .filter(|account| account.password.as_str() == credentials.password())
                .ok_or_else(AuthError::invalid_credentials)?;
            Session::new(account.user_id.clone(), account.email.clone())
        };
        self.sessions.publish(session.clone());
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = {
            let mut accounts = self.lock()?;
            let key = account_key(credentials.email());
            if accounts.contains_key(&key) {
                return Err(AuthError::email_in_use());
            }
            let user_id = UserId::new(Uuid::new_v4().simple().to_string())
                .map_err(|error| AuthError::unavailable(error.to_string()))?;
            let account = Account {
                user_id: user_id.clone(),
                email: credentials.email().to_owned(),
                password: Zeroizing::new(credentials.password().to_owned()),
            };
            accounts.insert(key, account);
            Session::new(user_id, credentials.email())
        };
        self.sessions.publish(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sessions.clear();
        Ok(())
    }

    fn sessions(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}
