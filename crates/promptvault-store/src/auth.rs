//! Local user accounts and the login session.
//!
//! Accounts live in the same key-value store as the assets. This is a local
//! convenience gate, not a security boundary: passwords are stored as a
//! salted SHA-256 digest and the session is a plain stored record.

use crate::kv::{KeyValueStore, StorageError};
use crate::repository::now;
use crate::scope::{ScopeKey, SESSION_KEY, USERS_KEY};
use chrono::{DateTime, Utc};
use promptvault_core::ValidationError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier, `u-<uuid>`
    pub id: String,
    /// Unique login name
    pub username: String,
    salt: String,
    password_digest: String,
    /// Personal AI key, preferred over the environment key when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Registration time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl User {
    fn new(username: &str, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("u-{}", Uuid::new_v4()),
            username: username.to_string(),
            password_digest: digest(&salt, password),
            salt,
            api_key: None,
            created_at: now(),
        }
    }

    /// Data scope owned by this user.
    #[must_use]
    pub fn scope(&self) -> ScopeKey {
        ScopeKey::user(self.id.clone())
    }

    fn verify(&self, password: &str) -> bool {
        digest(&self.salt, password) == self.password_digest
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Registration, login and per-user settings over a key-value store.
#[derive(Debug)]
pub struct AuthService<S> {
    store: S,
}

impl<S: KeyValueStore> AuthService<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new account and log it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] if the name is in use, or a
    /// validation error for a blank username or empty password.
    pub fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingField("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let user = User::new(username, password);
        users.push(user.clone());
        self.save_users(&users)?;
        self.start_session(&user)?;

        tracing::info!(user_id = %user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Log in with a username and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on unknown user or wrong
    /// password.
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        let user = self
            .users()?
            .into_iter()
            .find(|u| u.username == username && u.verify(password))
            .ok_or(AuthError::InvalidCredentials)?;

        self.start_session(&user)?;
        tracing::info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    /// End the current session. A no-op when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns error if the session record cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(SESSION_KEY)?;
        tracing::debug!("Logged out");
        Ok(())
    }

    /// The logged-in user, if any.
    ///
    /// An unreadable session is treated as logged out.
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring corrupt session");
                None
            }
        }
    }

    /// Set or clear the logged-in user's personal AI key.
    ///
    /// A blank key clears it. Both the account list and the session are
    /// updated. Returns the updated user, or `None` when logged out.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails.
    pub fn update_api_key(&self, api_key: &str) -> Result<Option<User>, AuthError> {
        let Some(mut current) = self.current_user() else {
            return Ok(None);
        };

        let api_key = api_key.trim();
        current.api_key = (!api_key.is_empty()).then(|| api_key.to_string());

        let mut users = self.users()?;
        if let Some(stored) = users.iter_mut().find(|u| u.id == current.id) {
            stored.api_key.clone_from(&current.api_key);
        }
        self.save_users(&users)?;
        self.start_session(&current)?;

        tracing::debug!(user_id = %current.id, has_key = current.api_key.is_some(), "Updated API key");
        Ok(Some(current))
    }

    fn users(&self) -> Result<Vec<User>, AuthError> {
        match self.store.get(USERS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(AuthError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    fn save_users(&self, users: &[User]) -> Result<(), AuthError> {
        let json = serde_json::to_string(users).map_err(StorageError::from)?;
        self.store.set(USERS_KEY, &json)?;
        Ok(())
    }

    fn start_session(&self, user: &User) -> Result<(), AuthError> {
        let json = serde_json::to_string(user).map_err(StorageError::from)?;
        self.store.set(SESSION_KEY, &json)?;
        Ok(())
    }
}

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Registration with a name already in use
    #[error("Username already exists: {0}")]
    UsernameTaken(String),
    /// Unknown user or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Missing username or password
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Backend failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    /// Stored account list could not be decoded
    #[error("corrupt user list: {0}")]
    Corrupt(serde_json::Error),
}
