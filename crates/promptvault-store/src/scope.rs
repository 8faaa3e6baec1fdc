//! Storage keys and per-user data scopes.

use std::fmt;

/// Key prefix for asset collections.
pub const DATA_KEY: &str = "prompt_lifecycle_architect_data";
/// Key holding the registered user list.
pub const USERS_KEY: &str = "prompt_architect_users";
/// Key holding the logged-in user.
pub const SESSION_KEY: &str = "prompt_architect_session";

/// Whose asset collection a workspace reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// Nobody is logged in. Seeded with sample data on first use.
    Guest,
    /// A registered user, by user id.
    User(String),
}

impl ScopeKey {
    /// Scope for the given user id.
    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        ScopeKey::User(id.into())
    }

    /// Scope for an optional logged-in user id.
    #[must_use]
    pub fn for_session(user_id: Option<&str>) -> Self {
        user_id.map_or(ScopeKey::Guest, ScopeKey::user)
    }

    /// Whether this is the guest scope.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        matches!(self, ScopeKey::Guest)
    }

    /// Storage key for this scope's asset collection.
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            ScopeKey::Guest => DATA_KEY.to_string(),
            ScopeKey::User(id) => format!("{DATA_KEY}_{id}"),
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Guest => f.write_str("guest"),
            ScopeKey::User(id) => write!(f, "user {id}"),
        }
    }
}
