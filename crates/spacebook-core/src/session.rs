// ── Session state ──
//
// Authentication state machine published through a `watch` channel so
// observers (the CLI, tests) see transitions without polling. Token
// persistence is behind `TokenStore`; the in-memory store lives here,
// the keyring-backed one in `spacebook-config`.

use std::sync::Arc;
use std::sync::RwLock;

use secrecy::SecretString;

use crate::error::CoreError;
use crate::model::User;

/// Where the session currently stands.
///
/// `Uninitialized` exists so observers can tell "haven't checked yet"
/// apart from "checked and anonymous": UI must not flash a logged-out
/// state while the startup check is still in flight.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// No session check has run yet.
    #[default]
    Uninitialized,
    /// A session check is in flight.
    Checking,
    /// A user is signed in.
    Authenticated(Arc<User>),
    /// The session check completed and found no valid session.
    Unauthenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The signed-in user, when there is one.
    pub fn user(&self) -> Option<&Arc<User>> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Persistence seam for the bearer token.
///
/// Implementations must be infallible on `clear` whenever possible:
/// logout calls it unconditionally and must not strand a session.
pub trait TokenStore: Send + Sync {
    /// The persisted token, if any.
    fn load(&self) -> Result<Option<SecretString>, CoreError>;

    /// Persist `token`, replacing any previous one.
    fn save(&self, token: &SecretString) -> Result<(), CoreError>;

    /// Drop the persisted token. Absence is not an error.
    fn clear(&self) -> Result<(), CoreError>;
}

/// Process-local token store. Used by tests and by one-shot
/// invocations that authenticate per run.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        Ok(self.token.read().expect("token lock poisoned").clone())
    }

    fn save(&self, token: &SecretString) -> Result<(), CoreError> {
        *self.token.write().expect("token lock poisoned") = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.token.write().expect("token lock poisoned") = None;
        Ok(())
    }
}
