use thiserror::Error;

/// Top-level error type for `spacebook-core`.
///
/// Wraps the API crate's transport/server errors and adds the domain
/// failures that the Portal decides locally (role guards, validation,
/// shutdown). The CLI maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Error from the REST surface (transport or server-reported).
    #[error(transparent)]
    Api(#[from] spacebook_api::Error),

    /// The operation needs an authenticated session and there is none.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Role switching is only available to multi-role accounts.
    #[error("This account has a single role; nothing to switch")]
    RoleSwitchUnavailable,

    /// The requested role is not assigned to the current user.
    #[error("Role '{role}' is not assigned to this account")]
    RoleNotAssigned { role: String },

    /// The server rejected a role switch. `message` is the server's
    /// error message verbatim when present, else a generic fallback.
    #[error("Role switch failed: {message}")]
    RoleSwitchFailed { message: String },

    /// Entity lookup came back empty.
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// Input rejected before any request was issued.
    #[error("Invalid value for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    /// The server answered with a shape the client cannot reconcile.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// Configuration or credential-store failure.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The Portal was shut down while the request was in flight.
    #[error("Operation cancelled: portal is shutting down")]
    Shutdown,
}

impl CoreError {
    /// The server-provided message, when this error carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.server_message(),
            Self::RoleSwitchFailed { message } => Some(message),
            _ => None,
        }
    }

    /// Returns `true` for errors that mean "anonymous", not "broken".
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Api(e) => e.is_auth(),
            Self::NotAuthenticated => true,
            _ => false,
        }
    }
}
