use thiserror::Error;

/// Top-level error type for the `spacebook-api` crate.
///
/// Covers every failure mode of the marketplace REST surface: transport,
/// authentication, server-reported business errors, and deserialization.
/// `spacebook-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed or the bearer token was rejected (HTTP 401).
    /// `message` is the server's error message when the body carried one.
    #[error("Authentication failed: {}", .message.as_deref().unwrap_or("unauthorized"))]
    Authentication { message: Option<String> },

    /// The request needs a role the current session does not hold (HTTP 403).
    #[error("Forbidden: {}", .message.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden { message: Option<String> },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Server-reported ─────────────────────────────────────────────
    /// Business error surfaced by the backend. `message` is the response
    /// body's `message` field verbatim; `None` when the body had none.
    #[error("API error (HTTP {status}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api {
        status: u16,
        message: Option<String>,
    },

    // ── Client-side validation ──────────────────────────────────────
    /// Input rejected before any request was issued.
    #[error("Invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is not (or no longer)
    /// authenticated. Callers treat this as "anonymous", never as fatal.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The server-provided message, when one was parsed from the body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. }
            | Self::Authentication { message }
            | Self::Forbidden { message } => message.as_deref(),
            _ => None,
        }
    }
}
