//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use spacebook_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Spacebook backend")]
    #[diagnostic(
        code(spacebook::connection_failed),
        help(
            "Check that the backend is running and the base URL is right.\n\
             Try: spacebook config show"
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Not signed in")]
    #[diagnostic(
        code(spacebook::not_signed_in),
        help("Sign in with: spacebook auth login")
    )]
    NotSignedIn,

    #[error("{message}")]
    #[diagnostic(code(spacebook::auth_failed))]
    AuthFailed { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(spacebook::forbidden),
        help("Your current role cannot do this. Check: spacebook auth whoami")
    )]
    Forbidden { message: String },

    // ── Roles ────────────────────────────────────────────────────────

    #[error("This account has a single role; nothing to switch")]
    #[diagnostic(
        code(spacebook::role_switch_unavailable),
        help("Request the owner role with: spacebook auth upgrade")
    )]
    RoleSwitchUnavailable,

    #[error("Role '{role}' is not assigned to this account")]
    #[diagnostic(
        code(spacebook::role_not_assigned),
        help("See your assigned roles with: spacebook auth whoami")
    )]
    RoleNotAssigned { role: String },

    #[error("{message}")]
    #[diagnostic(code(spacebook::role_switch_failed))]
    RoleSwitchFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(spacebook::not_found),
        help("Run: spacebook {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(spacebook::api_error))]
    ApiError { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(spacebook::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(spacebook::config),
        help("Inspect or recreate your configuration with: spacebook config init")
    )]
    Config { message: String },

    #[error("Profile '{name}' is not defined")]
    #[diagnostic(
        code(spacebook::profile_not_found),
        help("List profiles with: spacebook config profiles")
    )]
    ProfileNotFound { name: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(spacebook::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    ConfirmationRequired { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotSignedIn | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Forbidden { .. }
            | Self::RoleSwitchUnavailable
            | Self::RoleNotAssigned { .. }
            | Self::RoleSwitchFailed { .. } => exit_code::PERMISSION,
            Self::Validation { .. } | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => match api {
                spacebook_api::Error::Transport(e) => CliError::ConnectionFailed {
                    source: Box::new(e),
                },
                spacebook_api::Error::InvalidUrl(e) => CliError::Validation {
                    field: "base_url".into(),
                    reason: e.to_string(),
                },
                spacebook_api::Error::Authentication { message } => CliError::AuthFailed {
                    message: message.unwrap_or_else(|| "Authentication failed".into()),
                },
                spacebook_api::Error::Forbidden { message } => CliError::Forbidden {
                    message: message
                        .unwrap_or_else(|| "You do not have permission to do this".into()),
                },
                spacebook_api::Error::Api { status, message } => CliError::ApiError {
                    status,
                    message: message
                        .unwrap_or_else(|| format!("The server returned HTTP {status}")),
                },
                spacebook_api::Error::Validation { field, reason } => {
                    CliError::Validation { field, reason }
                }
                spacebook_api::Error::Deserialization { message, .. } => CliError::ApiError {
                    status: 0,
                    message,
                },
            },

            CoreError::NotAuthenticated => CliError::NotSignedIn,

            CoreError::RoleSwitchUnavailable => CliError::RoleSwitchUnavailable,

            CoreError::RoleNotAssigned { role } => CliError::RoleNotAssigned { role },

            CoreError::RoleSwitchFailed { message } => CliError::RoleSwitchFailed { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type}s list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { field, reason } => {
                CliError::Validation { field, reason }
            }

            CoreError::UnexpectedResponse { message } => CliError::ApiError {
                status: 0,
                message,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Shutdown => CliError::ApiError {
                status: 0,
                message: "operation cancelled".into(),
            },
        }
    }
}

impl From<spacebook_config::ConfigError> for CliError {
    fn from(err: spacebook_config::ConfigError) -> Self {
        match err {
            spacebook_config::ConfigError::UnknownProfile(name) => {
                CliError::ProfileNotFound { name }
            }
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
