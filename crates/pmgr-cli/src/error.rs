//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use pmgr_core::CoreError;

/// Exit codes, stable for scripting.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Could not reach the service at {url}")]
    #[diagnostic(
        code(pmgr::connection_failed),
        help("Check that the service is running and the URL ends with a slash.")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Login failed: {message}")]
    #[diagnostic(
        code(pmgr::auth_failed),
        help("Verify the username and password (or the PMGR_PASSWORD environment variable).")
    )]
    AuthFailed { message: String },

    #[error("No credentials given")]
    #[diagnostic(
        code(pmgr::no_credentials),
        help("Pass --username and --password, or set PMGR_USERNAME / PMGR_PASSWORD.")
    )]
    NoCredentials,

    #[error("{kind} {id} not found")]
    #[diagnostic(
        code(pmgr::not_found),
        help("Run: pmgr list to see what the service currently holds.")
    )]
    NotFound { kind: String, id: String },

    #[error("Invalid value: {reason}")]
    #[diagnostic(code(pmgr::validation))]
    Validation { reason: String },

    #[error("{message}")]
    #[diagnostic(code(pmgr::api_error))]
    Api { message: String },

    #[error("{0}")]
    #[diagnostic(code(pmgr::internal))]
    Internal(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NotAuthenticated => Self::NoCredentials,
            CoreError::NotFound { kind, id } => Self::NotFound {
                kind: kind.to_string(),
                id: id.to_string(),
            },
            CoreError::MissingId { kind } => Self::Validation {
                reason: format!("this {kind} has no id"),
            },
            CoreError::Validation { message } => Self::Validation { reason: message },
            CoreError::DuplicateId { id } => Self::Api {
                message: format!("the service returned duplicate id {id}"),
            },
            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::Config { message } => Self::Validation { reason: message },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Api { .. } | Self::Internal(_) => exit_code::GENERAL,
        }
    }
}
