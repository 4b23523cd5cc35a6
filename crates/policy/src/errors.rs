//! Error types for the Themis policy domain.
//!
//! The taxonomy separates three kinds of trouble:
//!
//! - [`ConfigurationError`]: a configured pattern cannot be compiled. Detected
//!   before any network call and fatal only to the check that owns the pattern.
//! - [`GatewayError`]: the remote API could not be reached, refused the
//!   credentials, or answered with a payload that does not decode. Checks log
//!   these and continue with an empty result set, which fails them closed.
//! - [`ThemisError`]: the run cannot start at all (missing host context).
//!
//! A policy violation is *not* an error; it is the normal negative outcome of a
//! check and is carried by [`crate::PolicyResult`].

use serde::Serialize;
use thiserror::Error;

use crate::CheckName;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A check's configured pattern is not a valid regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Invalid {check} pattern '{pattern}': {message}")]
pub struct ConfigurationError {
    /// The check that the pattern would have enabled.
    pub check: CheckName,
    /// The pattern exactly as configured.
    pub pattern: String,
    /// The regex compiler's description of the problem.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Gateway errors
// ---------------------------------------------------------------------------

/// Failures raised at the remote data gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request could not be sent or the server answered with a
    /// non-success status.
    #[error("Transport failure during {operation}: {message}")]
    Transport {
        /// The gateway operation that failed (e.g. `"list_labels"`).
        operation: String,
        /// Description of the failure.
        message: String,
    },

    /// The server rejected the bearer token (HTTP 401 or 403).
    #[error("Authentication rejected during {operation} (HTTP {status})")]
    Authentication {
        /// The gateway operation that failed.
        operation: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The response arrived but its shape did not match expectations, or it
    /// carried a GraphQL error payload.
    #[error("Unexpected response shape during {operation}: {message}")]
    Schema {
        /// The gateway operation that failed.
        operation: String,
        /// Description of the mismatch.
        message: String,
    },
}

impl GatewayError {
    /// Convenience constructor for [`GatewayError::Transport`].
    pub fn transport(operation: &str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`GatewayError::Schema`].
    pub fn schema(operation: &str, message: impl Into<String>) -> Self {
        Self::Schema {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Returns `true` for transport-level failures (including authentication).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Authentication { .. })
    }
}

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that prevent an evaluation from starting.
#[derive(Debug, Error)]
pub enum ThemisError {
    /// Required host context (repository, commit, pull request number) is
    /// missing or malformed.
    #[error("Missing or invalid run context: {message}")]
    MissingContext {
        /// Description of what is missing.
        message: String,
    },

    /// The host's event payload could not be read or decoded.
    #[error("Failed to read event payload '{path}': {message}")]
    EventPayload {
        /// Path of the payload file.
        path: String,
        /// Description of the failure.
        message: String,
    },
}
