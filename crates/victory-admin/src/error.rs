//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use victory_admin_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Invalid broker URL '{url}': {reason}")]
    #[diagnostic(
        code(victory_admin::invalid_url),
        help("Pass an http(s) URL with a host, e.g. --url http://localhost:5050")
    )]
    InvalidUrl { url: String, reason: String },

    #[error("Could not reach broker admin service at {url}: {reason}")]
    #[diagnostic(
        code(victory_admin::connection_failed),
        help(
            "Check that the broker is running with its admin service enabled.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("No {waiting_for} from {url} after {seconds}s")]
    #[diagnostic(
        code(victory_admin::timeout),
        help("Increase the wait with --wait, or run `victory-admin status` to see which streams are up.")
    )]
    Timeout {
        url: String,
        waiting_for: String,
        seconds: u64,
    },

    // ── Validation / Configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(victory_admin::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(victory_admin::config))]
    Config(Box<figment::Error>),

    // ── Serialization ────────────────────────────────────────────────
    #[error("Could not serialize output: {0}")]
    #[diagnostic(code(victory_admin::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidUrl { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Config(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidEndpoint { url, reason } => CliError::InvalidUrl { url, reason },

            CoreError::TransportFailure { reason } => CliError::ConnectionFailed {
                url: "(unknown)".into(),
                reason,
            },

            CoreError::InvalidStatusCode(code) => CliError::Validation {
                field: "status code".into(),
                reason: format!("{code} is not a stream status"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failure_shows_cause() {
        let err = CliError::ConnectionFailed {
            url: "http://localhost:5050/".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
        assert_eq!(
            err.to_string(),
            "Could not reach broker admin service at http://localhost:5050/: connection refused"
        );
    }

    #[test]
    fn invalid_endpoint_is_a_usage_error() {
        let err = CliError::from(CoreError::InvalidEndpoint {
            url: "nope".into(),
            reason: "relative URL without a base".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn timeout_has_its_own_exit_code() {
        let err = CliError::Timeout {
            url: "http://localhost:5050/".into(),
            waiting_for: "channel listing".into(),
            seconds: 3,
        };
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            err.to_string(),
            "No channel listing from http://localhost:5050/ after 3s"
        );
    }
}
