// ── Core error types ──
//
// Errors surfaced by victory-admin-core. Running streams never return
// these to the presentation layer: a broken stream only shows up as a
// resource stuck at `Connecting`. Errors are reserved for calls the
// caller makes directly (`connect`, status-code parsing).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Invalid broker endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Transport failure: {reason}")]
    TransportFailure { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Invalid stream status code: {0}")]
    InvalidStatusCode(u8),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<victory_admin_api::Error> for CoreError {
    fn from(err: victory_admin_api::Error) -> Self {
        match err {
            victory_admin_api::Error::InvalidEndpoint { endpoint, reason } => {
                CoreError::InvalidEndpoint {
                    url: endpoint,
                    reason,
                }
            }
            victory_admin_api::Error::Transport(e) => CoreError::TransportFailure {
                reason: e.to_string(),
            },
            victory_admin_api::Error::Status(status) => CoreError::TransportFailure {
                reason: format!("{:?}: {}", status.code(), status.message()),
            },
        }
    }
}
