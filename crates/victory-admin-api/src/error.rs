use thiserror::Error;

/// Top-level error type for the `victory-admin-api` crate.
///
/// Covers every failure mode of the admin RPC layer: endpoint validation,
/// channel setup, and RPC status codes returned mid-stream.
/// `victory-admin-core` maps these into its own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Endpoint ────────────────────────────────────────────────────
    /// The endpoint string is empty, unparseable, or uses an unsupported scheme.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP/2 channel error (connection refused, DNS failure, etc.)
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// Non-OK status returned by the admin service, or by the channel
    /// when the call could not be dispatched. Undecodable messages also
    /// surface here (as `Code::Internal`).
    #[error("gRPC status {code:?}: {message}", code = .0.code(), message = .0.message())]
    Status(Box<tonic::Status>),
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        Self::Status(Box::new(status))
    }
}

impl Error {
    /// Returns `true` if the remote end could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status(status) => status.code() == tonic::Code::Unavailable,
            _ => false,
        }
    }

    /// Returns `true` if the server closed the stream because it does not
    /// implement the requested method.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Status(status) if status.code() == tonic::Code::Unimplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_status_is_unreachable() {
        let err = Error::from(tonic::Status::unavailable("connection refused"));
        assert!(err.is_unreachable());
        assert!(!err.is_unimplemented());
    }

    #[test]
    fn unimplemented_status_is_detected() {
        let err = Error::from(tonic::Status::unimplemented("RequestAdapters"));
        assert!(err.is_unimplemented());
        assert!(!err.is_unreachable());
    }

    #[test]
    fn status_display_includes_message() {
        let err = Error::from(tonic::Status::internal("broker lock poisoned"));
        assert!(err.to_string().contains("broker lock poisoned"));
    }
}
