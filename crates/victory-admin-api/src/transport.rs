// Transport seams and shared channel configuration.
//
// `Connector` creates one logical connection per broker URL; every resource
// stream multiplexes over the `AdminTransport` it returns. The gRPC
// implementation lives in `client.rs`; tests substitute their own.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_core::Stream;
use url::Url;

use crate::error::Error;
use crate::proto::{AdapterRequest, AdapterResponse, ChannelRequest, ChannelResponse};

/// A server-streaming response: zero or more messages, then the end of the
/// stream. An `Err` item is terminal.
pub type MessageStream<T> = Pin<Box<dyn Stream<Item = Result<T, Error>> + Send + 'static>>;

/// Per-resource open-stream primitives exposed by one broker connection.
///
/// Opening is lazy: the call is issued when the returned stream is first
/// polled, and a failure to open arrives as the stream's first item.
pub trait AdminTransport: Send + Sync {
    fn request_channels(&self, request: ChannelRequest) -> MessageStream<ChannelResponse>;

    fn request_adapters(&self, request: AdapterRequest) -> MessageStream<AdapterResponse>;
}

/// Connect primitive: binds a transport to one broker endpoint.
///
/// Must not block on network I/O. Implementations connect lazily so that
/// an unreachable broker shows up as a failing stream, not a failing connect.
pub trait Connector: Send + Sync {
    fn connect(&self, endpoint: &Url) -> Result<Arc<dyn AdminTransport>, Error>;
}

/// Channel tuning shared by every stream on one connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportConfig {
    /// Bound on establishing the HTTP/2 connection. `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// TCP keepalive interval. `None` leaves the OS default.
    pub tcp_keepalive: Option<Duration>,
}

/// Validate a broker admin endpoint string.
///
/// Accepts absolute `http`/`https` URLs with a host, e.g. `http://localhost:5050`.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, Error> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(invalid(endpoint, "endpoint is empty"));
    }

    let url = Url::parse(trimmed).map_err(|e| invalid(endpoint, &e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(invalid(
                endpoint,
                &format!("unsupported scheme '{other}' (expected http or https)"),
            ));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(endpoint, "missing host"));
    }

    Ok(url)
}

fn invalid(endpoint: &str, reason: &str) -> Error {
    Error::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason: reason.to_owned(),
    }
}
