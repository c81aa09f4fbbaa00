// Integration tests for the gRPC connector against endpoints with no
// admin service behind them.

use std::time::Duration;

use futures_util::StreamExt;

use victory_admin_api::proto::{AdapterRequest, ChannelRequest};
use victory_admin_api::transport::parse_endpoint;
use victory_admin_api::{Connector, Error, GrpcConnector, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

/// A loopback port with nothing listening on it.
fn closed_endpoint() -> url::Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    parse_endpoint(&format!("http://127.0.0.1:{port}")).expect("valid endpoint")
}

fn connector() -> GrpcConnector {
    GrpcConnector::new(TransportConfig {
        connect_timeout: Some(Duration::from_secs(2)),
        tcp_keepalive: None,
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn connect_does_not_touch_the_network() {
    // Lazy channel: binding to an unreachable broker succeeds.
    let transport = connector().connect(&closed_endpoint());
    assert!(transport.is_ok());
}

#[tokio::test]
async fn unreachable_broker_fails_channel_stream() {
    let transport = connector().connect(&closed_endpoint()).expect("lazy connect");

    let mut stream = transport.request_channels(ChannelRequest::default());
    let first = tokio::time::timeout(Duration::from_secs(10), stream.next())
        .await
        .expect("stream should resolve");

    match first {
        Some(Err(err)) => assert!(err.is_unreachable() || matches!(err, Error::Status(_))),
        Some(Ok(_)) => panic!("no server is listening, no message expected"),
        None => panic!("an open failure must be yielded as an error item"),
    }

    // The error is terminal.
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn unreachable_broker_fails_adapter_stream() {
    let transport = connector().connect(&closed_endpoint()).expect("lazy connect");

    let mut stream = transport.request_adapters(AdapterRequest { hz: 10 });
    let first = tokio::time::timeout(Duration::from_secs(10), stream.next())
        .await
        .expect("stream should resolve");

    assert!(matches!(first, Some(Err(_))));
}
