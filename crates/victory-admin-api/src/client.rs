//! gRPC client for `pubsub_admin.PubSubAdminService`.
//!
//! Both admin methods are server-streaming: the broker pushes a full
//! listing roughly every 500 ms until the client goes away. The client is a
//! thin typed layer over [`tonic::client::Grpc`] with the prost codec; the
//! [`GrpcConnector`] adapts it to the [`Connector`] / [`AdminTransport`]
//! seams the core crate consumes.

use std::future::Future;
use std::sync::Arc;

use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use url::Url;

use crate::error::Error;
use crate::proto::{AdapterRequest, AdapterResponse, ChannelRequest, ChannelResponse};
use crate::transport::{AdminTransport, Connector, MessageStream, TransportConfig};

const REQUEST_CHANNELS_PATH: &str = "/pubsub_admin.PubSubAdminService/RequestChannels";
const REQUEST_ADAPTERS_PATH: &str = "/pubsub_admin.PubSubAdminService/RequestAdapters";

// ── AdminClient ─────────────────────────────────────────────────────

/// Typed client for the broker admin service.
///
/// Cheaply cloneable: clones share the underlying HTTP/2 channel.
#[derive(Debug, Clone)]
pub struct AdminClient {
    inner: tonic::client::Grpc<Channel>,
}

impl AdminClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    /// Build a client whose channel connects on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(endpoint: &Url, config: &TransportConfig) -> Result<Self, Error> {
        let mut builder = Endpoint::from_shared(endpoint.to_string())?;

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder = builder.tcp_keepalive(config.tcp_keepalive);

        if endpoint.scheme() == "https" {
            builder = builder.tls_config(ClientTlsConfig::new().with_webpki_roots())?;
        }

        tracing::debug!(endpoint = %endpoint, "admin channel created (lazy)");
        Ok(Self::new(builder.connect_lazy()))
    }

    /// Open the channel listing stream.
    pub async fn request_channels(
        &mut self,
        request: ChannelRequest,
    ) -> Result<Streaming<ChannelResponse>, Error> {
        self.server_streaming(request, REQUEST_CHANNELS_PATH).await
    }

    /// Open the adapter listing stream.
    pub async fn request_adapters(
        &mut self,
        request: AdapterRequest,
    ) -> Result<Streaming<AdapterResponse>, Error> {
        self.server_streaming(request, REQUEST_ADAPTERS_PATH).await
    }

    async fn server_streaming<Req, Resp>(
        &mut self,
        request: Req,
        path: &'static str,
    ) -> Result<Streaming<Resp>, Error>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))?;

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = self
            .inner
            .server_streaming(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;

        Ok(response.into_inner())
    }
}

// ── GrpcConnector ───────────────────────────────────────────────────

/// [`Connector`] producing lazily-connected gRPC transports.
#[derive(Debug, Clone, Default)]
pub struct GrpcConnector {
    config: TransportConfig,
}

impl GrpcConnector {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }
}

impl Connector for GrpcConnector {
    fn connect(&self, endpoint: &Url) -> Result<Arc<dyn AdminTransport>, Error> {
        let client = AdminClient::connect_lazy(endpoint, &self.config)?;
        Ok(Arc::new(GrpcTransport { client }))
    }
}

struct GrpcTransport {
    client: AdminClient,
}

impl AdminTransport for GrpcTransport {
    fn request_channels(&self, request: ChannelRequest) -> MessageStream<ChannelResponse> {
        let mut client = self.client.clone();
        into_message_stream(async move { client.request_channels(request).await })
    }

    fn request_adapters(&self, request: AdapterRequest) -> MessageStream<AdapterResponse> {
        let mut client = self.client.clone();
        into_message_stream(async move { client.request_adapters(request).await })
    }
}

/// Flatten "open the call, then read messages" into one stream.
///
/// An error from either phase is yielded once and ends the stream.
fn into_message_stream<T, F>(open: F) -> MessageStream<T>
where
    T: Send + 'static,
    F: Future<Output = Result<Streaming<T>, Error>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut inbound = match open.await {
            Ok(inbound) => inbound,
            Err(e) => {
                yield Err::<T, Error>(e);
                return;
            }
        };

        loop {
            match inbound.message().await {
                Ok(Some(message)) => yield Ok(message),
                Ok(None) => break,
                Err(status) => {
                    yield Err(Error::from(status));
                    break;
                }
            }
        }
    })
}
