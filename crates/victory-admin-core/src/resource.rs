// ── Resource kinds as types ──
//
// Each monitored resource pairs an open-stream call with a decoder and a
// snapshot slot. `ResourceStreamClient` is generic over this trait, so
// channels and adapters share one stream loop.

use victory_admin_api::proto::{
    AdapterRequest, AdapterResponse, ChannelRequest, ChannelResponse,
};
use victory_admin_api::{AdminTransport, MessageStream};

use crate::config::MonitorConfig;
use crate::convert::{adapters_from_response, channels_from_response};
use crate::model::{self, ResourceKind};
use crate::store::{SnapshotSlot, SnapshotStore};

/// A resource kind the monitor streams from the broker.
pub trait Resource: Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Request payload sent when the stream is opened.
    type Request: Send + 'static;
    /// One inbound stream message.
    type Message: Send + 'static;
    /// Domain record stored in the snapshot.
    type Record: Send + Sync + 'static;

    fn request(config: &MonitorConfig) -> Self::Request;

    fn open(transport: &dyn AdminTransport, request: Self::Request) -> MessageStream<Self::Message>;

    /// Turn one message into a complete listing.
    fn decode(message: Self::Message) -> Vec<Self::Record>;

    fn slot(store: &SnapshotStore) -> &SnapshotSlot<Self::Record>;
}

/// Pub/sub channel listing (`RequestChannels`).
pub struct Channels;

impl Resource for Channels {
    const KIND: ResourceKind = ResourceKind::Channels;

    type Request = ChannelRequest;
    type Message = ChannelResponse;
    type Record = model::Channel;

    fn request(_config: &MonitorConfig) -> ChannelRequest {
        ChannelRequest {}
    }

    fn open(transport: &dyn AdminTransport, request: ChannelRequest) -> MessageStream<ChannelResponse> {
        transport.request_channels(request)
    }

    fn decode(message: ChannelResponse) -> Vec<model::Channel> {
        channels_from_response(message)
    }

    fn slot(store: &SnapshotStore) -> &SnapshotSlot<model::Channel> {
        &store.channels
    }
}

/// Adapter listing (`RequestAdapters`), sampled at the configured rate.
pub struct Adapters;

impl Resource for Adapters {
    const KIND: ResourceKind = ResourceKind::Adapters;

    type Request = AdapterRequest;
    type Message = AdapterResponse;
    type Record = model::Adapter;

    fn request(config: &MonitorConfig) -> AdapterRequest {
        // Zero on the wire means "broker default".
        AdapterRequest {
            hz: config.adapter_sample_hz.unwrap_or(0),
        }
    }

    fn open(transport: &dyn AdminTransport, request: AdapterRequest) -> MessageStream<AdapterResponse> {
        transport.request_adapters(request)
    }

    fn decode(message: AdapterResponse) -> Vec<model::Adapter> {
        adapters_from_response(message)
    }

    fn slot(store: &SnapshotStore) -> &SnapshotSlot<model::Adapter> {
        &store.adapters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_request_defaults_to_broker_rate() {
        assert_eq!(Adapters::request(&MonitorConfig::default()).hz, 0);

        let config = MonitorConfig {
            adapter_sample_hz: Some(20),
            ..MonitorConfig::default()
        };
        assert_eq!(Adapters::request(&config).hz, 20);
    }

    #[test]
    fn kinds_match_resources() {
        assert_eq!(Channels::KIND, ResourceKind::Channels);
        assert_eq!(Adapters::KIND, ResourceKind::Adapters);
    }
}
