//! Wire messages for the `pubsub_admin` protobuf package.
//!
//! Hand-maintained `prost` definitions matching `proto/pubsub_admin.proto`
//! in this crate. Field tags must stay in sync with that file.

/// Request for the channel listing stream. Carries no fields.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct ChannelRequest {}

/// One snapshot of every channel known to the broker.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelResponse {
    #[prost(message, repeated, tag = "1")]
    pub channels: Vec<PubSubChannel>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubSubChannel {
    #[prost(string, tag = "1")]
    pub topic: String,
    #[prost(string, repeated, tag = "2")]
    pub subscribers: Vec<String>,
    #[prost(string, repeated, tag = "3")]
    pub publishers: Vec<String>,
    /// Queue depth on the broker side.
    #[prost(int32, tag = "4")]
    pub message_count: i32,
}

/// Request for the adapter listing stream.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct AdapterRequest {
    /// Sampling rate in hertz. Zero asks the server for its default rate.
    #[prost(uint32, tag = "1")]
    pub hz: u32,
}

/// One snapshot of every adapter attached to the broker.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AdapterResponse {
    #[prost(message, repeated, tag = "1")]
    pub adapters: Vec<Adapter>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Adapter {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(bool, tag = "2")]
    pub live: bool,
    #[prost(string, tag = "3")]
    pub description: String,
    #[prost(string, repeated, tag = "4")]
    pub stats: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn decode_channel_response_from_wire_bytes() {
        // channels { topic: "t1" publishers: "p1" message_count: 5 }
        let bytes = [
            0x0a, 0x0a, // field 1, len 10
            0x0a, 0x02, b't', b'1', // topic
            0x1a, 0x02, b'p', b'1', // publishers
            0x20, 0x05, // message_count
        ];
        let decoded = ChannelResponse::decode(&bytes[..]).unwrap();

        assert_eq!(decoded.channels.len(), 1);
        let channel = &decoded.channels[0];
        assert_eq!(channel.topic, "t1");
        assert_eq!(channel.publishers, vec!["p1".to_string()]);
        assert!(channel.subscribers.is_empty());
        assert_eq!(channel.message_count, 5);
    }

    #[test]
    fn default_adapter_request_encodes_to_nothing() {
        // hz = 0 is the proto3 default and is omitted on the wire, which the
        // server reads as "use the default rate".
        assert!(AdapterRequest::default().encode_to_vec().is_empty());
        assert_eq!(AdapterRequest { hz: 20 }.encode_to_vec(), vec![0x08, 20]);
    }

    #[test]
    fn field_tags_match_proto_file() {
        let proto = include_str!("../proto/pubsub_admin.proto");
        for field in [
            "repeated PubSubChannel channels = 1;",
            "string topic = 1;",
            "repeated string subscribers = 2;",
            "repeated string publishers = 3;",
            "int32 message_count = 4;",
            "uint32 hz = 1;",
            "repeated Adapter adapters = 1;",
            "string name = 1;",
            "bool live = 2;",
            "string description = 3;",
            "repeated string stats = 4;",
        ] {
            assert!(proto.contains(field), "missing `{field}`");
        }
    }

    #[test]
    fn empty_response_decodes_to_empty_list() {
        let decoded = AdapterResponse::decode(&[][..]).unwrap();
        assert!(decoded.adapters.is_empty());
    }
}
