// ── Wire → domain conversions ──
//
// Translates prost messages from victory-admin-api into the canonical
// domain records. Field order inside lists is preserved as sent.

use victory_admin_api::proto;

use crate::model::{Adapter, Channel};

impl From<proto::PubSubChannel> for Channel {
    fn from(c: proto::PubSubChannel) -> Self {
        Self {
            topic: c.topic,
            publishers: c.publishers,
            subscribers: c.subscribers,
            // int32 on the wire; a negative queue depth is meaningless.
            message_count: u32::try_from(c.message_count).unwrap_or(0),
        }
    }
}

impl From<proto::Adapter> for Adapter {
    fn from(a: proto::Adapter) -> Self {
        Self {
            name: a.name,
            live: a.live,
            description: a.description,
            stats: a.stats,
        }
    }
}

/// Flatten a channel listing message into domain records.
pub(crate) fn channels_from_response(response: proto::ChannelResponse) -> Vec<Channel> {
    response.channels.into_iter().map(Channel::from).collect()
}

/// Flatten an adapter listing message into domain records.
pub(crate) fn adapters_from_response(response: proto::AdapterResponse) -> Vec<Adapter> {
    response.adapters.into_iter().map(Adapter::from).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn channel_fields_map_one_to_one() {
        let wire = proto::PubSubChannel {
            topic: "sensors/imu".into(),
            subscribers: vec!["s1".into(), "s2".into()],
            publishers: vec!["p1".into()],
            message_count: 5,
        };

        assert_eq!(
            Channel::from(wire),
            Channel {
                topic: "sensors/imu".into(),
                publishers: vec!["p1".into()],
                subscribers: vec!["s1".into(), "s2".into()],
                message_count: 5,
            }
        );
    }

    #[test]
    fn negative_message_count_clamps_to_zero() {
        let wire = proto::PubSubChannel {
            topic: "t".into(),
            message_count: -3,
            ..Default::default()
        };
        assert_eq!(Channel::from(wire).message_count, 0);
    }

    #[test]
    fn adapter_response_preserves_order() {
        let response = proto::AdapterResponse {
            adapters: vec![
                proto::Adapter {
                    name: "tcp".into(),
                    live: true,
                    description: "TCP server on 0.0.0.0:7001".into(),
                    stats: vec!["clients: 2".into()],
                },
                proto::Adapter {
                    name: "mock".into(),
                    live: false,
                    description: String::new(),
                    stats: Vec::new(),
                },
            ],
        };

        let names: Vec<String> = adapters_from_response(response)
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["tcp".to_string(), "mock".to_string()]);
    }

    #[test]
    fn empty_channel_response_yields_no_records() {
        assert!(channels_from_response(proto::ChannelResponse::default()).is_empty());
    }
}
