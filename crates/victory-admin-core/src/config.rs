// ── Runtime monitor configuration ──
//
// Describes *how* to talk to a broker admin service. The CLI builds a
// `MonitorConfig` and hands it in; core never reads config files.

pub use victory_admin_api::TransportConfig;

/// Configuration shared by every connection a [`Monitor`](crate::Monitor) makes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Sampling rate requested for the adapter stream, in hertz.
    /// `None` or `Some(0)` lets the broker pick its default rate.
    pub adapter_sample_hz: Option<u32>,
    /// Channel tuning for the underlying gRPC connection.
    pub transport: TransportConfig,
}
