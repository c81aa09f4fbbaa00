// ── Resource kinds and stream status ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::CoreError;

/// A category of monitored entity, each with its own stream and snapshot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Channels,
    Adapters,
}

/// Lifecycle of one resource stream within one handle generation.
///
/// Ordered: a stream only ever moves forward, `Idle` → `Connecting` →
/// `Streaming`. The numeric codes (`0`, `1`, `2`) are what reporters emit.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StreamStatus {
    /// No handle attached, or the stream was never opened.
    #[default]
    Idle,
    /// Open request issued, no message received yet.
    Connecting,
    /// At least one message received. Terminal for the stream's lifetime.
    Streaming,
}

impl StreamStatus {
    /// Numeric status code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Connecting => 1,
            Self::Streaming => 2,
        }
    }

    /// Whether the stream has delivered data.
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Streaming)
    }
}

impl TryFrom<u8> for StreamStatus {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Connecting),
            2 => Ok(Self::Streaming),
            other => Err(CoreError::InvalidStatusCode(other)),
        }
    }
}
