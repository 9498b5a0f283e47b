use std::time::Duration;

use eddn_frame::FrameConfig;
use eddn_transport::{DEFAULT_CONNECT_TIMEOUT, RELAY_ENDPOINT};

/// Per-variant channel capacity. One slot keeps the router at most one
/// message ahead of a slow consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1;

/// Pause after a transient transport error before receiving again.
pub const DEFAULT_RECV_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Subscription configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberConfig {
    /// ZeroMQ endpoint of the relay.
    pub relay_endpoint: String,
    /// How long `open` waits for the relay before failing.
    pub connect_timeout: Duration,
    /// Capacity of each variant channel. Zero is treated as one.
    pub channel_capacity: usize,
    /// Frame decoding limits.
    pub frame: FrameConfig,
    /// Backoff after a receive error that did not close the transport.
    pub recv_retry_delay: Duration,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            relay_endpoint: RELAY_ENDPOINT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            frame: FrameConfig::default(),
            recv_retry_delay: DEFAULT_RECV_RETRY_DELAY,
        }
    }
}

impl SubscriberConfig {
    /// Config for a relay other than the public one.
    pub fn with_relay(endpoint: impl Into<String>) -> Self {
        Self {
            relay_endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}
