use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use zeromq::{Socket, SocketRecv, SubSocket};

use crate::error::{Result, TransportError};
use crate::traits::Subscriber;

/// Well-known ZeroMQ relay publishing the EDDN firehose.
pub const RELAY_ENDPOINT: &str = "tcp://eddn-relay.elite-markets.net:9500";

/// How long [`ZmqSubscriber::connect`] waits for the relay to accept.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// ZeroMQ SUB socket subscribed to every topic on a relay.
pub struct ZmqSubscriber {
    socket: SubSocket,
    endpoint: String,
}

impl ZmqSubscriber {
    /// Connect to the default EDDN relay.
    pub async fn connect_default() -> Result<Self> {
        Self::connect(RELAY_ENDPOINT).await
    }

    /// Connect to `endpoint` and subscribe to all topics, giving up after
    /// [`DEFAULT_CONNECT_TIMEOUT`].
    pub async fn connect(endpoint: &str) -> Result<Self> {
        Self::connect_with_timeout(endpoint, DEFAULT_CONNECT_TIMEOUT).await
    }

    /// Connect to `endpoint` and subscribe to all topics.
    ///
    /// There is no topic-level filtering at the transport; everything the
    /// relay publishes is received. A malformed endpoint fails immediately.
    /// The socket keeps retrying a refused connection, so a relay that is
    /// down surfaces as [`TransportError::ConnectTimeout`] once `timeout`
    /// has elapsed.
    pub async fn connect_with_timeout(endpoint: &str, timeout: Duration) -> Result<Self> {
        tokio::time::timeout(timeout, Self::establish(endpoint))
            .await
            .map_err(|_| {
                tracing::warn!(endpoint, ?timeout, "relay did not accept the connection");
                TransportError::ConnectTimeout {
                    endpoint: endpoint.to_string(),
                    timeout,
                }
            })?
    }

    async fn establish(endpoint: &str) -> Result<Self> {
        let mut socket = SubSocket::new();
        socket
            .connect(endpoint)
            .await
            .map_err(|source| TransportError::Connect {
                endpoint: endpoint.to_string(),
                source,
            })?;
        socket
            .subscribe("")
            .await
            .map_err(|source| TransportError::Subscribe {
                endpoint: endpoint.to_string(),
                source,
            })?;

        tracing::debug!(endpoint, "subscribed to relay");
        Ok(Self {
            socket,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl Subscriber for ZmqSubscriber {
    async fn recv(&mut self) -> Result<Bytes> {
        let message = self.socket.recv().await?;
        // The relay publishes single-part messages; extra parts are ignored.
        message.get(0).cloned().ok_or(TransportError::EmptyMessage)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for ZmqSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZmqSubscriber")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
