use std::time::Duration;

/// Errors that can occur on the subscriber transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to connect to the relay endpoint.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source: zeromq::ZmqError,
    },

    /// The relay did not accept a connection in time.
    #[error("timed out after {timeout:?} connecting to {endpoint}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    /// Failed to install the topic subscription.
    #[error("failed to subscribe on {endpoint}: {source}")]
    Subscribe {
        endpoint: String,
        source: zeromq::ZmqError,
    },

    /// Receiving the next message failed.
    #[error("transport receive error: {0}")]
    Recv(#[from] zeromq::ZmqError),

    /// A message arrived without any frame in it.
    #[error("received an empty multipart message")]
    EmptyMessage,

    /// The transport has been closed and will not yield more frames.
    #[error("transport closed")]
    Closed,
}

impl TransportError {
    /// Returns true when no further frames can be received.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TransportError::Closed)
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
