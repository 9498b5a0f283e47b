use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A connected subscriber that yields raw frames from a relay.
///
/// Implementations own their socket exclusively. `recv` is the only
/// blocking point and returns one complete frame per call; framing of the
/// underlying transport never leaks to the caller.
#[async_trait]
pub trait Subscriber: Send {
    /// Wait for the next raw frame.
    ///
    /// Returns `Err(TransportError::Closed)` once the transport is gone.
    async fn recv(&mut self) -> Result<Bytes>;

    /// Human-readable description of where frames come from.
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<S: Subscriber + ?Sized> Subscriber for Box<S> {
    async fn recv(&mut self) -> Result<Bytes> {
        (**self).recv().await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}
