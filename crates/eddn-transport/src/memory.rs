//! In-process subscriber fed from a channel.
//!
//! Useful for replaying captured frames and for exercising the layers above
//! without a relay.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::{Result, TransportError};
use crate::traits::Subscriber;

const MEMORY_ENDPOINT: &str = "memory://";

/// Create a connected publisher/subscriber pair with a bounded buffer.
pub fn memory_pair(capacity: usize) -> (FramePublisher, MemorySubscriber) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (FramePublisher { tx }, MemorySubscriber { rx })
}

/// Sending side of an in-memory relay.
#[derive(Debug, Clone)]
pub struct FramePublisher {
    tx: mpsc::Sender<Bytes>,
}

impl FramePublisher {
    /// Publish one raw frame, waiting for buffer space.
    pub async fn publish(&self, frame: impl Into<Bytes>) -> Result<()> {
        self.tx
            .send(frame.into())
            .await
            .map_err(|_| TransportError::Closed)
    }

    /// Publish without waiting; fails if the buffer is full or the subscriber is gone.
    pub fn try_publish(&self, frame: impl Into<Bytes>) -> Result<()> {
        self.tx
            .try_send(frame.into())
            .map_err(|_| TransportError::Closed)
    }

    /// True once the subscriber has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving side of an in-memory relay.
#[derive(Debug)]
pub struct MemorySubscriber {
    rx: mpsc::Receiver<Bytes>,
}

#[async_trait]
impl Subscriber for MemorySubscriber {
    async fn recv(&mut self) -> Result<Bytes> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }

    fn endpoint(&self) -> &str {
        MEMORY_ENDPOINT
    }
}
