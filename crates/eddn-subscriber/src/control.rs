use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Requests a handle can make of its router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Stop routing, signal completion and close every channel.
    Shutdown,
}

/// Why a router stopped. Delivered exactly once on `Subscription::done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// A shutdown request was received, or every control handle was dropped.
    Requested,
    /// The transport closed underneath the router.
    TransportClosed,
}

/// Send-only side of a router's control channel.
#[derive(Debug, Clone)]
pub struct ControlHandle {
    tx: mpsc::Sender<ControlMessage>,
}

impl ControlHandle {
    pub(crate) fn new(tx: mpsc::Sender<ControlMessage>) -> Self {
        Self { tx }
    }

    /// Ask the router to stop without waiting for it.
    ///
    /// Returns false once the router has already exited. A full control
    /// channel means a request is already pending, which counts as success.
    pub fn request_shutdown(&self) -> bool {
        match self.tx.try_send(ControlMessage::Shutdown) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Send a control message, waiting for room in the control channel.
    pub async fn send(&self, message: ControlMessage) -> bool {
        self.tx.send(message).await.is_ok()
    }

    /// True once the router has exited.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
