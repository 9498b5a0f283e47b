/// Errors surfaced by the subscription API.
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    /// The relay could not be reached or subscribed to.
    #[error("connection failed: {0}")]
    Connection(#[from] eddn_transport::TransportError),

    /// The router task went away without reporting completion.
    #[error("router terminated without signalling completion")]
    Terminated,
}

pub type Result<T> = std::result::Result<T, SubscriberError>;
