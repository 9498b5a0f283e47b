//! Pub/sub subscriber abstraction for the EDDN relay.
//!
//! This is the lowest layer of the workspace. It hands out raw, still
//! compressed frames and knows nothing about their contents:
//! - [`ZmqSubscriber`] connects to a ZeroMQ PUB relay and subscribes to every topic
//! - [`MemorySubscriber`] is fed from an in-process [`FramePublisher`]
//!
//! Everything above builds on the [`Subscriber`] trait provided here.

pub mod error;
pub mod memory;
pub mod traits;
pub mod zmq;

pub use error::{Result, TransportError};
pub use memory::{memory_pair, FramePublisher, MemorySubscriber};
pub use traits::Subscriber;
pub use zmq::{ZmqSubscriber, DEFAULT_CONNECT_TIMEOUT, RELAY_ENDPOINT};
