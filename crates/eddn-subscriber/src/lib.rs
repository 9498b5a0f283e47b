//! Subscription handle and dispatch router for the EDDN relay.
//!
//! [`open`] connects to the relay, spawns one router task and returns a
//! [`Subscription`]. The router decodes each frame, drops variants named in
//! the [`FilterMask`] and delivers everything else on a bounded per-variant
//! channel. The handle asks the router to stop through a [`ControlHandle`];
//! the router answers exactly once on [`Subscription::done`].

pub mod config;
pub mod control;
pub mod error;
mod router;
pub mod subscription;

pub use config::{SubscriberConfig, DEFAULT_CHANNEL_CAPACITY, DEFAULT_RECV_RETRY_DELAY};
pub use control::{ControlHandle, ControlMessage, Shutdown};
pub use eddn_message::FilterMask;
pub use error::{Result, SubscriberError};
pub use subscription::{open, open_with_config, open_with_subscriber, Subscription};
