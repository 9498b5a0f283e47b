//! Client for the Elite Dangerous Data Network (EDDN).
//!
//! EDDN relays commander-submitted game data as zlib-compressed JSON over a
//! ZeroMQ PUB socket. This crate subscribes to that stream, decodes each
//! frame into a typed [`Message`], and routes it to a per-variant channel.
//! It can also publish messages to the upload gateway.
//!
//! # Crate Structure
//!
//! - [`transport`]: subscriber abstraction (ZeroMQ SUB, in-memory)
//! - [`message`]: typed message model, schema identifiers, filter mask
//! - [`frame`]: zlib + JSON frame decoder
//! - [`subscriber`]: dispatch router and subscription handle (`subscriber` feature)
//! - [`schema`]: JSON Schema validation of outbound messages (`upload` feature)
//! - [`upload`]: validate-and-POST uploader (`upload` feature)
//!
//! ```ignore
//! let mut subscription = eddn::open(FilterMask::NONE).await?;
//! while let Some(record) = subscription.journal.recv().await {
//!     println!("{}", record.message.star_system());
//! }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use eddn_transport::*;
}

/// Re-export message model types.
pub mod message {
    pub use eddn_message::*;
}

/// Re-export frame decoder types.
pub mod frame {
    pub use eddn_frame::*;
}

/// Re-export subscription types (requires `subscriber` feature).
#[cfg(feature = "subscriber")]
pub mod subscriber {
    pub use eddn_subscriber::*;
}

/// Re-export schema validation types (requires `upload` feature).
#[cfg(feature = "upload")]
pub mod schema {
    pub use eddn_schema::*;
}

/// Re-export uploader types (requires `upload` feature).
#[cfg(feature = "upload")]
pub mod upload {
    pub use eddn_upload::*;
}

pub use eddn_message::{FilterMask, Message, Variant};
#[cfg(feature = "subscriber")]
pub use eddn_subscriber::{open, open_with_config, Shutdown, Subscription};
#[cfg(feature = "upload")]
pub use eddn_upload::{Identity, Uploader};

/// Library version as (major, minor, patch).
pub fn version() -> (u32, u32, u32) {
    let part = |text: &str| text.parse().unwrap_or(0);
    (
        part(env!("CARGO_PKG_VERSION_MAJOR")),
        part(env!("CARGO_PKG_VERSION_MINOR")),
        part(env!("CARGO_PKG_VERSION_PATCH")),
    )
}
