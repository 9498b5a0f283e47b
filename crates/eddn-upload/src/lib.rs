//! Outbound path: stamp, validate and POST messages to the EDDN gateway.
//!
//! ```ignore
//! let uploader = Uploader::new(Identity::new("cmdr", "my-tool", "1.0"))?
//!     .with_remote_schemas()
//!     .await?;
//! uploader.send(shipyard_message).await?;
//! ```

pub mod config;
pub mod error;
pub mod uploader;

pub use config::{UploaderConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, UPLOAD_ENDPOINT};
pub use error::{Result, SendError};
pub use uploader::{Identity, Uploader};
