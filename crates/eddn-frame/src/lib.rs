//! Decompress-and-classify decoder for EDDN relay frames.
//!
//! Every frame published by the relay is a zlib stream wrapping one JSON
//! document:
//! - `$schemaRef` names the schema family and version
//! - `header` carries the shared [`Metadata`](eddn_message::Metadata)
//! - `message` is the schema-specific body
//!
//! The body is only decoded once `$schemaRef` has selected its type.

pub mod codec;
pub mod decoder;
pub mod envelope;
pub mod error;

pub use codec::{deflate, inflate, FrameConfig, DEFAULT_MAX_DECOMPRESSED};
pub use decoder::{decode, decode_with_config, encode};
pub use envelope::Envelope;
pub use error::{DecodeError, Result};
