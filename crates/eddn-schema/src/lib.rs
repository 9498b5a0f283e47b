//! JSON Schema validation of outbound EDDN messages.
//!
//! The relay's upload gateway rejects documents that do not match the
//! published schema of their family. Validating locally catches contract
//! violations before a round trip. Inbound messages are never validated.

pub mod config;
pub mod error;
pub mod registry;
mod validator;

pub use config::{RegistryConfig, DEFAULT_MAX_DIRECTORY_SCHEMAS, DEFAULT_MAX_FILE_SIZE};
pub use error::{Result, SchemaError};
pub use registry::SchemaRegistry;
