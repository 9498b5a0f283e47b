/// Errors that can occur while decoding a single frame.
///
/// All of them are local to one frame; none invalidates the stream.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame is not a valid zlib stream.
    #[error("frame failed to decompress: {0}")]
    Compression(#[source] std::io::Error),

    /// The decompressed frame exceeds the configured limit.
    #[error("decompressed frame too large (more than {max} bytes)")]
    PayloadTooLarge { max: usize },

    /// The envelope or its body is not valid for the declared schema.
    #[error("malformed message{}: {source}", schema_suffix(.schema_ref))]
    Malformed {
        schema_ref: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    /// A recognized schema version that is deliberately not decoded.
    #[error("unsupported schema version: '{0}'")]
    UnsupportedVersion(String),

    /// The schema identifier is not in the catalogue.
    #[error("unhandled schema: '{0}'")]
    UnknownSchema(String),
}

impl DecodeError {
    /// Short stable label for logs and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Compression(_) => "compression",
            DecodeError::PayloadTooLarge { .. } => "too_large",
            DecodeError::Malformed { .. } => "malformed",
            DecodeError::UnsupportedVersion(_) => "unsupported_version",
            DecodeError::UnknownSchema(_) => "unknown_schema",
        }
    }
}

fn schema_suffix(schema_ref: &Option<String>) -> String {
    match schema_ref {
        Some(schema_ref) => format!(" for '{schema_ref}'"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
