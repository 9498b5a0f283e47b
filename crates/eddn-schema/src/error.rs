use eddn_message::Variant;

/// Errors that can occur during schema loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema document could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The schema could not be compiled.
    #[error("failed to compile schema: {0}")]
    CompileFailed(String),

    /// The message failed schema validation.
    #[error("{variant} message failed validation: {message}")]
    ValidationFailed { variant: Variant, message: String },

    /// The message is not valid JSON.
    #[error("message is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No schema registered for the given variant.
    #[error("no schema registered for {0} messages")]
    NoSchema(Variant),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
