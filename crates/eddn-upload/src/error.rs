use eddn_message::Variant;

/// Errors that can occur while sending a message.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The record did not match the schema of its variant.
    #[error("validation failed: {0}")]
    Validation(#[from] eddn_schema::SchemaError),

    /// The request could not be delivered or its response read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with something other than `OK`.
    #[error("gateway rejected message (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// The record could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A schema document could not be fetched or compiled.
    #[error("failed to fetch {variant} schema from {uri}: {reason}")]
    SchemaFetch {
        variant: Variant,
        uri: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SendError>;
