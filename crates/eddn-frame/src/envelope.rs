use eddn_message::Metadata;
use serde::Deserialize;
use serde_json::value::RawValue;

/// First-pass view of a decompressed frame.
///
/// `message` stays raw until `$schemaRef` selects the type to decode it into.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "$schemaRef")]
    pub schema_ref: String,
    pub header: Metadata,
    pub message: Box<RawValue>,
}

impl Envelope {
    /// Structural parse of decompressed frame bytes.
    pub fn parse(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }
}
