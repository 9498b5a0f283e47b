use eddn_message::{resolve, Message, Metadata, Record, SchemaStatus, Variant};
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::codec::{deflate, inflate, FrameConfig};
use crate::envelope::Envelope;
use crate::error::{DecodeError, Result};

/// Decode one raw relay frame with the default configuration.
pub fn decode(raw: &[u8]) -> Result<Message> {
    decode_with_config(raw, &FrameConfig::default())
}

/// Decode one raw relay frame.
///
/// Inflates the frame, reads `$schemaRef` from the envelope and only then
/// decodes the body into the variant the identifier selects. Deprecated
/// identifiers are rejected before the body is looked at.
pub fn decode_with_config(raw: &[u8], config: &FrameConfig) -> Result<Message> {
    let data = inflate(raw, config.max_decompressed_size)?;
    let envelope = Envelope::parse(&data).map_err(|source| DecodeError::Malformed {
        schema_ref: None,
        source,
    })?;

    match resolve(&envelope.schema_ref) {
        SchemaStatus::Current(variant) => decode_body(variant, envelope),
        SchemaStatus::Deprecated { .. } => {
            Err(DecodeError::UnsupportedVersion(envelope.schema_ref))
        }
        SchemaStatus::Unknown => Err(DecodeError::UnknownSchema(envelope.schema_ref)),
    }
}

/// Serialize and compress a message the way the relay publishes it.
pub fn encode(message: &Message) -> std::io::Result<Vec<u8>> {
    let json = serde_json::to_vec(message)?;
    deflate(&json)
}

fn decode_body(variant: Variant, envelope: Envelope) -> Result<Message> {
    let Envelope {
        schema_ref,
        header,
        message,
    } = envelope;

    let decoded = match variant {
        Variant::Journal => body(&message).map(|b| Message::Journal(record(&schema_ref, header, b))),
        Variant::Shipyard => {
            body(&message).map(|b| Message::Shipyard(record(&schema_ref, header, b)))
        }
        Variant::Commodity => {
            body(&message).map(|b| Message::Commodity(record(&schema_ref, header, b)))
        }
        Variant::Blackmarket => {
            body(&message).map(|b| Message::Blackmarket(record(&schema_ref, header, b)))
        }
        Variant::Outfitting => {
            body(&message).map(|b| Message::Outfitting(record(&schema_ref, header, b)))
        }
    };

    match decoded {
        Ok(message) => {
            tracing::trace!(%variant, %schema_ref, "frame decoded");
            Ok(message)
        }
        Err(source) => Err(DecodeError::Malformed {
            schema_ref: Some(schema_ref),
            source,
        }),
    }
}

fn body<P: DeserializeOwned>(raw: &RawValue) -> serde_json::Result<P> {
    serde_json::from_str(raw.get())
}

fn record<P>(schema_ref: &str, header: Metadata, message: P) -> Record<P> {
    Record {
        schema_ref: schema_ref.to_string(),
        header,
        message,
    }
}
