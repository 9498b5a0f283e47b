use eddn_message::Variant;
use jsonschema::Validator;
use serde_json::Value;

use crate::error::{Result, SchemaError};

pub(crate) fn validate_value(variant: Variant, value: &Value, validator: &Validator) -> Result<()> {
    let mut errors = validator.iter_errors(value);
    if let Some(first) = errors.next() {
        let mut message = first.to_string();
        for err in errors.take(3) {
            message.push_str("; ");
            message.push_str(&err.to_string());
        }
        tracing::debug!(%variant, %message, "message rejected by schema");
        return Err(SchemaError::ValidationFailed { variant, message });
    }

    Ok(())
}
