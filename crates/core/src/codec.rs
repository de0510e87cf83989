//! Structured payload codec.
//!
//! Payloads are stored as self-describing JSON objects. Encoding writes only
//! the fields the payload type declares; decoding fails on malformed text or
//! on text whose shape does not match the target type.
//!
//! Encoding refuses any payload whose document would not decode back into the
//! same type (JSON has no NaN or infinity, so such floats are written as
//! `null`). Nothing unreadable ever reaches a store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;

/// Encode a payload into its JSON document.
///
/// Fails with [`CoreError::Validation`] if the document would not decode
/// back into `P`.
pub fn encode<P: Serialize + DeserializeOwned>(payload: &P) -> Result<String, CoreError> {
    let text = serde_json::to_string(payload)
        .map_err(|e| CoreError::Internal(format!("Failed to encode payload: {e}")))?;
    serde_json::from_str::<P>(&text)
        .map_err(|e| CoreError::Validation(format!("Payload cannot be stored: {e}")))?;
    Ok(text)
}

/// Decode a JSON document into a payload of type `P`.
pub fn decode<P: DeserializeOwned>(text: &str) -> Result<P, CoreError> {
    serde_json::from_str(text).map_err(|e| CoreError::Deserialization(e.to_string()))
}
