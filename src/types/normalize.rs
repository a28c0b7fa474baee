//! Decoding of read-endpoint response bodies.
//!
//! ThingSpeak answers read requests with JSON in which missing samples are
//! `null`. Those are surfaced as the string `"NaN"` so a feed column keeps a
//! printable placeholder instead of a hole. Booleans, numbers, strings,
//! arrays and objects keep their natural JSON types, and objects keep the
//! service's key order.

use serde_json::Value;

use crate::error::ThingSpeakError;

/// Value substituted for every JSON `null`.
pub const NAN_SENTINEL: &str = "NaN";

/// A decoded response body.
pub type NormalizedResponse = Value;

/// Parse a response body and replace each `null` with [`NAN_SENTINEL`].
///
/// Text that is not valid JSON fails with
/// [`ThingSpeakError::MalformedResponse`]; nothing partial is returned.
pub fn normalize_response(text: &str) -> Result<NormalizedResponse, ThingSpeakError> {
    let mut value: Value =
        serde_json::from_str(text).map_err(|e| ThingSpeakError::MalformedResponse {
            message: e.to_string(),
            body: text.to_string(),
        })?;
    replace_nulls(&mut value);
    Ok(value)
}

fn replace_nulls(value: &mut Value) {
    match value {
        Value::Null => *value = Value::String(NAN_SENTINEL.to_string()),
        Value::Array(items) => items.iter_mut().for_each(replace_nulls),
        Value::Object(map) => map.values_mut().for_each(replace_nulls),
        _ => {}
    }
}

/// Check whether a normalized value is the `null` placeholder.
pub fn is_nan_sentinel(value: &Value) -> bool {
    value.as_str() == Some(NAN_SENTINEL)
}
