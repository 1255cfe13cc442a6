use serde_json::Value;

/// Server-only or volatile fields that never end up in a local file
pub const VOLATILE_FIELDS: [&str; 7] = [
    "_v",
    "_type",
    "_resource_state",
    "link",
    "effective_id",
    "system",
    "attribute_definitions_count",
];

/// Produce the on-disk form of an OCAPI response body.
///
/// Top-level volatile fields are dropped and everything else is kept as is.
/// The input is left untouched so the caller can still read
/// `_resource_state` (or any other stripped field) from it afterwards.
/// Non-object values are returned unchanged.
pub fn clean_ocapi_response(response: &Value) -> Value {
    match response {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .filter(|(key, _)| !VOLATILE_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
