use crate::model::ResourceKind;
use serde_json::Value;

/// Fields echoed in debug mode for attribute definitions
pub const ATTRIBUTES_SYSTEM_OBJECT: [&str; 11] = [
    "display_name.default",
    "effective_id",
    "field_length",
    "key",
    "localizable",
    "mandatory",
    "order_required",
    "site_specific",
    "system",
    "value_type",
    "externally_managed",
];

/// Fields echoed in debug mode for attribute groups
pub const ATTRIBUTES_ATTRIBUTE_GROUP: [&str; 4] = [
    "display_name.default",
    "id",
    "description.default",
    "internal",
];

const MISSING_VALUE: &str = "undefined";

pub fn debug_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::AttributeDefinition => &ATTRIBUTES_SYSTEM_OBJECT,
        ResourceKind::AttributeGroup => &ATTRIBUTES_ATTRIBUTE_GROUP,
    }
}

/// Resolve a dotted path (`display_name.default`) inside a JSON value
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.get(segment))
}

/// Turn selected fields of a remote body into `(name, value)` table rows.
///
/// Strings are rendered without quotes; absent fields render as `undefined`.
pub fn map_fields_to_table(value: &Value, fields: &[&str]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|field| {
            let rendered = match lookup_path(value, field) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Null) | None => MISSING_VALUE.to_string(),
                Some(other) => other.to_string(),
            };
            (field.to_string(), rendered)
        })
        .collect()
}
