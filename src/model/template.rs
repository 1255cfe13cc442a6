use crate::model::ResourceKind;
use serde_json::{json, Value};

/// Starting file for an attribute definition that only exists by name.
///
/// Built fresh on every call so a bootstrap never inherits values from an
/// earlier one in the same run.
pub fn attribute_definition_template(attribute_id: &str) -> Value {
    json!({
        "id": attribute_id,
        "display_name": {
            "default": attribute_id
        },
        "description": {
            "default": ""
        },
        "value_type": "string",
        "mandatory": false,
        "localizable": false,
        "site_specific": false,
        "searchable": false,
        "visible": false,
        "externally_managed": false,
        "order_required": false
    })
}

/// Starting file for an attribute group that only exists by name
pub fn attribute_group_template(group_id: &str) -> Value {
    json!({
        "id": group_id,
        "display_name": {
            "default": group_id
        },
        "description": {
            "default": ""
        },
        "internal": false
    })
}

pub fn template_for(kind: ResourceKind, id: &str) -> Value {
    match kind {
        ResourceKind::AttributeDefinition => attribute_definition_template(id),
        ResourceKind::AttributeGroup => attribute_group_template(id),
    }
}
