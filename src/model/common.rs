use serde::{Deserialize, Serialize};

/// Identifier of an attribute definition or attribute group within an object type
pub type Id = String;

/// Name of a system object type (e.g. `Product`, `Profile`)
pub type ObjectType = String;

/// Object type that never takes part in bulk enumeration
pub const CUSTOM_OBJECT_TYPE: &str = "CustomObject";

/// The two remote resource kinds the sync engine reconciles.
///
/// Both share the same create-or-update procedure; they differ in where
/// their local file lives, which endpoints they hit and how they are named
/// in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    AttributeDefinition,
    AttributeGroup,
}

impl ResourceKind {
    /// Human readable name used in console output
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::AttributeDefinition => "Attribute",
            ResourceKind::AttributeGroup => "Attribute Group",
        }
    }

    /// The command a user runs to fetch an existing resource of this kind
    pub fn get_command(&self) -> &'static str {
        match self {
            ResourceKind::AttributeDefinition => "attribute:get",
            ResourceKind::AttributeGroup => "attributegroup:get",
        }
    }

    /// Short CLI flag that selects a resource of this kind
    pub fn id_flag(&self) -> &'static str {
        match self {
            ResourceKind::AttributeDefinition => "-a",
            ResourceKind::AttributeGroup => "-g",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
