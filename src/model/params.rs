//! Typed parameters for every sync operation.
//!
//! An absent `object_type` means "every system object type"; an absent
//! resource id means "every resource of the object type".

use crate::error::{SyncError, SyncResult};
use crate::model::{Id, ObjectType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeGetParams {
    pub object_type: Option<ObjectType>,
    pub attribute_id: Option<Id>,
    pub do_not_save: bool,
    pub include_system_attributes: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributePushParams {
    pub object_type: Option<ObjectType>,
    pub attribute_id: Option<Id>,
    /// Destructive: detaches the attribute from its groups and drops its values
    pub force_recreate: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDeleteParams {
    pub object_type: Option<ObjectType>,
    pub attribute_id: Option<Id>,
    pub preserve_file: bool,
    pub include_system_attributes: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupGetParams {
    pub object_type: Option<ObjectType>,
    pub group_id: Option<Id>,
    pub do_not_save: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupPushParams {
    pub object_type: Option<ObjectType>,
    pub group_id: Option<Id>,
    /// Destructive: drops every attribute assignment of the group
    pub force_recreate: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupDeleteParams {
    pub object_type: Option<ObjectType>,
    pub group_id: Option<Id>,
    pub preserve_file: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentDeleteParams {
    pub object_type: ObjectType,
    pub group_id: Id,
    pub attribute_id: Id,
    pub preserve_file: bool,
}

/// Reject a specific resource id that comes without its object type
pub(crate) fn require_object_for_id(
    object_type: Option<&str>,
    id: Option<&str>,
    action: &'static str,
) -> SyncResult<()> {
    if id.is_some() && object_type.is_none() {
        return Err(SyncError::MissingObjectType { action });
    }
    Ok(())
}

/// Destructive operations never fan out across every object type
pub(crate) fn require_object<'a>(object_type: Option<&'a str>, action: &'static str) -> SyncResult<&'a str> {
    object_type.ok_or(SyncError::MissingObjectType { action })
}
