use crate::api::SystemObjectApi;
use crate::logic::SyncContext;
use crate::model::CUSTOM_OBJECT_TYPE;
use crate::ui::Reporter;
use anyhow::Result;
use log::debug;
use serde_json::Value;

/// Works out which targets a command runs over when none was named.
///
/// A failing list call is reported and yields no targets; callers then
/// simply have nothing to iterate.
pub struct BulkDriver<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> {
    ctx: SyncContext<'a, A, R>,
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> BulkDriver<'a, A, R> {
    pub fn new(ctx: SyncContext<'a, A, R>) -> Self {
        Self { ctx }
    }

    /// The named object type, or every remote system object type except `CustomObject`
    pub async fn object_types(&self, explicit: Option<&str>) -> Result<Vec<String>> {
        if let Some(object_type) = explicit {
            return Ok(vec![object_type.to_string()]);
        }

        let result = self.ctx.api.get_system_object_definitions().await?;
        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(Vec::new());
        }

        let object_types: Vec<String> = result
            .list_items()
            .iter()
            .filter_map(|object| object.get("object_type").and_then(Value::as_str))
            .filter(|object_type| *object_type != CUSTOM_OBJECT_TYPE)
            .map(str::to_string)
            .collect();
        debug!("Enumerated {} object types", object_types.len());

        Ok(object_types)
    }

    /// Remote attribute ids of an object type; system attributes only when asked for
    pub async fn attribute_ids(&self, object_type: &str, include_system_attributes: bool) -> Result<Vec<String>> {
        let result = self.ctx.api.get_attribute_definitions(object_type).await?;
        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(Vec::new());
        }

        Ok(result
            .list_items()
            .iter()
            .filter(|attribute| {
                include_system_attributes || !attribute.get("system").and_then(Value::as_bool).unwrap_or(false)
            })
            .filter_map(|attribute| attribute.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    /// Remote attribute group ids of an object type
    pub async fn group_ids(&self, object_type: &str) -> Result<Vec<String>> {
        let result = self.ctx.api.get_attribute_groups(object_type).await?;
        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(Vec::new());
        }

        Ok(result
            .list_items()
            .iter()
            .filter_map(|group| group.get("id").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    /// The named object type, or every object type with a local directory
    pub fn local_object_types(&self, explicit: Option<&str>) -> Result<Vec<String>> {
        match explicit {
            Some(object_type) => Ok(vec![object_type.to_string()]),
            None => Ok(self.ctx.store.list_object_types()?),
        }
    }
}
