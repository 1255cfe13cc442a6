use crate::api::OcapiResponse;
use anyhow::Result;

/// Remote operations on system object metadata.
///
/// Every method resolves to an [`OcapiResponse`] once the call completed,
/// whatever its status. `Err` is reserved for calls that never completed
/// (network failure, retries exhausted, no access token).
#[async_trait::async_trait]
pub trait SystemObjectApi: Send + Sync {
    /// All system object definitions (`data[].object_type`)
    async fn get_system_object_definitions(&self) -> Result<OcapiResponse>;

    /// All attribute definitions of an object type (`data[].id`, `data[].system`)
    async fn get_attribute_definitions(&self, object_type: &str) -> Result<OcapiResponse>;
    async fn get_attribute_definition(&self, object_type: &str, attribute_id: &str) -> Result<OcapiResponse>;
    async fn create_attribute_definition(&self, object_type: &str, attribute_id: &str, body: &[u8]) -> Result<OcapiResponse>;
    async fn update_attribute_definition(
        &self,
        object_type: &str,
        attribute_id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> Result<OcapiResponse>;
    async fn delete_attribute_definition(&self, object_type: &str, attribute_id: &str) -> Result<OcapiResponse>;

    /// All attribute groups of an object type (`data[].id`)
    async fn get_attribute_groups(&self, object_type: &str) -> Result<OcapiResponse>;
    /// A single group; with `only_definitions` the body only carries `attribute_definitions[].id`
    async fn get_attribute_group(&self, object_type: &str, group_id: &str, only_definitions: bool) -> Result<OcapiResponse>;
    async fn create_attribute_group(&self, object_type: &str, group_id: &str, body: &[u8]) -> Result<OcapiResponse>;
    async fn update_attribute_group(
        &self,
        object_type: &str,
        group_id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> Result<OcapiResponse>;
    async fn delete_attribute_group(&self, object_type: &str, group_id: &str) -> Result<OcapiResponse>;

    async fn assign_attribute_to_group(&self, object_type: &str, group_id: &str, attribute_id: &str) -> Result<OcapiResponse>;
    async fn unassign_attribute_from_group(&self, object_type: &str, group_id: &str, attribute_id: &str) -> Result<OcapiResponse>;
}
