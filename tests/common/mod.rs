#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use sfcc_meta_sync::{LocalStore, OcapiResponse, RecordingReporter, SyncContext, SystemObjectApi};
use std::collections::HashMap;
use tempfile::TempDir;

/// One remote call as the fake saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub key: String,
    pub resource_state: Option<String>,
    pub body: Option<Value>,
}

/// In-memory stand-in for the OCAPI Data API.
///
/// Responses are keyed by operation and target, e.g.
/// `attribute_definition/Product/color` or `assign/Product/storefront/color`.
/// Unconfigured reads answer 404, unconfigured writes answer 200.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<HashMap<String, (u16, Value)>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, key: &str, status: u16, body: Value) -> &Self {
        self.responses
            .lock()
            .insert(key.to_string(), (status, body));
        self
    }

    pub fn fail(&self, key: &str, status: u16, message: &str) -> &Self {
        self.respond(key, status, json!({ "fault": { "message": message } }))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_keys(&self) -> Vec<String> {
        self.calls.lock().iter().map(|call| call.key.clone()).collect()
    }

    /// Calls whose key starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<Call> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.key.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn answer(&self, key: String, is_read: bool, resource_state: Option<&str>, body: Option<&[u8]>) -> OcapiResponse {
        self.calls.lock().push(Call {
            key: key.clone(),
            resource_state: resource_state.map(str::to_string),
            body: body.and_then(|bytes| serde_json::from_slice(bytes).ok()),
        });

        match self.responses.lock().get(&key) {
            Some((status, body)) => OcapiResponse::new(*status, Some(body.clone())),
            None if is_read => OcapiResponse::new(
                404,
                Some(json!({ "fault": { "message": format!("{} not found", key) } })),
            ),
            None => OcapiResponse::new(200, Some(json!({}))),
        }
    }
}

#[async_trait]
impl SystemObjectApi for FakeApi {
    async fn get_system_object_definitions(&self) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer("object_definitions".to_string(), true, None, None))
    }

    async fn get_attribute_definitions(&self, object_type: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(format!("attribute_definitions/{}", object_type), true, None, None))
    }

    async fn get_attribute_definition(&self, object_type: &str, attribute_id: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("attribute_definition/{}/{}", object_type, attribute_id),
            true,
            None,
            None,
        ))
    }

    async fn create_attribute_definition(&self, object_type: &str, attribute_id: &str, body: &[u8]) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("create_attribute_definition/{}/{}", object_type, attribute_id),
            false,
            None,
            Some(body),
        ))
    }

    async fn update_attribute_definition(
        &self,
        object_type: &str,
        attribute_id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("update_attribute_definition/{}/{}", object_type, attribute_id),
            false,
            resource_state,
            Some(body),
        ))
    }

    async fn delete_attribute_definition(&self, object_type: &str, attribute_id: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("delete_attribute_definition/{}/{}", object_type, attribute_id),
            false,
            None,
            None,
        ))
    }

    async fn get_attribute_groups(&self, object_type: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(format!("attribute_groups/{}", object_type), true, None, None))
    }

    async fn get_attribute_group(&self, object_type: &str, group_id: &str, only_definitions: bool) -> anyhow::Result<OcapiResponse> {
        let operation = if only_definitions {
            "attribute_group_definitions"
        } else {
            "attribute_group"
        };
        Ok(self.answer(
            format!("{}/{}/{}", operation, object_type, group_id),
            true,
            None,
            None,
        ))
    }

    async fn create_attribute_group(&self, object_type: &str, group_id: &str, body: &[u8]) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("create_attribute_group/{}/{}", object_type, group_id),
            false,
            None,
            Some(body),
        ))
    }

    async fn update_attribute_group(
        &self,
        object_type: &str,
        group_id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("update_attribute_group/{}/{}", object_type, group_id),
            false,
            resource_state,
            Some(body),
        ))
    }

    async fn delete_attribute_group(&self, object_type: &str, group_id: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("delete_attribute_group/{}/{}", object_type, group_id),
            false,
            None,
            None,
        ))
    }

    async fn assign_attribute_to_group(&self, object_type: &str, group_id: &str, attribute_id: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("assign/{}/{}/{}", object_type, group_id, attribute_id),
            false,
            None,
            None,
        ))
    }

    async fn unassign_attribute_from_group(&self, object_type: &str, group_id: &str, attribute_id: &str) -> anyhow::Result<OcapiResponse> {
        Ok(self.answer(
            format!("unassign/{}/{}/{}", object_type, group_id, attribute_id),
            false,
            None,
            None,
        ))
    }
}

/// Temporary project directory with its metadata store
pub struct Workspace {
    pub dir: TempDir,
    pub store: LocalStore,
    pub reporter: RecordingReporter,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::for_project(dir.path());
        Self {
            dir,
            store,
            reporter: RecordingReporter::new(),
        }
    }

    pub fn context<'a>(&'a self, api: &'a FakeApi) -> SyncContext<'a, FakeApi, RecordingReporter> {
        SyncContext::new(api, &self.store, &self.reporter)
    }

    /// Number of JSON files anywhere under the store
    pub fn file_count(&self) -> usize {
        count_files(self.store.base_path())
    }
}

fn count_files(path: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(path) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

/// Paged list body as returned by the list endpoints
pub fn list_body(items: Vec<Value>) -> Value {
    json!({
        "_v": "21.10",
        "count": items.len(),
        "start": 0,
        "total": items.len(),
        "data": items,
    })
}
