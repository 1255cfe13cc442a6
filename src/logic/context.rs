use crate::api::SystemObjectApi;
use crate::model::{debug_fields, map_fields_to_table, ResourceKind};
use crate::store::LocalStore;
use crate::ui::Reporter;
use serde_json::Value;

/// Collaborators shared by every sync component: the remote API, the local
/// store and the reporter, plus the debug switch.
pub struct SyncContext<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> {
    pub api: &'a A,
    pub store: &'a LocalStore,
    pub reporter: &'a R,
    pub debug: bool,
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> SyncContext<'a, A, R> {
    pub fn new(api: &'a A, store: &'a LocalStore, reporter: &'a R) -> Self {
        Self {
            api,
            store,
            reporter,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Echo the debug fields of a remote body when debug output is on
    pub(crate) fn echo_fields(&self, kind: ResourceKind, body: &Value) {
        if self.debug {
            self.reporter
                .fields(&map_fields_to_table(body, debug_fields(kind)));
        }
    }
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> Clone for SyncContext<'a, A, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> Copy for SyncContext<'a, A, R> {}
