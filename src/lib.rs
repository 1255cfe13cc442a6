//! Synchronize system object attribute definitions and attribute groups
//! between local JSON files and a commerce instance's OCAPI Data API.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;
pub mod ui;

// Export API types
pub use api::{OcapiClient, OcapiResponse, SystemObjectApi};

// Export logic types
pub use logic::{
    AssignmentReconciler, BulkDriver, MetadataSync, Mutation, PushOutcome, SyncContext,
    UpsertResolver,
};

// Export all model types
pub use model::*;

// Export store and reporting types
pub use error::{SyncError, SyncResult};
pub use store::LocalStore;
pub use ui::{ConsoleReporter, RecordingReporter, Reporter};
