use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the sync engine itself.
///
/// Remote faults are not represented here: a call that completed with a
/// failing status is an [`OcapiResponse`](crate::api::OcapiResponse) and gets
/// reported, not propagated.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("You must specify an object to {action}.")]
    MissingObjectType { action: &'static str },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not acquire an OCAPI access token: {0}")]
    Auth(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
