use crate::error::{SyncError, SyncResult};
use crate::model::ResourceKind;
use itertools::Itertools;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const GROUPS_DIR: &str = "groups";
const ASSIGNMENTS_SUFFIX: &str = "-assignments";
const JSON_EXTENSION: &str = "json";

/// Path of the metadata tree relative to the project root
pub const DEFAULT_METADATA_DIR: [&str; 3] = ["data", "meta", "system-objecttype-extensions"];

/// File-backed store for attribute definitions, attribute groups and group
/// assignment lists.
///
/// Layout under the base directory:
///
/// ```text
/// <objectType>/<attributeId>.json
/// <objectType>/groups/<groupId>.json
/// <objectType>/groups/<groupId>-assignments.json
/// ```
///
/// Every file is written as pretty-printed JSON with 4-space indentation.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base: PathBuf,
}

impl LocalStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Store rooted at `<root>/data/meta/system-objecttype-extensions`
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        let base = DEFAULT_METADATA_DIR
            .iter()
            .fold(root.as_ref().to_path_buf(), |path, segment| path.join(segment));
        Self::new(base)
    }

    pub fn base_path(&self) -> &Path {
        &self.base
    }

    pub fn object_dir(&self, object_type: &str) -> PathBuf {
        self.base.join(object_type)
    }

    fn groups_dir(&self, object_type: &str) -> PathBuf {
        self.object_dir(object_type).join(GROUPS_DIR)
    }

    pub fn definition_path(&self, object_type: &str, attribute_id: &str) -> PathBuf {
        self.object_dir(object_type)
            .join(format!("{}.{}", attribute_id, JSON_EXTENSION))
    }

    pub fn group_path(&self, object_type: &str, group_id: &str) -> PathBuf {
        self.groups_dir(object_type)
            .join(format!("{}.{}", group_id, JSON_EXTENSION))
    }

    pub fn assignments_path(&self, object_type: &str, group_id: &str) -> PathBuf {
        self.groups_dir(object_type).join(format!(
            "{}{}.{}",
            group_id, ASSIGNMENTS_SUFFIX, JSON_EXTENSION
        ))
    }

    pub fn resource_path(&self, kind: ResourceKind, object_type: &str, id: &str) -> PathBuf {
        match kind {
            ResourceKind::AttributeDefinition => self.definition_path(object_type, id),
            ResourceKind::AttributeGroup => self.group_path(object_type, id),
        }
    }

    // Attribute definitions

    pub fn read_definition(&self, object_type: &str, attribute_id: &str) -> SyncResult<Option<Vec<u8>>> {
        read_bytes(&self.definition_path(object_type, attribute_id))
    }

    pub fn write_definition(&self, object_type: &str, attribute_id: &str, content: &Value) -> SyncResult<PathBuf> {
        let path = self.definition_path(object_type, attribute_id);
        write_json(&path, content)?;
        Ok(path)
    }

    pub fn delete_definition(&self, object_type: &str, attribute_id: &str) -> SyncResult<bool> {
        remove_file(&self.definition_path(object_type, attribute_id))
    }

    // Attribute groups

    pub fn read_group(&self, object_type: &str, group_id: &str) -> SyncResult<Option<Vec<u8>>> {
        read_bytes(&self.group_path(object_type, group_id))
    }

    pub fn write_group(&self, object_type: &str, group_id: &str, content: &Value) -> SyncResult<PathBuf> {
        let path = self.group_path(object_type, group_id);
        write_json(&path, content)?;
        Ok(path)
    }

    pub fn delete_group(&self, object_type: &str, group_id: &str) -> SyncResult<bool> {
        remove_file(&self.group_path(object_type, group_id))
    }

    // Group assignments

    pub fn read_assignments(&self, object_type: &str, group_id: &str) -> SyncResult<Option<Vec<String>>> {
        let path = self.assignments_path(object_type, group_id);
        match read_bytes(&path)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| SyncError::json(&path, e)),
            None => Ok(None),
        }
    }

    pub fn write_assignments(&self, object_type: &str, group_id: &str, attribute_ids: &[String]) -> SyncResult<PathBuf> {
        let path = self.assignments_path(object_type, group_id);
        write_json(&path, &attribute_ids)?;
        Ok(path)
    }

    pub fn delete_assignments(&self, object_type: &str, group_id: &str) -> SyncResult<bool> {
        remove_file(&self.assignments_path(object_type, group_id))
    }

    // Kind-generic access used by the upsert procedure

    pub fn read_resource(&self, kind: ResourceKind, object_type: &str, id: &str) -> SyncResult<Option<Vec<u8>>> {
        read_bytes(&self.resource_path(kind, object_type, id))
    }

    pub fn write_resource(&self, kind: ResourceKind, object_type: &str, id: &str, content: &Value) -> SyncResult<PathBuf> {
        match kind {
            ResourceKind::AttributeDefinition => self.write_definition(object_type, id, content),
            ResourceKind::AttributeGroup => self.write_group(object_type, id, content),
        }
    }

    // Enumeration of what exists locally

    /// Object types that have a directory under the base path, sorted
    pub fn list_object_types(&self) -> SyncResult<Vec<String>> {
        Ok(list_entries(&self.base)?
            .into_iter()
            .filter(|path| path.is_dir())
            .filter_map(|path| file_name(&path))
            .sorted()
            .collect())
    }

    /// Attribute ids with a local definition file, sorted
    pub fn list_definitions(&self, object_type: &str) -> SyncResult<Vec<String>> {
        Ok(json_stems(&self.object_dir(object_type))?
            .into_iter()
            .sorted()
            .collect())
    }

    /// Group ids with a local group file, sorted; assignment files are skipped
    pub fn list_groups(&self, object_type: &str) -> SyncResult<Vec<String>> {
        Ok(json_stems(&self.groups_dir(object_type))?
            .into_iter()
            .filter(|stem| !stem.ends_with(ASSIGNMENTS_SUFFIX))
            .sorted()
            .collect())
    }
}

fn read_bytes(path: &Path) -> SyncResult<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::io(path, e)),
    }
}

/// Serialize with 4-space indentation, creating parent directories first
fn write_json<T: Serialize + ?Sized>(path: &Path, content: &T) -> SyncResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    content
        .serialize(&mut serializer)
        .map_err(|e| SyncError::json(path, e))?;

    fs::write(path, buffer).map_err(|e| SyncError::io(path, e))
}

fn remove_file(path: &Path) -> SyncResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SyncError::io(path, e)),
    }
}

fn list_entries(dir: &Path) -> SyncResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(SyncError::io(dir, e)),
    };

    entries
        .map(|entry| entry.map(|e| e.path()).map_err(|e| SyncError::io(dir, e)))
        .collect()
}

fn json_stems(dir: &Path) -> SyncResult<Vec<String>> {
    Ok(list_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(JSON_EXTENSION))
        .filter_map(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        })
        .collect())
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
