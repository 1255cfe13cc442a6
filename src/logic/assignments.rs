use crate::api::SystemObjectApi;
use crate::logic::SyncContext;
use crate::ui::Reporter;
use anyhow::Result;
use log::{debug, info};
use serde_json::Value;

/// Outcome of replaying a group's recorded assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplySummary {
    pub assigned: Vec<String>,
    pub failed: Vec<String>,
}

/// Keeps `<group>-assignments.json` and the remote group assignments in step.
///
/// The remote side is authoritative: a fetch replaces the local list, an
/// apply replays it, and only an explicit unassign removes a single entry.
pub struct AssignmentReconciler<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> {
    ctx: SyncContext<'a, A, R>,
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> AssignmentReconciler<'a, A, R> {
    pub fn new(ctx: SyncContext<'a, A, R>) -> Self {
        Self { ctx }
    }

    /// Assign every locally recorded attribute to the group, in file order.
    ///
    /// Each assignment is reported on its own and a failure does not stop
    /// the remaining ones. No assignments file means nothing to do; an
    /// unreadable one is reported and skipped.
    pub async fn apply(&self, object_type: &str, group_id: &str) -> Result<ApplySummary> {
        let mut summary = ApplySummary::default();

        let attribute_ids = match self.ctx.store.read_assignments(object_type, group_id) {
            Ok(Some(attribute_ids)) => attribute_ids,
            Ok(None) => {
                debug!("No assignments recorded for group {} of {}", group_id, object_type);
                return Ok(summary);
            }
            Err(err) => {
                self.ctx.reporter.error(&format!(
                    "Could not read the assignments of Attribute Group {} of {}: {}",
                    group_id, object_type, err
                ));
                return Ok(summary);
            }
        };

        for attribute_id in attribute_ids {
            let result = self
                .ctx
                .api
                .assign_attribute_to_group(object_type, group_id, &attribute_id)
                .await?;

            if result.is_success() {
                self.ctx.reporter.success(&format!(
                    "Assigned {} to Attribute Group {} of {}.",
                    attribute_id, group_id, object_type
                ));
                summary.assigned.push(attribute_id);
            } else {
                self.ctx.reporter.error(&format!(
                    "Could not assign {} to Attribute Group {} of {}: {}",
                    attribute_id,
                    group_id,
                    object_type,
                    result.fault_message()
                ));
                summary.failed.push(attribute_id);
            }
        }

        Ok(summary)
    }

    /// Replace the local assignments file with the group's remote assignments.
    ///
    /// Returns the ids written, or `None` when the remote fetch failed (the
    /// local file is then left as it was).
    pub async fn fetch(&self, object_type: &str, group_id: &str) -> Result<Option<Vec<String>>> {
        let result = self
            .ctx
            .api
            .get_attribute_group(object_type, group_id, true)
            .await?;

        if !result.is_success() {
            self.ctx.reporter.error(&format!(
                "Could not fetch the assignments of Attribute Group {} of {}: {}",
                group_id,
                object_type,
                result.fault_message()
            ));
            return Ok(None);
        }

        let attribute_ids = assigned_attribute_ids(result.body());
        self.ctx
            .store
            .write_assignments(object_type, group_id, &attribute_ids)?;
        debug!(
            "Recorded {} assignments for group {} of {}",
            attribute_ids.len(),
            group_id,
            object_type
        );

        Ok(Some(attribute_ids))
    }

    /// Remove one attribute from the group remotely, then from the local list.
    ///
    /// The local file is only rewritten when the remote call succeeded and
    /// `preserve_file` is off. Removing the last entry leaves an empty list.
    pub async fn unassign(
        &self,
        object_type: &str,
        group_id: &str,
        attribute_id: &str,
        preserve_file: bool,
    ) -> Result<bool> {
        let result = self
            .ctx
            .api
            .unassign_attribute_from_group(object_type, group_id, attribute_id)
            .await?;

        if !result.is_success() {
            self.ctx.reporter.error(&format!(
                "Could not un-assign {} from Group {} of {}: {}",
                attribute_id,
                group_id,
                object_type,
                result.fault_message()
            ));
            return Ok(false);
        }

        self.ctx.reporter.success(&format!(
            "Attribute {} has been un-assigned from Group {} of {} successfully.",
            attribute_id, group_id, object_type
        ));

        if !preserve_file {
            self.remove_from_file(object_type, group_id, attribute_id)?;
        }

        Ok(true)
    }

    fn remove_from_file(&self, object_type: &str, group_id: &str, attribute_id: &str) -> Result<()> {
        let Some(attribute_ids) = self.ctx.store.read_assignments(object_type, group_id)? else {
            return Ok(());
        };

        let remaining = without_attribute(attribute_ids, attribute_id);
        self.ctx
            .store
            .write_assignments(object_type, group_id, &remaining)?;
        info!("Removed {} from the recorded assignments of {}", attribute_id, group_id);

        Ok(())
    }
}

/// Attribute ids listed under `attribute_definitions`; none when the field is absent
pub fn assigned_attribute_ids(group: &Value) -> Vec<String> {
    group
        .get("attribute_definitions")
        .and_then(Value::as_array)
        .map(|definitions| {
            definitions
                .iter()
                .filter_map(|definition| definition.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Drop every occurrence of `attribute_id`, keeping the others in order
pub fn without_attribute(attribute_ids: Vec<String>, attribute_id: &str) -> Vec<String> {
    attribute_ids
        .into_iter()
        .filter(|id| id != attribute_id)
        .collect()
}
