//! One entry point per CLI command.
//!
//! Every command validates its parameters before touching the remote API,
//! frames its output with a start and end bookend and processes targets
//! strictly one after another. A target that fails remotely is reported and
//! the run moves on; only local I/O and transport errors abort a command.

use crate::api::SystemObjectApi;
use crate::logic::{AssignmentReconciler, BulkDriver, PushOutcome, SyncContext, UpsertResolver};
use crate::model::{
    clean_ocapi_response, require_object, require_object_for_id, AssignmentDeleteParams,
    AttributeDeleteParams, AttributeGetParams, AttributePushParams, GroupDeleteParams,
    GroupGetParams, GroupPushParams, ResourceKind,
};
use crate::ui::{BookendPhase, Reporter};
use anyhow::Result;
use log::info;

pub struct MetadataSync<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> {
    ctx: SyncContext<'a, A, R>,
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> MetadataSync<'a, A, R> {
    pub fn new(ctx: SyncContext<'a, A, R>) -> Self {
        Self { ctx }
    }

    fn bulk(&self) -> BulkDriver<'a, A, R> {
        BulkDriver::new(self.ctx)
    }

    fn resolver(&self) -> UpsertResolver<'a, A, R> {
        UpsertResolver::new(self.ctx)
    }

    fn reconciler(&self) -> AssignmentReconciler<'a, A, R> {
        AssignmentReconciler::new(self.ctx)
    }

    fn start(&self, command: &str, message: &str) {
        self.ctx
            .reporter
            .bookend(command, BookendPhase::Start, Some(message));
    }

    fn end(&self, command: &str) {
        self.ctx.reporter.bookend(command, BookendPhase::End, None);
    }

    // Attribute definitions

    /// Fetch attribute definitions and store their cleaned form locally
    pub async fn attribute_get(&self, params: &AttributeGetParams) -> Result<()> {
        let object_type = params.object_type.as_deref();
        require_object_for_id(object_type, params.attribute_id.as_deref(), "get the attribute from")?;

        const COMMAND: &str = "attribute:get";
        self.start(COMMAND, "Attempting to fetch field(s).");

        for object_type in self.bulk().object_types(object_type).await? {
            let attribute_ids = match &params.attribute_id {
                Some(id) => vec![id.clone()],
                None => {
                    self.bulk()
                        .attribute_ids(&object_type, params.include_system_attributes)
                        .await?
                }
            };

            for attribute_id in attribute_ids {
                self.get_single_attribute(&object_type, &attribute_id, params.do_not_save)
                    .await?;
            }
        }

        self.end(COMMAND);
        Ok(())
    }

    async fn get_single_attribute(&self, object_type: &str, attribute_id: &str, do_not_save: bool) -> Result<()> {
        let result = self
            .ctx
            .api
            .get_attribute_definition(object_type, attribute_id)
            .await?;

        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(());
        }

        self.ctx
            .echo_fields(ResourceKind::AttributeDefinition, result.body());
        self.ctx.reporter.success(&format!(
            "{}/{} has been successfully retrieved!",
            object_type, attribute_id
        ));

        if !do_not_save {
            let path = self.ctx.store.write_definition(
                object_type,
                attribute_id,
                &clean_ocapi_response(result.body()),
            )?;
            info!("Saved {}", path.display());
        }

        Ok(())
    }

    /// Push local attribute definition files; without an id, every local file of the object type
    pub async fn attribute_push(&self, params: &AttributePushParams) -> Result<Vec<PushOutcome>> {
        let object_type = params.object_type.as_deref();
        require_object_for_id(object_type, params.attribute_id.as_deref(), "push the attribute to")?;

        const COMMAND: &str = "attribute:push";
        self.start(COMMAND, "Attempting to push a field.");

        let mut outcomes = Vec::new();
        for object_type in self.bulk().local_object_types(object_type)? {
            let attribute_ids = match &params.attribute_id {
                Some(id) => vec![id.clone()],
                None => self.ctx.store.list_definitions(&object_type)?,
            };

            for attribute_id in attribute_ids {
                let outcome = self
                    .resolver()
                    .push(
                        ResourceKind::AttributeDefinition,
                        &object_type,
                        &attribute_id,
                        params.force_recreate,
                    )
                    .await?;
                outcomes.push(outcome);
            }
        }

        self.end(COMMAND);
        Ok(outcomes)
    }

    /// Delete attribute definitions remotely, and their local files unless preserved
    pub async fn attribute_delete(&self, params: &AttributeDeleteParams) -> Result<()> {
        let object_type = require_object(params.object_type.as_deref(), "delete the attribute from")?;

        const COMMAND: &str = "attribute:delete";
        self.start(COMMAND, "Attempting to delete a field.");

        let attribute_ids = match &params.attribute_id {
            Some(id) => vec![id.clone()],
            None => {
                self.bulk()
                    .attribute_ids(object_type, params.include_system_attributes)
                    .await?
            }
        };

        for attribute_id in attribute_ids {
            self.delete_single_attribute(object_type, &attribute_id, params.preserve_file)
                .await?;
        }

        self.end(COMMAND);
        Ok(())
    }

    async fn delete_single_attribute(&self, object_type: &str, attribute_id: &str, preserve_file: bool) -> Result<()> {
        let result = self
            .ctx
            .api
            .delete_attribute_definition(object_type, attribute_id)
            .await?;

        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(());
        }

        self.ctx.reporter.success(&format!(
            "Attribute {} of {} deleted successfully.",
            attribute_id, object_type
        ));

        if !preserve_file {
            self.ctx.store.delete_definition(object_type, attribute_id)?;
        }

        Ok(())
    }

    // Attribute groups

    /// Fetch attribute groups, store their cleaned form and their assignment lists
    pub async fn group_get(&self, params: &GroupGetParams) -> Result<()> {
        let object_type = params.object_type.as_deref();
        require_object_for_id(object_type, params.group_id.as_deref(), "get the attribute group from")?;

        const COMMAND: &str = "attributegroup:get";
        self.start(COMMAND, "Attempting to fetch attribute group(s).");

        for object_type in self.bulk().object_types(object_type).await? {
            let group_ids = match &params.group_id {
                Some(id) => vec![id.clone()],
                None => self.bulk().group_ids(&object_type).await?,
            };

            for group_id in group_ids {
                self.get_single_group(&object_type, &group_id, params.do_not_save)
                    .await?;
            }
        }

        self.end(COMMAND);
        Ok(())
    }

    async fn get_single_group(&self, object_type: &str, group_id: &str, do_not_save: bool) -> Result<()> {
        let result = self
            .ctx
            .api
            .get_attribute_group(object_type, group_id, false)
            .await?;

        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(());
        }

        self.ctx
            .echo_fields(ResourceKind::AttributeGroup, result.body());
        self.ctx.reporter.success(&format!(
            "Attribute Group {} of {} has been successfully retrieved!",
            group_id, object_type
        ));

        if !do_not_save {
            let path = self.ctx.store.write_group(
                object_type,
                group_id,
                &clean_ocapi_response(result.body()),
            )?;
            info!("Saved {}", path.display());

            self.reconciler().fetch(object_type, group_id).await?;
        }

        Ok(())
    }

    /// Push local attribute group files and replay their assignments
    pub async fn group_push(&self, params: &GroupPushParams) -> Result<Vec<PushOutcome>> {
        let object_type = params.object_type.as_deref();
        require_object_for_id(object_type, params.group_id.as_deref(), "push the attribute group to")?;

        const COMMAND: &str = "attributegroup:push";
        self.start(COMMAND, "Attempting to push an Attribute Group.");

        let mut outcomes = Vec::new();
        for object_type in self.bulk().local_object_types(object_type)? {
            let group_ids = match &params.group_id {
                Some(id) => vec![id.clone()],
                None => self.ctx.store.list_groups(&object_type)?,
            };

            for group_id in group_ids {
                let outcome = self
                    .resolver()
                    .push(
                        ResourceKind::AttributeGroup,
                        &object_type,
                        &group_id,
                        params.force_recreate,
                    )
                    .await?;
                outcomes.push(outcome);
            }
        }

        self.end(COMMAND);
        Ok(outcomes)
    }

    /// Delete attribute groups remotely, and their group and assignment files unless preserved
    pub async fn group_delete(&self, params: &GroupDeleteParams) -> Result<()> {
        let object_type = require_object(params.object_type.as_deref(), "delete the attribute group from")?;

        const COMMAND: &str = "attributegroup:delete";
        self.start(COMMAND, "Attempting to delete a group.");

        let group_ids = match &params.group_id {
            Some(id) => vec![id.clone()],
            None => self.bulk().group_ids(object_type).await?,
        };

        for group_id in group_ids {
            self.delete_single_group(object_type, &group_id, params.preserve_file)
                .await?;
        }

        self.end(COMMAND);
        Ok(())
    }

    async fn delete_single_group(&self, object_type: &str, group_id: &str, preserve_file: bool) -> Result<()> {
        let result = self
            .ctx
            .api
            .delete_attribute_group(object_type, group_id)
            .await?;

        if !result.is_success() {
            self.ctx.reporter.error(result.fault_message());
            return Ok(());
        }

        self.ctx.reporter.success(&format!(
            "Attribute Group {} of {} deleted successfully.",
            group_id, object_type
        ));

        if !preserve_file {
            self.ctx.store.delete_group(object_type, group_id)?;
            self.ctx.store.delete_assignments(object_type, group_id)?;
        }

        Ok(())
    }

    /// Un-assign one attribute from a group
    pub async fn group_assignment_delete(&self, params: &AssignmentDeleteParams) -> Result<bool> {
        const COMMAND: &str = "attributegroup:assignment:delete";
        self.start(COMMAND, "Attempting to delete an assignment to an attribute group.");

        let removed = self
            .reconciler()
            .unassign(
                &params.object_type,
                &params.group_id,
                &params.attribute_id,
                params.preserve_file,
            )
            .await?;

        self.end(COMMAND);
        Ok(removed)
    }
}
