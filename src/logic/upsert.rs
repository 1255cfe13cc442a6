use crate::api::{OcapiResponse, SystemObjectApi};
use crate::logic::{AssignmentReconciler, SyncContext};
use crate::model::{template_for, ResourceKind};
use crate::ui::Reporter;
use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Remote mutation chosen for a push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
}

/// What a single push ended in
#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome {
    /// No local file existed; a starting template was written and nothing was sent
    TemplateBootstrapped { path: PathBuf },
    Pushed(Mutation),
    Rejected { mutation: Mutation, fault: String },
}

impl PushOutcome {
    pub fn is_pushed(&self) -> bool {
        matches!(self, PushOutcome::Pushed(_))
    }
}

/// UPDATE only when the resource exists remotely and no recreate was asked for
pub fn decide_mutation(exists_remotely: bool, force_recreate: bool) -> Mutation {
    if exists_remotely && !force_recreate {
        Mutation::Update
    } else {
        Mutation::Create
    }
}

/// Create-or-update of one attribute definition or attribute group from its local file
pub struct UpsertResolver<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> {
    ctx: SyncContext<'a, A, R>,
}

impl<'a, A: SystemObjectApi + ?Sized, R: Reporter + ?Sized> UpsertResolver<'a, A, R> {
    pub fn new(ctx: SyncContext<'a, A, R>) -> Self {
        Self { ctx }
    }

    /// Push the local file of `id` to the remote instance.
    ///
    /// The remote state is always fetched first: it decides between CREATE
    /// and UPDATE and supplies the resource state UPDATE needs. A missing
    /// local file short-circuits into writing a template, with no remote
    /// mutation. `force_recreate` always CREATEs, which on an existing
    /// resource drops its group assignments and record values remotely.
    ///
    /// After a successful group push the locally recorded assignments are
    /// replayed.
    pub async fn push(
        &self,
        kind: ResourceKind,
        object_type: &str,
        id: &str,
        force_recreate: bool,
    ) -> Result<PushOutcome> {
        let current = self.fetch_remote(kind, object_type, id).await?;

        let Some(body) = self.ctx.store.read_resource(kind, object_type, id)? else {
            return self.bootstrap(kind, object_type, id);
        };

        let mutation = decide_mutation(current.is_success(), force_recreate);
        let result = match mutation {
            Mutation::Update => {
                debug!("{} {} of {} should be updated", kind, id, object_type);
                self.update(kind, object_type, id, current.resource_state(), &body)
                    .await?
            }
            Mutation::Create => {
                debug!("{} {} of {} should be (re)created", kind, id, object_type);
                self.create(kind, object_type, id, &body).await?
            }
        };

        if !result.is_success() {
            let fault = result.fault_message().to_string();
            self.ctx.reporter.error(&format!(
                "{} {} of object {} could not be pushed: {}",
                kind, id, object_type, fault
            ));
            return Ok(PushOutcome::Rejected { mutation, fault });
        }

        self.ctx.echo_fields(kind, result.body());
        self.ctx.reporter.success(&format!(
            "{} {} of object {} is pushed.",
            kind, id, object_type
        ));
        info!("{} {} of {} pushed ({:?})", kind, id, object_type, mutation);

        if kind == ResourceKind::AttributeGroup {
            AssignmentReconciler::new(self.ctx)
                .apply(object_type, id)
                .await?;
        }

        Ok(PushOutcome::Pushed(mutation))
    }

    fn bootstrap(&self, kind: ResourceKind, object_type: &str, id: &str) -> Result<PushOutcome> {
        let template = template_for(kind, id);
        let path = self.ctx.store.write_resource(kind, object_type, id, &template)?;

        info!("Wrote starting template for {} {} of {} to {}", kind, id, object_type, path.display());
        self.ctx
            .reporter
            .error(&bootstrap_message(kind, object_type, id, &path));

        Ok(PushOutcome::TemplateBootstrapped { path })
    }

    async fn fetch_remote(&self, kind: ResourceKind, object_type: &str, id: &str) -> Result<OcapiResponse> {
        match kind {
            ResourceKind::AttributeDefinition => {
                self.ctx.api.get_attribute_definition(object_type, id).await
            }
            ResourceKind::AttributeGroup => {
                self.ctx.api.get_attribute_group(object_type, id, false).await
            }
        }
    }

    async fn create(&self, kind: ResourceKind, object_type: &str, id: &str, body: &[u8]) -> Result<OcapiResponse> {
        match kind {
            ResourceKind::AttributeDefinition => {
                self.ctx.api.create_attribute_definition(object_type, id, body).await
            }
            ResourceKind::AttributeGroup => {
                self.ctx.api.create_attribute_group(object_type, id, body).await
            }
        }
    }

    async fn update(
        &self,
        kind: ResourceKind,
        object_type: &str,
        id: &str,
        resource_state: Option<&str>,
        body: &[u8],
    ) -> Result<OcapiResponse> {
        match kind {
            ResourceKind::AttributeDefinition => {
                self.ctx
                    .api
                    .update_attribute_definition(object_type, id, resource_state, body)
                    .await
            }
            ResourceKind::AttributeGroup => {
                self.ctx
                    .api
                    .update_attribute_group(object_type, id, resource_state, body)
                    .await
            }
        }
    }
}

/// Actionable message shown after writing a starting template
pub fn bootstrap_message(kind: ResourceKind, object_type: &str, id: &str, path: &Path) -> String {
    format!(
        "Starting JSON file for {label} {id} did not exist for object {object}.\n\n\
         Created a sample file to start with on the correct location: \n\
         {path}\n\n\
         NOTE: Run the command \"sfccdx {command} -o {object} {flag} {id}\" first if this {label} already exists.",
        label = kind.label(),
        id = id,
        object = object_type,
        path = path.display(),
        command = kind.get_command(),
        flag = kind.id_flag(),
    )
}
