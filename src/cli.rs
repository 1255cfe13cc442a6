use crate::api::OcapiClient;
use crate::config::{AppConfig, ConfigOverrides};
use crate::logic::{MetadataSync, SyncContext};
use crate::model::{
    AssignmentDeleteParams, AttributeDeleteParams, AttributeGetParams, AttributePushParams,
    GroupDeleteParams, GroupGetParams, GroupPushParams,
};
use crate::store::LocalStore;
use crate::ui::{BookendPhase, Reporter};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Parser)]
#[command(
    name = "sfccdx",
    version,
    about = "Keep system object attribute definitions and attribute groups under version control"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Connection options shared by every command
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Your instance hostname
    #[arg(long)]
    pub hostname: Option<String>,

    /// The OCAPI client id
    #[arg(long = "clientid")]
    pub client_id: Option<String>,

    /// The OCAPI client secret
    #[arg(long = "clientsecret")]
    pub client_secret: Option<String>,

    /// Print extra debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            hostname: self.hostname.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the resolved configuration (command line, dw.json, environment)
    #[command(name = "environment")]
    Environment(ConnectionArgs),

    /// Verify the environment by requesting an access token
    #[command(name = "verify")]
    Verify(ConnectionArgs),

    /// Fetch standard or custom attribute definitions
    #[command(name = "attribute:get")]
    AttributeGet(AttributeGetArgs),

    /// Push a custom attribute definition to an object
    #[command(name = "attribute:push")]
    AttributePush(AttributePushArgs),

    /// Delete a custom attribute definition
    #[command(name = "attribute:delete")]
    AttributeDelete(AttributeDeleteArgs),

    /// Fetch attribute groups and their assignments
    #[command(name = "attributegroup:get")]
    GroupGet(GroupGetArgs),

    /// Push an attribute group and replay its assignments
    #[command(name = "attributegroup:push")]
    GroupPush(GroupPushArgs),

    /// Delete an attribute group
    #[command(name = "attributegroup:delete")]
    GroupDelete(GroupDeleteArgs),

    /// Delete an attribute assignment from an attribute group
    #[command(name = "attributegroup:assignment:delete")]
    AssignmentDelete(AssignmentDeleteArgs),
}

impl Command {
    pub fn connection(&self) -> &ConnectionArgs {
        match self {
            Command::Environment(args) | Command::Verify(args) => args,
            Command::AttributeGet(args) => &args.connection,
            Command::AttributePush(args) => &args.connection,
            Command::AttributeDelete(args) => &args.connection,
            Command::GroupGet(args) => &args.connection,
            Command::GroupPush(args) => &args.connection,
            Command::GroupDelete(args) => &args.connection,
            Command::AssignmentDelete(args) => &args.connection,
        }
    }
}

#[derive(Debug, Args)]
pub struct AttributeGetArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object to get attributes from (e.g. Profile, Product); all objects when omitted
    #[arg(short, long)]
    pub object: Option<String>,

    /// The attribute id to fetch; all attributes when omitted
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Do not save the attribute definition to the data folder
    #[arg(long)]
    pub do_not_save: bool,

    /// Include system attributes when fetching all attributes of an object
    #[arg(long)]
    pub include_system_attributes: bool,
}

#[derive(Debug, Args)]
pub struct AttributePushArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object to push the attribute to; every local object when omitted
    #[arg(short, long)]
    pub object: Option<String>,

    /// The attribute id to push; every local attribute file when omitted
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Force re-creation (removes the attribute from all attribute groups and deletes its values on records)
    #[arg(short, long)]
    pub force_recreate: bool,
}

#[derive(Debug, Args)]
pub struct AttributeDeleteArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object to delete the attribute from
    #[arg(short, long)]
    pub object: Option<String>,

    /// The attribute id to delete; every non-system attribute of the object when omitted
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Keep the local file after a successful delete
    #[arg(short, long)]
    pub preserve_file: bool,

    /// Include system attributes when deleting all attributes of an object
    #[arg(long)]
    pub include_system_attributes: bool,
}

#[derive(Debug, Args)]
pub struct GroupGetArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object to get attribute groups from; all objects when omitted
    #[arg(short, long)]
    pub object: Option<String>,

    /// The attribute group id to fetch; all groups when omitted
    #[arg(short = 'g', long)]
    pub attribute_group: Option<String>,

    /// Do not save the attribute group to the data folder
    #[arg(long)]
    pub do_not_save: bool,
}

#[derive(Debug, Args)]
pub struct GroupPushArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object to push the attribute group to; every local object when omitted
    #[arg(short, long)]
    pub object: Option<String>,

    /// The attribute group id to push; every local group file when omitted
    #[arg(short = 'g', long)]
    pub attribute_group: Option<String>,

    /// Force re-creation (removes every attribute assignment of the group)
    #[arg(short, long)]
    pub force_recreate: bool,
}

#[derive(Debug, Args)]
pub struct GroupDeleteArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object to delete the attribute group from
    #[arg(short, long)]
    pub object: Option<String>,

    /// The attribute group id to delete; every group of the object when omitted
    #[arg(short = 'g', long)]
    pub attribute_group: Option<String>,

    /// Keep the local files after a successful delete
    #[arg(short, long)]
    pub preserve_file: bool,
}

#[derive(Debug, Args)]
pub struct AssignmentDeleteArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// The object of the attribute group
    #[arg(short, long)]
    pub object: String,

    /// The attribute group to delete the assignment from
    #[arg(short = 'g', long)]
    pub attribute_group: String,

    /// The attribute assignment to delete
    #[arg(short, long)]
    pub attribute: String,

    /// Keep the assignment in the local assignments file
    #[arg(short, long)]
    pub preserve_file: bool,
}

impl From<&AttributeGetArgs> for AttributeGetParams {
    fn from(args: &AttributeGetArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            attribute_id: args.attribute.clone(),
            do_not_save: args.do_not_save,
            include_system_attributes: args.include_system_attributes,
        }
    }
}

impl From<&AttributePushArgs> for AttributePushParams {
    fn from(args: &AttributePushArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            attribute_id: args.attribute.clone(),
            force_recreate: args.force_recreate,
        }
    }
}

impl From<&AttributeDeleteArgs> for AttributeDeleteParams {
    fn from(args: &AttributeDeleteArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            attribute_id: args.attribute.clone(),
            preserve_file: args.preserve_file,
            include_system_attributes: args.include_system_attributes,
        }
    }
}

impl From<&GroupGetArgs> for GroupGetParams {
    fn from(args: &GroupGetArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            group_id: args.attribute_group.clone(),
            do_not_save: args.do_not_save,
        }
    }
}

impl From<&GroupPushArgs> for GroupPushParams {
    fn from(args: &GroupPushArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            group_id: args.attribute_group.clone(),
            force_recreate: args.force_recreate,
        }
    }
}

impl From<&GroupDeleteArgs> for GroupDeleteParams {
    fn from(args: &GroupDeleteArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            group_id: args.attribute_group.clone(),
            preserve_file: args.preserve_file,
        }
    }
}

impl From<&AssignmentDeleteArgs> for AssignmentDeleteParams {
    fn from(args: &AssignmentDeleteArgs) -> Self {
        Self {
            object_type: args.object.clone(),
            group_id: args.attribute_group.clone(),
            attribute_id: args.attribute.clone(),
            preserve_file: args.preserve_file,
        }
    }
}

/// Run a parsed command against the project in `project_root`
pub async fn run<R: Reporter + ?Sized>(cli: &Cli, project_root: &Path, reporter: &R) -> Result<()> {
    let connection = cli.command.connection();
    let config = AppConfig::load(project_root, &connection.overrides())?;

    match &cli.command {
        Command::Environment(_) => {
            show_environment(&config, reporter);
            Ok(())
        }
        Command::Verify(_) => verify(&config, reporter).await,
        command => {
            let client = OcapiClient::new(&config)?;
            let store = LocalStore::for_project(project_root);
            let ctx = SyncContext::new(&client, &store, reporter).with_debug(connection.debug);
            sync(command, MetadataSync::new(ctx)).await
        }
    }
}

async fn sync<R: Reporter + ?Sized>(command: &Command, operations: MetadataSync<'_, OcapiClient, R>) -> Result<()> {
    match command {
        Command::AttributeGet(args) => operations.attribute_get(&args.into()).await,
        Command::AttributePush(args) => operations.attribute_push(&args.into()).await.map(drop),
        Command::AttributeDelete(args) => operations.attribute_delete(&args.into()).await,
        Command::GroupGet(args) => operations.group_get(&args.into()).await,
        Command::GroupPush(args) => operations.group_push(&args.into()).await.map(drop),
        Command::GroupDelete(args) => operations.group_delete(&args.into()).await,
        Command::AssignmentDelete(args) => operations.group_assignment_delete(&args.into()).await.map(drop),
        Command::Environment(_) | Command::Verify(_) => Ok(()),
    }
}

fn show_environment<R: Reporter + ?Sized>(config: &AppConfig, reporter: &R) {
    const COMMAND: &str = "environment";
    reporter.bookend(COMMAND, BookendPhase::Start, None);

    let checks = config.validate();
    let rows: Vec<Vec<String>> = checks
        .iter()
        .map(|check| {
            vec![
                check.name.to_string(),
                check.is_valid().to_string(),
                check.value.clone(),
            ]
        })
        .collect();
    reporter.results("Name | Is Valid | Configured Property Value", &rows);

    let failures: Vec<Vec<String>> = checks
        .iter()
        .filter(|check| !check.is_valid())
        .map(|check| vec![check.name.to_string(), check.errors.join("\n")])
        .collect();
    if !failures.is_empty() {
        reporter.results("Env. Property Name | Validation Error(s) for Configured Values", &failures);
    }

    reporter.bookend(COMMAND, BookendPhase::End, None);
}

async fn verify<R: Reporter + ?Sized>(config: &AppConfig, reporter: &R) -> Result<()> {
    const COMMAND: &str = "verify";
    reporter.bookend(
        COMMAND,
        BookendPhase::Start,
        Some("Attempting to verify the B2C environment."),
    );

    let client = OcapiClient::new(config)?;
    let token = client.access_token().await?;
    reporter.results("OCAPI Token", &[vec![token.to_string()]]);

    reporter.bookend(COMMAND, BookendPhase::End, None);
    Ok(())
}
