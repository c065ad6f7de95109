//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relsync CLI - Reconcile content relationships in a SQLite database.
#[derive(Debug, Parser)]
#[command(name = "relsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RELSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database path
    #[arg(short, long, global = true, env = "RELSYNC_DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (delimited ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database schema
    Init(InitArgs),

    /// Manage item summaries
    Item(ItemArgs),

    /// Manage slots
    Slot(SlotArgs),

    /// Manage templates
    Template(TemplateArgs),

    /// List the items related to an item in a slot
    Extract(ExtractArgs),

    /// Reconcile the relationships of an item in a slot to a list of ids
    Build(BuildArgs),
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Also write the effective configuration to the config file
    #[arg(long)]
    pub save_config: bool,
}

/// Arguments for item management.
#[derive(Debug, Parser)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub action: ItemAction,
}

/// Item management actions.
#[derive(Debug, Subcommand)]
pub enum ItemAction {
    /// Create or replace an item summary
    Put {
        /// Content id
        id: u32,
        /// Content type id
        #[arg(short = 't', long = "type")]
        content_type: u64,
        /// Current revision
        #[arg(long)]
        current: u32,
        /// Revision checked out for editing
        #[arg(long)]
        edit: Option<u32>,
    },
}

/// Arguments for slot management.
#[derive(Debug, Parser)]
pub struct SlotArgs {
    #[command(subcommand)]
    pub action: SlotAction,
}

/// Slot management actions.
#[derive(Debug, Subcommand)]
pub enum SlotAction {
    /// Register a slot
    Add {
        /// Slot name
        name: String,
        /// Relationship kind of the slot (e.g. ActiveAssembly)
        #[arg(short, long)]
        relationship: Option<String>,
    },
}

/// Arguments for template management.
#[derive(Debug, Parser)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub action: TemplateAction,
}

/// Template management actions.
#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    /// Register a template
    Add {
        /// Template name
        name: String,
        /// Content type the template applies to
        #[arg(short = 't', long = "type")]
        content_type: Option<u64>,
    },
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Role the item plays in the relationships
    #[arg(short, long, value_enum)]
    pub role: RoleArg,

    /// Content id of the item
    #[arg(short, long)]
    pub item: String,

    /// Slot name
    #[arg(short, long)]
    pub slot: String,
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Role the item plays in the relationships
    #[arg(short, long, value_enum)]
    pub role: RoleArg,

    /// Content id of the item
    #[arg(short, long)]
    pub item: String,

    /// Slot name
    #[arg(short, long)]
    pub slot: String,

    /// Template for new relationships
    #[arg(short, long)]
    pub template: String,

    /// Related ids separated by ';' (omit to leave relationships unchanged)
    #[arg(long)]
    pub related: Option<String>,

    /// Compute the changes without writing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RoleArg {
    /// The item owns the relationships; related items are dependents
    Owner,
    /// The item is the dependent; related items are owners
    Dependent,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
