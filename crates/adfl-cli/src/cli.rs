//! CLI argument definitions using clap derive API

use adfl_core::EdgeListScope;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// adfl - table lineage from Data Factory / Synapse copy activities
#[derive(Parser, Debug)]
#[command(name = "adfl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: ./adfl.yml when present)
    #[arg(short, long, global = true, env = "ADFL_CONFIG")]
    pub config: Option<String>,

    /// Directory holding the exported factory resources
    #[arg(long, global = true, env = "ADFL_EXPORT_DIR")]
    pub export_dir: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract lineage from recent pipeline runs and write the output documents
    Extract(ExtractArgs),

    /// List pipelines and the copy activities found in their definitions
    Ls(LsArgs),
}

/// Arguments for the extract command
#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// Days of run history to search
    #[arg(long, env = "DAYS_SEARCH", allow_hyphen_values = true)]
    pub days: Option<i64>,

    /// Do not prefix table names with host and database
    #[arg(long)]
    pub no_fqn: bool,

    /// OpenLineage namespace
    #[arg(long, env = "OPENLINEAGE_NAMESPACE")]
    pub namespace: Option<String>,

    /// OpenLineage producer
    #[arg(long, env = "OPENLINEAGE_PRODUCER")]
    pub producer: Option<String>,

    /// Path of the OpenLineage event document
    #[arg(long, env = "OPENLINEAGE_OUTPUT_FILE_PATH")]
    pub openlineage_output: Option<String>,

    /// Path of the plain edge-list document
    #[arg(long, env = "LINEAGE_OUTPUT_FILE_PATH")]
    pub lineage_output: Option<String>,

    /// Which pipelines' edges go into the edge-list document
    #[arg(long, value_enum)]
    pub edge_list_scope: Option<ScopeArg>,

    /// Parse every reader query with this SQL dialect
    #[arg(long)]
    pub sql_dialect: Option<String>,

    /// Only process pipelines referenced by a started trigger
    #[arg(long)]
    pub only_triggered: bool,

    /// Add indirect upstream tables to each edge's parents
    #[arg(long)]
    pub transitive: bool,
}

/// Edge-list scope choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
    /// Last processed pipeline only
    Last,
    /// Every processed pipeline
    All,
}

impl From<ScopeArg> for EdgeListScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Last => EdgeListScope::Last,
            ScopeArg::All => EdgeListScope::All,
        }
    }
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Show only pipelines with at least one copy activity
    #[arg(long)]
    pub copy_only: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
