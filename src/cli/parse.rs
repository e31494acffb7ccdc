//! CLI parse: clap types for draftdesk. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// draftdesk - structured-input document drafting for company secretaries
#[derive(Parser)]
#[command(name = "draftdesk")]
#[command(about = "Collect structured input and generate company-secretarial documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/ is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available tools
    Tools {
        /// Only tools in this category
        #[arg(long)]
        category: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a tool's steps and fields
    Show {
        /// Tool id (see `draftdesk tools`)
        tool: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Fill in a tool and generate its document
    Run {
        /// Tool id (see `draftdesk tools`)
        tool: String,
        /// Preset a field value; repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
        /// Skip the interactive wizard and submit the preset values
        #[arg(long)]
        yes: bool,
        /// Export the generated document as Markdown into this directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the assembled instruction without calling the endpoint
    Prompt {
        /// Tool id (see `draftdesk tools`)
        tool: String,
        /// Preset a field value; repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
}

impl Commands {
    /// Command name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Tools { .. } => "tools",
            Commands::Show { .. } => "show",
            Commands::Run { .. } => "run",
            Commands::Prompt { .. } => "prompt",
        }
    }
}
