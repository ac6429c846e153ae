//! CLI commands and argument parsing

use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List cloud API resources page by page
#[derive(Parser, Debug)]
#[command(name = "api-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (JSON or YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the API (overrides the config file)
    #[arg(long, global = true, env = "API_PAGER_URL")]
    pub api_url: Option<String>,

    /// Bearer token for authenticated requests
    #[arg(long, global = true, env = "API_PAGER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List apps (page-number pagination)
    Apps {
        /// Items requested per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop after this many apps have been loaded
        #[arg(long)]
        max: Option<usize>,
    },

    /// List GitHub repositories linked to a user (token pagination)
    Repos {
        /// User ID
        #[arg(long)]
        user_id: u64,

        /// Stop after this many repositories have been loaded
        #[arg(long)]
        max: Option<usize>,
    },

    /// List branches of a linked GitHub repository (token pagination)
    Branches {
        /// User ID
        #[arg(long)]
        user_id: u64,

        /// Repository ID
        #[arg(long)]
        repo_id: u64,
    },

    /// List a user's SSH keys
    SshKeys {
        /// User ID
        #[arg(long)]
        user_id: u64,
    },
}
