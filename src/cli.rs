use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("BACKPLANE_TOOLS_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("BACKPLANE_TOOLS_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("BACKPLANE_TOOLS_GIT_BRANCH").unwrap_or("unknown");

    // Leaked once at startup
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser)]
#[command(name = "backplane-tools")]
#[command(about = "Install and verify the command-line tools used for backplane work")]
#[command(version = get_version(), propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the latest release of one or more tools (all tools if none are named)
    Install {
        /// Tools to install (e.g., 'ocm')
        tools: Vec<String>,
        /// Directory tools are installed beneath (overrides the configured root_dir)
        #[arg(long)]
        root_dir: Option<PathBuf>,
    },

    /// Configure installed tools
    Configure {
        /// Tools to configure (all tools if none are named)
        tools: Vec<String>,
    },

    /// Remove installed tools
    Remove {
        /// Tools to remove (all tools if none are named)
        tools: Vec<String>,
    },

    /// List the tools backplane-tools can manage
    List,

    /// Manage backplane-tools' configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the current version
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a configuration setting
    Get {
        /// Key to get (if omitted, shows all settings)
        key: Option<String>,
    },
    /// Set a configuration setting
    Set {
        /// Key and value (e.g., 'root-dir=/opt/backplane' or 'root-dir /opt/backplane')
        #[arg(trailing_var_arg = true, required = true)]
        args: Vec<String>,
    },
    /// Reset a configuration setting to its default
    Unset {
        /// Key to unset (e.g., 'root-dir')
        key: String,
    },
    /// Show full configuration
    Show {
        /// Output format (json, yaml)
        #[arg(long, default_value = "json")]
        format: String,
    },
}
