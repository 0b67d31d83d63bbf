//! CLI argument definitions.
//!
//! There are no subcommands: running the binary provisions the machine.
//! Every tunable has an environment-variable fallback.

use clap::Parser;
use std::path::PathBuf;

/// Basecamp - Idempotent workstation setup.
#[derive(Debug, Parser)]
#[command(name = "basecamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the `configs/` tree (defaults to the executable's directory)
    #[arg(long, env = "BASECAMP_SOURCE_ROOT", value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// URL probed before provisioning to confirm internet access
    #[arg(
        long,
        env = "BASECAMP_CONNECTIVITY_URL",
        default_value = "https://www.github.com",
        value_name = "URL"
    )]
    pub connectivity_url: String,

    /// Seconds the connectivity probe may take
    #[arg(
        long,
        env = "BASECAMP_CONNECTIVITY_TIMEOUT",
        default_value_t = 10,
        value_name = "SECS"
    )]
    pub connectivity_timeout: u64,

    /// Repository cloned as the Neovim starter configuration
    #[arg(
        long,
        env = "BASECAMP_STARTER_REPO",
        default_value = "https://github.com/LazyVim/starter",
        value_name = "URL"
    )]
    pub starter_repo: String,

    /// Never prompt; answers come from BASECAMP_PROMPT_* variables
    #[arg(long)]
    pub non_interactive: bool,

    /// Print the run report as JSON instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Also show the command line of every install and change
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
