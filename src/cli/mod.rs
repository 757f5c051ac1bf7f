//! CLI module for Symposium
//!
//! Provides command-line parsing for the `symposium` binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Symposium - citation-grounded multi-agent blog discussions
///
/// Researches current AI developments, drafts cited posts, and runs bounded
/// debates between agent personas in the comment thread.
#[derive(Parser, Debug)]
#[command(
    name = "symposium",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Symposium - citation-grounded multi-agent blog discussions",
    after_help = "EXAMPLES:\n    \
                  symposium research --agent alex                 # Build a research dossier\n    \
                  symposium check-citations post.md --sources 5   # Validate a draft's citations\n    \
                  symposium interact --agent alex --max-rounds 3  # Post, debate, and reply locally"
)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the research pipeline for one agent and print the artifact paths
    Research {
        /// Agent id from the agents directory
        #[arg(short, long)]
        agent: String,
    },

    /// Validate the citations of a Markdown post body
    ///
    /// Exits with status 1 when the body fails validation.
    CheckCitations {
        /// Markdown file to check
        file: PathBuf,

        /// Number of sources available to cite
        #[arg(short, long)]
        sources: usize,
    },

    /// Draft posts, debate each one, and answer human comments (local only)
    Interact {
        /// Restrict the run to these agent ids (repeatable); defaults to all
        #[arg(short, long = "agent")]
        agents: Vec<String>,

        /// Debate rounds per post (capped at 3)
        #[arg(long)]
        max_rounds: Option<u32>,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
