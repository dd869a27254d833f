use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use super::output::OutputFormat;
use crate::corpus::Lang;

/// Command-line arguments accepted by the `promptdeck` binary.
#[derive(Parser, Debug)]
#[command(
    name = "promptdeck",
    version,
    about = "Prompt template store with fuzzy title search"
)]
pub struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "PROMPTDECK_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub no_config: bool,
    #[arg(
        long = "corpus-url",
        value_name = "URL",
        help = "Fetch the builtin corpus from this URL (default: local corpus file)"
    )]
    pub corpus_url: Option<String>,
    #[arg(
        long,
        value_enum,
        help = "Active language; decides builtin corpus priority (default: en)"
    )]
    pub lang: Option<Lang>,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Output format for prompt listings (default: plain)"
    )]
    pub output: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List user prompts, newest first
    List {
        /// Append the builtin corpus after the user prompts
        #[arg(long)]
        builtin: bool,
    },
    /// Fuzzy-search prompt titles across both collections
    Search {
        query: String,
    },
    /// Add a user prompt and print its id
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Update the title or content of a prompt
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Remove a user prompt
    Remove {
        id: String,
    },
    /// Show one prompt in full
    Show {
        id: String,
    },
    /// Serve the chat log endpoint
    Serve {
        #[arg(long, value_name = "ADDR", help = "Address to bind (default: from configuration)")]
        listen: Option<SocketAddr>,
    },
}

/// Parse CLI arguments, exiting with usage output on error.
#[must_use]
pub fn parse_cli() -> CliArgs {
    CliArgs::parse()
}
