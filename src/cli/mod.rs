//! Command-line surface of the `promptdeck` binary.

mod args;
mod output;

pub use args::{CliArgs, Command, parse_cli};
pub use output::{OutputFormat, print_prompt, print_prompts};
