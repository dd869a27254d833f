use anyhow::Result;
use clap::ValueEnum;

use crate::prompt::Prompt;

/// How prompt listings are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Render prompts one per line: id, origin, title.
pub fn print_plain(prompts: &[Prompt]) {
    for prompt in prompts {
        let origin = if prompt.is_user { "user" } else { "builtin" };
        println!("{}\t{}\t{}", prompt.id, origin, prompt.title);
    }
}

/// Render prompts as a JSON array.
pub fn print_json(prompts: &[Prompt]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(prompts)?);
    Ok(())
}

/// Render a single prompt in full.
pub fn print_prompt(format: OutputFormat, prompt: &Prompt) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            println!("id: {}", prompt.id);
            println!("title: {}", prompt.title);
            println!();
            println!("{}", prompt.content);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(prompt)?),
    }
    Ok(())
}

/// Render a prompt listing in the chosen format.
pub fn print_prompts(format: OutputFormat, prompts: &[Prompt]) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            print_plain(prompts);
            Ok(())
        }
        OutputFormat::Json => print_json(prompts),
    }
}
