use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use promptdeck::chatlog::{self, ChatLogState};
use promptdeck::cli::{Command, parse_cli, print_prompt, print_prompts};
use promptdeck::{PromptWorkflow, settings};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_cli();
    let settings = settings::load(&cli)?;

    if let Command::Serve { listen } = &cli.command {
        let addr = (*listen).unwrap_or(settings.listen);
        let state = ChatLogState {
            notion: settings.notion.clone(),
        };
        return tokio::runtime::Runtime::new()?.block_on(chatlog::serve(addr, state));
    }

    let mut workflow = PromptWorkflow::from_settings(&settings)?;

    match cli.command {
        Command::List { builtin } => print_prompts(cli.output, &workflow.list(builtin))?,
        Command::Search { query } => print_prompts(cli.output, &workflow.search(&query))?,
        Command::Add { title, content } => {
            let id = workflow.add(title, content);
            println!("{id}");
        }
        Command::Edit { id, title, content } => {
            let updated = workflow.edit(&id, title, content)?;
            print_prompt(cli.output, &updated)?;
        }
        Command::Remove { id } => workflow.remove(&id)?,
        Command::Show { id } => print_prompt(cli.output, &workflow.show(&id)?)?,
        Command::Serve { .. } => unreachable!("handled above"),
    }

    Ok(())
}
