mod app;
mod methods;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use switchyard_commands::DispatchOutcome;
use switchyard_config::{config_dir, config_file_path, load_and_prepare};
use switchyard_core::DispatchError;
use switchyard_logging::init_logger;

use app::{App, Caller, MessageResult};
use terminal_output::{
    note_error, note_info, note_success, note_warn, render_events, render_pattern_events,
    render_table,
};

#[derive(Parser)]
#[command(name = "switchyard")]
#[command(about = "Switchyard: subcommand dispatch for chat commands")]
#[command(version)]
struct Cli {
    /// Config file (.yaml, .yml, .toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// User id the invocation comes from
    #[arg(long, global = true, default_value = "cli-user")]
    user: String,

    /// Guild id; omit to invoke from a direct message
    #[arg(long, global = true)]
    guild: Option<String>,

    /// User ids allowed through the global `owners` precondition
    #[arg(long = "owner", global = true, default_value = "cli-user")]
    owners: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a prefixed chat message, e.g. `"!config roles add mod"`
    Message {
        content: String,
    },
    /// Dispatch a structured interaction
    Interact {
        #[arg(long)]
        command: String,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        subcommand: Option<String>,
    },
    /// Run pattern commands against free text
    Pattern {
        content: String,
    },
    /// List configured commands and their subcommands
    Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    let config = load_and_prepare(&path).await?;
    let settings = config.settings();
    init_logger(
        settings.log_dir.as_deref().map(Path::new),
        settings.log_level.as_deref().unwrap_or("info"),
    );
    debug!(path = %path.display(), "Using config");

    let app = App::build(&config, cli.owners.clone()).await?;
    let caller = Caller {
        user: cli.user.clone(),
        channel: "cli".to_string(),
        guild: cli.guild.clone(),
    };

    match cli.command {
        Commands::Message { content } => match app.handle_message(&content, &caller).await {
            MessageResult::NotACommand => {
                note_info(&format!("Not a command: messages must start with '{}'", app.prefix()));
            }
            MessageResult::UnknownCommand(name) => note_error(&format!("Unknown command '{name}'")),
            MessageResult::Dispatched(result) => report(&app, result).await,
        },
        Commands::Interact {
            command,
            group,
            subcommand,
        } => match app.handle_interaction(&command, group, subcommand, &caller).await {
            Some(result) => report(&app, result).await,
            None => note_error(&format!("Unknown command '{command}'")),
        },
        Commands::Pattern { content } => match app.handle_pattern(&content, &caller).await {
            Some(outcome) => {
                print!("{}", render_pattern_events(&app.take_pattern_events().await));
                note_info(&format!("Pattern outcome: {outcome:?}"));
            }
            None => note_info("No pattern command matched"),
        },
        Commands::Commands => {
            let mut rows = Vec::new();
            for (name, command) in app.commands() {
                let mapping = command.mapping().await;
                for entry in mapping.entries() {
                    rows.push(vec![name.clone(), String::new(), entry.name.clone(), entry.is_default.to_string()]);
                }
                for group in mapping.groups() {
                    for entry in &group.entries {
                        rows.push(vec![
                            name.clone(),
                            group.name.clone(),
                            entry.name.clone(),
                            entry.is_default.to_string(),
                        ]);
                    }
                }
            }
            print!("{}", render_table(&["COMMAND", "GROUP", "SUBCOMMAND", "DEFAULT"], &rows));
        }
    }

    Ok(())
}

async fn report(app: &App, result: Result<DispatchOutcome, DispatchError>) {
    let events = app.take_events().await;
    if !events.is_empty() {
        print!("{}", render_events(&events));
    }
    match result {
        Ok(DispatchOutcome::Success) => note_success("Subcommand completed"),
        Ok(outcome) => note_warn(&format!("Subcommand ended with {outcome:?}")),
        Err(e) if e.is_misconfiguration() => note_error(&format!("Misconfigured: {e}")),
        Err(e) => note_warn(&e.to_string()),
    }
}
