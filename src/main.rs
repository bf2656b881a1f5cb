mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Action, Cli};
use fsm_config::ConfigEntry;
use fsm_config::model::config::{Settings, load_plugin_config};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli.settings.as_deref())?;
    init_tracing(&settings.log.filter);

    let ovsh = match cli.tool.as_deref() {
        Some(path) => fsm_config::Ovsh::new(path),
        None => settings.ovsh(),
    };
    tracing::debug!(tool = ovsh.path(), config = %cli.config.display(), "loading plugin configuration");

    let config = load_plugin_config(&cli.config)?;
    let entry = ConfigEntry::new(&config, &ovsh)
        .with_context(|| format!("invalid plugin configuration {}", cli.config.display()))?;

    match cli.action {
        Action::Insert => entry.insert_commands().for_each(|cmd| println!("{cmd}")),
        Action::Delete => entry.delete_commands().for_each(|cmd| println!("{cmd}")),
        Action::Check => println!("fsm plugins: {} valid", entry.len()),
    }

    Ok(())
}

// Reported once on stderr; not routed through tracing, which may not be installed yet.
fn failure_message(err: &anyhow::Error) -> String {
    format!("fsm-config error: {err:#}")
}

// Logs go to stderr; stdout carries only generated commands.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
