use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser, Clone)]
#[command(name = "fsm-config")]
#[command(about = "Render ovsh commands for FSM plugin configurations")]
pub struct Cli {
    /// Plugin configuration file (TOML with an [fsm_plugins] section).
    pub config: PathBuf,

    /// Which commands to print.
    #[arg(value_enum, default_value_t = Action::Insert)]
    pub action: Action,

    /// Extra settings file layered over the defaults and user settings.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Override the ovsh tool path from settings.
    #[arg(long)]
    pub tool: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Print one insert command per plugin.
    Insert,
    /// Print one delete command per plugin.
    Delete,
    /// Validate only.
    Check,
}
