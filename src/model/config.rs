use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ovsh::Ovsh;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub ovsh: OvshSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct OvshSettings {
    pub tool_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

const DEFAULTS: &str = include_str!("../../config/default.toml");

impl Settings {
    /// Load settings with layering: defaults → user config → `explicit` file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_layers(user_config_path().as_deref(), explicit)
    }

    fn load_layers(user: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut merged: toml::Table = toml::from_str(DEFAULTS).context("parse built-in defaults")?;

        if let Some(path) = user.filter(|path| path.exists()) {
            merge(&mut merged, read_table(path)?);
        }

        if let Some(path) = explicit {
            merge(&mut merged, read_table(path)?);
        }

        let settings: Settings = toml::Value::Table(merged)
            .try_into()
            .context("invalid settings")?;
        Ok(settings)
    }

    pub fn ovsh(&self) -> Ovsh {
        Ovsh::new(&self.ovsh.tool_path)
    }
}

/// Read a plugin configuration file, keeping plugins in file order.
pub fn load_plugin_config(path: &Path) -> Result<toml::Table> {
    read_table(path)
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

/// Overlay `upper` onto `base`, descending into tables present in both.
fn merge(base: &mut toml::Table, upper: toml::Table) {
    for (key, value) in upper {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(upper_table)) => {
                merge(base_table, upper_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "fsm-config")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
