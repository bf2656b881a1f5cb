use crate::error::{ConfError, Result};
use crate::ovsh::Ovsh;
use crate::plugin::entry::PluginEntry;

/// Top-level section listing FSM plugins.
pub const FSM_SECTION: &str = "fsm_plugins";

/// Every plugin declared under `[fsm_plugins]`, validated and in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigEntry {
    nodes: Vec<PluginEntry>,
}

impl ConfigEntry {
    /// Build one [`PluginEntry`] per plugin in the section.
    ///
    /// Fails on the first invalid plugin; no nodes are returned in that case.
    pub fn new(config: &toml::Table, ovsh: &Ovsh) -> Result<Self> {
        let section = config
            .get(FSM_SECTION)
            .ok_or_else(|| ConfError::MissingSection(FSM_SECTION.to_string()))?;
        let plugins = section.as_table().ok_or_else(|| ConfError::InvalidSection {
            section: FSM_SECTION.to_string(),
            found: section.type_str(),
        })?;

        let nodes = plugins
            .keys()
            .map(|name| PluginEntry::new(name, plugins, ovsh))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(plugins = nodes.len(), "fsm plugin configuration built");
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[PluginEntry] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PluginEntry> {
        self.nodes.iter().find(|node| node.id.as_str() == name)
    }

    /// Insert commands of all nodes, in node order.
    pub fn insert_commands(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .flat_map(|node| node.insert_cmd.iter().map(String::as_str))
    }

    /// Delete commands of all nodes, in node order.
    pub fn delete_commands(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .flat_map(|node| node.delete_cmd.iter().map(String::as_str))
    }
}
