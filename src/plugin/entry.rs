use crate::error::{ConfError, Result};
use crate::model::literal::float_repr;
use crate::model::other_config::OtherConfig;
use crate::ovsh::{Clause, Ovsh};
use crate::plugin::manifest::{Field, PluginId, PluginRecord};

/// OVSDB table holding FSM plugin rows.
pub const FSM_TABLE: &str = "Flow_Service_Manager_Config";

/// One validated FSM plugin together with the commands that add and remove its row.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginEntry {
    pub id: PluginId,
    pub record: PluginRecord,
    pub insert_cmd: Vec<String>,
    pub delete_cmd: Vec<String>,
}

impl PluginEntry {
    /// Validate `plugins[plugin_name]` and render its commands.
    ///
    /// `plugins` is the table of plugin records keyed by plugin name. Fields
    /// are checked in [`Field::ALL`] order and the first problem is returned.
    pub fn new(plugin_name: &str, plugins: &toml::Table, ovsh: &Ovsh) -> Result<Self> {
        let record = plugins
            .get(plugin_name)
            .ok_or_else(|| ConfError::InvalidRecord {
                plugin: plugin_name.to_string(),
                reason: "no such plugin".to_string(),
            })?;
        let record = record.as_table().ok_or_else(|| ConfError::InvalidRecord {
            plugin: plugin_name.to_string(),
            reason: format!("expected a table, found {}", record.type_str()),
        })?;

        let record = validate(plugin_name, record)?;
        tracing::debug!(plugin = plugin_name, handler = %record.handler, "validated fsm plugin");

        let mut entry = Self {
            id: PluginId::new(plugin_name),
            record,
            insert_cmd: Vec::new(),
            delete_cmd: Vec::new(),
        };
        entry.gen_insert_cmd(ovsh);
        entry.gen_delete_cmd(ovsh);
        Ok(entry)
    }

    pub fn handler(&self) -> &str {
        &self.record.handler
    }

    fn gen_insert_cmd(&mut self, ovsh: &Ovsh) {
        let record = &self.record;
        let clauses: Vec<Clause> = Field::ALL
            .iter()
            .map(|field| match field {
                Field::Handler => Clause::string(field.name(), record.handler.as_str()),
                Field::IfName => Clause::string(field.name(), record.if_name.as_str()),
                Field::PktCaptFilter => {
                    Clause::string(field.name(), record.pkt_capt_filter.as_str())
                }
                Field::Plugin => Clause::string(field.name(), record.plugin.as_str()),
                Field::OtherConfig => {
                    Clause::map(field.name(), record.other_config.string_pairs())
                }
            })
            .collect();
        self.insert_cmd.push(ovsh.insert(FSM_TABLE, &clauses));
    }

    fn gen_delete_cmd(&mut self, ovsh: &Ovsh) {
        let cmd = ovsh.delete_where(FSM_TABLE, Field::Handler.name(), &self.record.handler);
        self.delete_cmd.push(cmd);
    }
}

fn validate(plugin: &str, record: &toml::Table) -> Result<PluginRecord> {
    Ok(PluginRecord {
        handler: scalar_text(plugin, Field::Handler, record)?,
        if_name: scalar_text(plugin, Field::IfName, record)?,
        pkt_capt_filter: scalar_text(plugin, Field::PktCaptFilter, record)?,
        plugin: scalar_text(plugin, Field::Plugin, record)?,
        other_config: {
            let value = required(plugin, Field::OtherConfig, record)?;
            OtherConfig::from_value(value)
                .map_err(|err| ConfError::malformed(plugin, Field::OtherConfig.name(), err))?
        },
    })
}

fn required<'a>(plugin: &str, field: Field, record: &'a toml::Table) -> Result<&'a toml::Value> {
    let value = record
        .get(field.name())
        .ok_or_else(|| ConfError::MissingField {
            plugin: plugin.to_string(),
            field: field.name(),
        })?;

    if is_falsy(value) {
        return Err(ConfError::EmptyValue {
            plugin: plugin.to_string(),
            field: field.name(),
        });
    }
    Ok(value)
}

fn scalar_text(plugin: &str, field: Field, record: &toml::Table) -> Result<String> {
    match required(plugin, field, record)? {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(float_repr(*f)),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(ConfError::malformed(
            plugin,
            field.name(),
            format!("expected a scalar, found {}", other.type_str()),
        )),
    }
}

fn is_falsy(value: &toml::Value) -> bool {
    match value {
        toml::Value::String(s) => s.is_empty(),
        toml::Value::Integer(i) => *i == 0,
        toml::Value::Float(f) => *f == 0.0,
        toml::Value::Boolean(b) => !b,
        toml::Value::Array(a) => a.is_empty(),
        toml::Value::Table(t) => t.is_empty(),
        toml::Value::Datetime(_) => false,
    }
}
