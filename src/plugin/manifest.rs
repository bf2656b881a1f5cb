use std::fmt;

use crate::model::other_config::OtherConfig;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginId(pub String);

impl PluginId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Columns every FSM plugin record must set, in insert order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Handler,
    IfName,
    PktCaptFilter,
    Plugin,
    OtherConfig,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Handler,
        Field::IfName,
        Field::PktCaptFilter,
        Field::Plugin,
        Field::OtherConfig,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Handler => "handler",
            Field::IfName => "if_name",
            Field::PktCaptFilter => "pkt_capt_filter",
            Field::Plugin => "plugin",
            Field::OtherConfig => "other_config",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated contents of one `Flow_Service_Manager_Config` row.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRecord {
    pub handler: String,
    pub if_name: String,
    pub pkt_capt_filter: String,
    /// Path to the plugin shared object.
    pub plugin: String,
    pub other_config: OtherConfig,
}
