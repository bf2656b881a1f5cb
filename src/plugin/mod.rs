pub mod entry;
pub mod manager;
pub mod manifest;

pub use entry::{FSM_TABLE, PluginEntry};
pub use manager::{ConfigEntry, FSM_SECTION};
pub use manifest::{Field, PluginId, PluginRecord};
