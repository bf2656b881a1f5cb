//! # fsm-config
//!
//! Builds OVSDB row commands for Flow Service Manager (FSM) plugins from a
//! declarative test configuration.
//!
//! A configuration lists plugins under `[fsm_plugins]`:
//!
//! ```toml
//! [fsm_plugins.p1]
//! handler = "h1"
//! if_name = "eth0"
//! pkt_capt_filter = "tcp"
//! plugin = "/usr/lib/p1.so"
//! other_config = "{'mqtt_topic': 'x'}"
//! ```
//!
//! [`ConfigEntry`] validates every plugin and renders, per plugin, one `ovsh`
//! insert command for `Flow_Service_Manager_Config` and one delete command
//! keyed on `handler`. Nothing is executed here.

pub mod error;
pub mod model;
pub mod ovsh;
pub mod plugin;

pub use error::{ConfError, Result};
pub use model::other_config::OtherConfig;
pub use ovsh::Ovsh;
pub use plugin::{ConfigEntry, PluginEntry};
