pub mod config;
pub mod literal;
pub mod other_config;
