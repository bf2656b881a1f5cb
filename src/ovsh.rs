//! Row commands for the `ovsh` OVSDB shell tool.
//!
//! Commands are only rendered here; running them is left to the caller.

/// Default location of the `ovsh` binary on a device.
pub const DEFAULT_OVSH_PATH: &str = "/usr/plume/tools/ovsh";

/// One `column:=value` assignment in an insert command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Rendered as `column:="value"`.
    Str { column: String, value: String },
    /// Rendered as `column:=["map",[["k","v"],...]]`.
    Map {
        column: String,
        pairs: Vec<(String, String)>,
    },
}

impl Clause {
    pub fn string(column: impl Into<String>, value: impl Into<String>) -> Self {
        Clause::Str {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn map(column: impl Into<String>, pairs: Vec<(String, String)>) -> Self {
        Clause::Map {
            column: column.into(),
            pairs,
        }
    }

    fn render(&self) -> String {
        match self {
            Clause::Str { column, value } => format!("{column}:=\"{value}\""),
            Clause::Map { column, pairs } => format!("{column}:={}", map_literal(pairs)),
        }
    }
}

/// OVSDB JSON notation for a map column, e.g. `["map",[["mqtt_topic","x"]]]`.
pub fn map_literal(pairs: &[(String, String)]) -> String {
    let pairs: Vec<[&str; 2]> = pairs.iter().map(|(k, v)| [k.as_str(), v.as_str()]).collect();
    serde_json::json!(["map", pairs]).to_string()
}

/// Formats insert/delete commands for a given `ovsh` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ovsh {
    path: String,
}

impl Default for Ovsh {
    fn default() -> Self {
        Self::new(DEFAULT_OVSH_PATH)
    }
}

impl Ovsh {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `<ovsh> i <table> col:="v" ...`
    pub fn insert(&self, table: &str, clauses: &[Clause]) -> String {
        let mut cmd = format!("{} i {table}", self.path);
        for clause in clauses {
            cmd.push(' ');
            cmd.push_str(&clause.render());
        }
        cmd
    }

    /// `<ovsh> d <table> -w column==value`
    pub fn delete_where(&self, table: &str, column: &str, value: &str) -> String {
        format!("{} d {table} -w {column}=={value}", self.path)
    }
}
