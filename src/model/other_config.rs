use super::literal::{self, Scalar};

/// Typed `other_config` map for a plugin: string keys to scalar values,
/// kept in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtherConfig {
    entries: Vec<(String, Scalar)>,
}

/// Why a configured `other_config` value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ShapeError(String);

impl OtherConfig {
    /// Parse a structured map literal such as `{'mqtt_topic': 'x'}`.
    pub fn parse(src: &str) -> Result<Self, ShapeError> {
        literal::parse_map(src)
            .map(|entries| Self { entries })
            .map_err(|err| ShapeError(err.to_string()))
    }

    /// Build from a configured value: either a literal string or an inline table.
    pub fn from_value(value: &toml::Value) -> Result<Self, ShapeError> {
        match value {
            toml::Value::String(src) => Self::parse(src),
            toml::Value::Table(table) => {
                let entries = table
                    .iter()
                    .map(|(key, value)| {
                        scalar_from_toml(key, value).map(|scalar| (key.clone(), scalar))
                    })
                    .collect::<Result<Vec<_>, ShapeError>>()?;
                Ok(Self { entries })
            }
            other => Err(ShapeError(format!(
                "expected a map literal, found {}",
                other.type_str()
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key/value pairs with every value rendered as text, as OVSDB string maps expect.
    pub fn string_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

fn scalar_from_toml(key: &str, value: &toml::Value) -> Result<Scalar, ShapeError> {
    match value {
        toml::Value::String(s) => Ok(Scalar::Str(s.clone())),
        toml::Value::Integer(i) => Ok(Scalar::Int(*i)),
        toml::Value::Float(f) => Ok(Scalar::Float(*f)),
        toml::Value::Boolean(b) => Ok(Scalar::Bool(*b)),
        other => Err(ShapeError(format!(
            "value of '{key}' must be a scalar, found {}",
            other.type_str()
        ))),
    }
}
