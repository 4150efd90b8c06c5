use std::borrow::Cow;
use std::str::FromStr;

use super::ConfigError;

/// A leaf of the flattened configuration tree.
///
/// Values from environment variables always arrive as `String`; typed access
/// parses them on demand.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<ConfigValue>),
}

impl From<&serde_yaml::Value> for ConfigValue {
    fn from(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value as Yaml;

        match value {
            Yaml::Null => ConfigValue::Null,
            Yaml::Bool(b) => ConfigValue::Bool(*b),
            Yaml::Number(n) => n
                .as_i64()
                .map(ConfigValue::Integer)
                .or_else(|| n.as_f64().map(ConfigValue::Float))
                .unwrap_or_else(|| ConfigValue::String(n.to_string())),
            Yaml::String(s) => ConfigValue::String(s.clone()),
            Yaml::Sequence(items) => ConfigValue::List(items.iter().map(Into::into).collect()),
            Yaml::Mapping(_) => ConfigValue::Null,
            Yaml::Tagged(tagged) => (&tagged.value).into(),
        }
    }
}

impl ConfigValue {
    /// Text form of a scalar; `None` for null and lists.
    fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            ConfigValue::String(s) => Some(Cow::Borrowed(s.trim())),
            ConfigValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            ConfigValue::Float(f) => Some(Cow::Owned(f.to_string())),
            ConfigValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            ConfigValue::Null | ConfigValue::List(_) => None,
        }
    }
}

/// Conversion from a configuration value into a concrete type.
pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

fn wrong_type(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

fn parse_scalar<T: FromStr>(
    value: &ConfigValue,
    key: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .scalar_text()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| wrong_type(key, expected))
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(s) => Ok(s.clone()),
            other => other
                .scalar_text()
                .map(Cow::into_owned)
                .ok_or_else(|| wrong_type(key, "String")),
        }
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let text = value.scalar_text().map(|t| t.to_ascii_lowercase());
        match text.as_deref() {
            Some("true" | "yes" | "on" | "1") => Ok(true),
            Some("false" | "no" | "off" | "0") => Ok(false),
            _ => Err(wrong_type(key, "bool")),
        }
    }
}

macro_rules! parsed_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromConfigValue for $ty {
                fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                    parse_scalar(value, key, stringify!($ty))
                }
            }
        )+
    };
}

parsed_scalar!(i32, i64, u16, u32, u64, usize, f64);

impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Null => Ok(None),
            other => T::from_config_value(other, key).map(Some),
        }
    }
}

/// Lists come from YAML sequences, from comma-separated text (environment
/// variables), or from a single scalar.
impl<T: FromConfigValue> FromConfigValue for Vec<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let items: Vec<ConfigValue> = match value {
            ConfigValue::List(items) => items.clone(),
            ConfigValue::String(s) if s.contains(',') => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| ConfigValue::String(part.to_string()))
                .collect(),
            ConfigValue::Null => Vec::new(),
            other => vec![other.clone()],
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_config_value(item, &format!("{key}.{i}")))
            .collect()
    }
}
