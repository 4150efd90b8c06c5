//! Layered application configuration.
//!
//! Later layers override earlier ones:
//!
//! 1. `application.yaml`
//! 2. `application-{profile}.yaml`
//! 3. `.env`, then `.env.{profile}` (loaded into the process environment,
//!    never overwriting variables that are already set)
//! 4. environment variables, mapped by lowercasing and turning `_` into `.`
//!    (`OPENAPI_TITLE` sets `openapi.title`)
//!
//! The profile comes from `APIDOC_PROFILE` when set, else from the caller.

mod source;
pub mod value;

use std::fmt;
use std::path::Path;

use source::Values;
pub use value::{ConfigValue, FromConfigValue};

pub const PROFILE_ENV: &str = "APIDOC_PROFILE";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(String),
    TypeMismatch { key: String, expected: &'static str },
    /// A configuration file could not be read or is not valid YAML.
    Load(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Missing configuration key '{key}'"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Configuration key '{key}' is not a valid {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Cannot load configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Flattened configuration: dot-separated keys to [`ConfigValue`]s.
#[derive(Debug, Clone)]
pub struct AppConfig {
    values: Values,
    profile: String,
}

impl AppConfig {
    /// Load every layer from the working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load every layer, reading files from `dir`.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());
        let mut values = Values::new();

        source::merge_file(&dir.join("application.yaml"), &mut values)?;
        source::merge_file(&dir.join(format!("application-{profile}.yaml")), &mut values)?;

        for env_file in [".env".to_string(), format!(".env.{profile}")] {
            if let Err(e) = dotenvy::from_path(dir.join(&env_file)) {
                if !e.not_found() {
                    return Err(ConfigError::Load(format!("{env_file}: {e}")));
                }
            }
        }

        values.extend(std::env::vars().map(|(name, value)| {
            (
                name.to_lowercase().replace('_', "."),
                ConfigValue::String(value),
            )
        }));

        tracing::debug!(%profile, keys = values.len(), "Configuration loaded");
        Ok(Self { values, profile })
    }

    /// Configuration from a YAML document only, without files or environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = Values::new();
        source::merge_str(yaml, &mut values)?;
        Ok(Self {
            values,
            profile: profile.to_string(),
        })
    }

    pub fn empty() -> Self {
        Self {
            values: Values::new(),
            profile: "test".to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Typed lookup. Fails when the key is absent or cannot convert.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        self.get_opt(key)?
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))
    }

    /// Typed lookup where absence is `Ok(None)`; a value of the wrong type
    /// is still an error.
    pub fn get_opt<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        self.values
            .get(key)
            .map(|value| V::from_config_value(value, key))
            .transpose()
    }

    /// Typed lookup falling back to `default` on any failure.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}
