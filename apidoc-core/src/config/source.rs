//! YAML sources, flattened to dot-separated keys.
//!
//! ```yaml
//! openapi:
//!   servers:
//!     - url: http://localhost:3000
//! ```
//!
//! yields `openapi.servers` (the whole list), `openapi.servers.0.url`.

use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

pub(crate) type Values = HashMap<String, ConfigValue>;

/// Merge `path` into `values` when it exists.
pub(crate) fn merge_file(path: &Path, values: &mut Values) -> Result<(), ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ConfigError::Load(format!("{}: {e}", path.display()))),
    };
    merge_str(&content, values).map_err(|e| match e {
        ConfigError::Load(msg) => ConfigError::Load(format!("{}: {msg}", path.display())),
        other => other,
    })
}

pub(crate) fn merge_str(content: &str, values: &mut Values) -> Result<(), ConfigError> {
    let root: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    values.extend(flatten(&root));
    Ok(())
}

fn flatten(root: &serde_yaml::Value) -> Vec<(String, ConfigValue)> {
    let mut out = Vec::new();
    let mut pending = vec![(String::new(), root)];

    while let Some((key, node)) = pending.pop() {
        match node {
            serde_yaml::Value::Mapping(map) => {
                for (k, v) in map {
                    let name = match k {
                        serde_yaml::Value::String(s) => s.clone(),
                        other => serde_yaml::to_string(other)
                            .map(|s| s.trim().to_string())
                            .unwrap_or_default(),
                    };
                    pending.push((child_key(&key, &name), v));
                }
            }
            serde_yaml::Value::Sequence(items) if !key.is_empty() => {
                out.push((key.clone(), ConfigValue::from(node)));
                for (i, item) in items.iter().enumerate() {
                    pending.push((child_key(&key, &i.to_string()), item));
                }
            }
            leaf if !key.is_empty() => out.push((key, ConfigValue::from(leaf))),
            _ => {}
        }
    }

    out
}

fn child_key(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
