//! Schemas contributed from Rust code instead of doc-comment annotations.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

/// Named JSON Schemas destined for `components.schemas`.
///
/// An annotation that defines a schema of the same name takes precedence.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the schema called `name`.
    pub fn register(&mut self, name: &str, schema: Value) -> &mut Self {
        self.schemas.insert(name.to_string(), schema);
        self
    }

    /// An object schema whose `(field, openapi_type)` pairs are all required.
    pub fn register_object(&mut self, name: &str, fields: &[(&str, &str)]) -> &mut Self {
        let properties: Map<String, Value> = fields
            .iter()
            .map(|(field, ty)| (field.to_string(), json!({ "type": ty })))
            .collect();
        let required: Vec<&str> = fields.iter().map(|(field, _)| *field).collect();
        self.register(
            name,
            json!({ "type": "object", "properties": properties, "required": required }),
        )
    }

    pub fn register_type<S: SchemaProvider>(&mut self) -> &mut Self {
        self.register(S::schema_name(), S::json_schema())
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// `(name, schema)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }
}

/// A type that describes itself as a JSON Schema.
pub trait SchemaProvider {
    fn schema_name() -> &'static str;

    fn json_schema() -> Value;
}
