use apidoc_openapi::SchemaProvider;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A vehicle in the fleet.
///
/// @openapi
/// components:
///   schemas:
///     Vehicle:
///       type: object
///       required: [id, make, model, year]
///       properties:
///         id:
///           type: integer
///           format: int64
///           description: Auto-assigned identifier
///         make:
///           type: string
///           example: Toyota
///         model:
///           type: string
///           example: Corolla
///         year:
///           type: integer
///           example: 2020
///     NewVehicle:
///       type: object
///       required: [make, model, year]
///       properties:
///         make:
///           type: string
///         model:
///           type: string
///         year:
///           type: integer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub make: String,
    pub model: String,
    pub year: u16,
}

/// Request body for creating or replacing a vehicle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: u16,
}

impl NewVehicle {
    /// Reject blank make or model.
    pub fn validate(&self) -> Result<(), String> {
        if self.make.trim().is_empty() {
            return Err("make must not be empty".into());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".into());
        }
        Ok(())
    }
}

/// Body of every error response: `{"error": "..."}`.
pub struct ErrorBody;

impl SchemaProvider for ErrorBody {
    fn schema_name() -> &'static str {
        "Error"
    }

    fn json_schema() -> Value {
        json!({
            "type": "object",
            "required": ["error"],
            "properties": {
                "error": { "type": "string" }
            }
        })
    }
}
