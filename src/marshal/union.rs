//! Discriminator dispatch for union shapes.
//!
//! The discriminator key selects one arm from a closed table. There is no
//! passthrough for unrecognized values.

use serde_json::Value;

use crate::errors::{WatsonError, WatsonResult};
use crate::marshal::path::FieldPath;
use crate::marshal::schema::{UnionSchema, Variant};
use crate::marshal::strict::json_type;

/// Selects the arm of `table` named by the discriminator of `value`.
pub fn resolve<'t>(
    table: &'t UnionSchema,
    value: &Value,
    path: &FieldPath,
) -> WatsonResult<&'t Variant> {
    let object = value.as_object().ok_or_else(|| {
        WatsonError::serialization(format!(
            "expected a JSON object for {} at {}, found {}",
            table.name,
            path,
            json_type(value)
        ))
    })?;

    match object.get(table.discriminator) {
        None | Some(Value::Null) => Err(WatsonError::MissingRequiredField {
            model: table.name.to_string(),
            path: path.to_string(),
            field: table.discriminator.to_string(),
        }),
        Some(Value::String(tag)) => table.variant(tag).ok_or_else(|| WatsonError::UnknownVariant {
            union: table.name.to_string(),
            path: path.to_string(),
            discriminator: tag.clone(),
        }),
        Some(other) => Err(WatsonError::UnknownVariant {
            union: table.name.to_string(),
            path: path.to_string(),
            discriminator: other.to_string(),
        }),
    }
}
