//! Schema walker enforcing the record contract.
//!
//! Closed records reject every undeclared key (reported together in one
//! error), required fields must be present and non-null, and nested models and
//! lists are checked recursively. Primitive fields are checked against their
//! kind so that type errors carry a JSON path. Open records skip the
//! unknown-key check; their extra keys end up in the extension bag during
//! typed conversion.

use chrono::DateTime;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{DecodeOptions, EnumValidation};
use crate::errors::{WatsonError, WatsonResult};
use crate::marshal::path::FieldPath;
use crate::marshal::schema::{Field, FieldKind, Schema, Shape};
use crate::marshal::union;

/// Checks `value` against `shape` without converting it.
pub fn validate(shape: Shape, value: &Value, options: &DecodeOptions) -> WatsonResult<()> {
    Walker::new(options).check_shape(shape, value)
}

/// Returns the keys of `object` that `schema` does not declare, in input order.
pub fn unknown_keys(schema: &Schema, object: &Map<String, Value>) -> Vec<String> {
    object
        .keys()
        .filter(|key| !schema.declares(key))
        .cloned()
        .collect()
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("string {:?}", text),
        Value::Number(number) => format!("number {}", number),
        other => json_type(other).to_string(),
    }
}

struct Walker<'o> {
    options: &'o DecodeOptions,
    path: FieldPath,
    depth: usize,
}

impl<'o> Walker<'o> {
    fn new(options: &'o DecodeOptions) -> Self {
        Self {
            options,
            path: FieldPath::root(),
            depth: 0,
        }
    }

    fn enter(&mut self) -> WatsonResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(WatsonError::DepthExceeded {
                path: self.path.to_string(),
                max_depth: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn check_shape(&mut self, shape: Shape, value: &Value) -> WatsonResult<()> {
        self.enter()?;
        let schema = match shape {
            Shape::Record(schema) => schema,
            Shape::Union(table) => union::resolve(table, value, &self.path)?.schema,
        };
        self.check_record(schema, value)?;
        self.leave();
        Ok(())
    }

    fn check_record(&mut self, schema: &'static Schema, value: &Value) -> WatsonResult<()> {
        let object = value.as_object().ok_or_else(|| {
            WatsonError::serialization(format!(
                "expected a JSON object for {} at {}, found {}",
                schema.name,
                self.path,
                json_type(value)
            ))
        })?;

        if !schema.is_open() {
            let keys = unknown_keys(schema, object);
            if !keys.is_empty() {
                return Err(WatsonError::SchemaViolation {
                    model: schema.name.to_string(),
                    path: self.path.to_string(),
                    keys,
                });
            }
        }

        for field in schema.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(WatsonError::MissingRequiredField {
                            model: schema.name.to_string(),
                            path: self.path.to_string(),
                            field: field.name.to_string(),
                        });
                    }
                }
                Some(item) => {
                    self.path.push_key(field.name);
                    self.check_kind(schema, field, &field.kind, item)?;
                    self.path.pop();
                }
            }
        }

        Ok(())
    }

    fn check_kind(
        &mut self,
        schema: &'static Schema,
        field: &Field,
        kind: &FieldKind,
        value: &Value,
    ) -> WatsonResult<()> {
        match kind {
            FieldKind::Model(shape) => self.check_shape(shape(), value),
            FieldKind::List(inner) => {
                let items = value.as_array().ok_or_else(|| {
                    WatsonError::serialization(format!(
                        "expected an array at {}, found {}",
                        self.path,
                        json_type(value)
                    ))
                })?;
                self.enter()?;
                for (index, item) in items.iter().enumerate() {
                    self.path.push_index(index);
                    self.check_kind(schema, field, inner, item)?;
                    self.path.pop();
                }
                self.leave();
                Ok(())
            }
            FieldKind::Enum(allowed) => {
                self.check_primitive(schema, "string", value.is_string(), value)?;
                self.check_enum(schema, field, allowed, value)
            }
            FieldKind::String => self.check_primitive(schema, "string", value.is_string(), value),
            FieldKind::Integer => {
                let integral = value.is_i64() || value.is_u64();
                self.check_primitive(schema, "integer", integral, value)
            }
            FieldKind::Number => self.check_primitive(schema, "number", value.is_number(), value),
            FieldKind::Boolean => {
                self.check_primitive(schema, "boolean", value.is_boolean(), value)
            }
            FieldKind::DateTime => {
                let valid = value
                    .as_str()
                    .is_some_and(|text| DateTime::parse_from_rfc3339(text).is_ok());
                self.check_primitive(schema, "RFC 3339 timestamp", valid, value)
            }
            FieldKind::Any => Ok(()),
        }
    }

    fn check_primitive(
        &self,
        schema: &'static Schema,
        expected: &str,
        matches: bool,
        value: &Value,
    ) -> WatsonResult<()> {
        if matches {
            return Ok(());
        }
        Err(WatsonError::serialization(format!(
            "expected {} at {} in {}, found {}",
            expected,
            self.path,
            schema.name,
            describe(value)
        )))
    }

    fn check_enum(
        &self,
        schema: &'static Schema,
        field: &Field,
        allowed: &'static [&'static str],
        value: &Value,
    ) -> WatsonResult<()> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };
        if allowed.contains(&text) {
            return Ok(());
        }

        match self.options.enum_validation {
            EnumValidation::Permissive => {
                debug!(
                    model = schema.name,
                    field = field.name,
                    value = text,
                    "accepting undocumented enum value"
                );
                Ok(())
            }
            EnumValidation::Strict => Err(WatsonError::InvalidValue {
                model: schema.name.to_string(),
                path: self.path.to_string(),
                field: field.name.to_string(),
                value: text.to_string(),
                allowed: allowed.iter().map(|v| v.to_string()).collect(),
            }),
        }
    }
}
