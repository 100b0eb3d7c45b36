//! Model marshaling between wire JSON and typed models.
//!
//! Decoding is two passes. The schema walker first checks the raw
//! `serde_json::Value` against the model's static [`Shape`], reporting schema
//! violations, missing required fields and unknown union variants with a JSON
//! path. The checked value is then converted by the model's serde derive.
//! Encoding is the serde derive alone: unset optional fields are skipped and
//! open models append their extension bag after the declared fields.

mod marshaler;
mod open;
mod path;
mod schema;
mod strict;
mod union;

pub use marshaler::Marshaler;
pub use open::{OpenModel, Properties};
pub use path::FieldPath;
pub use schema::{Field, FieldKind, Schema, Shape, Strictness, UnionSchema, Variant};
pub use strict::{unknown_keys, validate};
pub use union::resolve;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::DecodeOptions;
use crate::errors::{WatsonError, WatsonResult};

/// A typed model with a declared wire shape.
pub trait Model: Serialize + DeserializeOwned {
    /// The wire shape checked before typed conversion.
    fn shape() -> Shape;

    /// Decodes a model from a JSON value with default options.
    fn from_value(value: Value) -> WatsonResult<Self> {
        decode(value)
    }

    /// Decodes a model from JSON text with default options.
    fn from_json_str(text: &str) -> WatsonResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        decode(value)
    }

    /// Encodes the model to a JSON value.
    fn to_value(&self) -> WatsonResult<Value> {
        encode(self)
    }

    /// Encodes the model to JSON text.
    fn to_json_string(&self) -> WatsonResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decodes `value` into `T` with default options.
pub fn decode<T: Model>(value: Value) -> WatsonResult<T> {
    decode_with(value, &DecodeOptions::default())
}

/// Decodes `value` into `T`.
pub fn decode_with<T: Model>(value: Value, options: &DecodeOptions) -> WatsonResult<T> {
    let shape = T::shape();
    validate(shape, &value, options)?;
    serde_json::from_value(value).map_err(|err| {
        WatsonError::serialization(format!("failed to decode {}: {}", shape.name(), err))
    })
}

/// Encodes `model` to a JSON value.
pub fn encode<T: Model>(model: &T) -> WatsonResult<Value> {
    Ok(serde_json::to_value(model)?)
}
