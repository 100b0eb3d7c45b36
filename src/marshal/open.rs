//! Extension bag support for open models.
//!
//! An open model stores every undeclared input key verbatim in a
//! `#[serde(flatten)]` map and re-emits it after the declared fields, so a
//! decode followed by an encode reproduces the input key set exactly.

use serde_json::{Map, Value};

use crate::errors::{WatsonError, WatsonResult};
use crate::marshal::Model;

/// The extension bag of an open model.
pub type Properties = Map<String, Value>;

/// A model that carries arbitrary extra properties next to its declared fields.
///
/// Keys written through [`OpenModel::properties_mut`] are not checked; a
/// declared key inserted that way is emitted twice on encode.
pub trait OpenModel: Model {
    /// Borrows the extension bag.
    fn properties(&self) -> &Properties;

    /// Mutably borrows the extension bag.
    fn properties_mut(&mut self) -> &mut Properties;

    /// Swaps the extension bag wholesale and returns the previous one.
    fn replace_properties(&mut self, properties: Properties) -> Properties {
        std::mem::replace(self.properties_mut(), properties)
    }

    /// Returns a copy of the extension bag only, never the declared fields.
    fn get_properties(&self) -> Properties {
        self.properties().clone()
    }

    /// Replaces the whole extension bag.
    ///
    /// Previous entries are discarded, not merged. Fails without touching the
    /// model if any key names a declared field.
    fn set_properties(&mut self, properties: Properties) -> WatsonResult<()> {
        if let Some(key) = properties.keys().find(|key| declares::<Self>(key)) {
            return Err(declared_key_error(key));
        }
        self.replace_properties(properties);
        Ok(())
    }

    /// Reads a single extra property.
    fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties().get(key)
    }

    /// Inserts a single extra property, returning any previous value.
    fn set_property(&mut self, key: impl Into<String>, value: Value) -> WatsonResult<Option<Value>> {
        let key = key.into();
        if declares::<Self>(&key) {
            return Err(declared_key_error(&key));
        }
        Ok(self.properties_mut().insert(key, value))
    }
}

fn declares<T: Model>(key: &str) -> bool {
    T::shape().record().is_some_and(|schema| schema.declares(key))
}

fn declared_key_error(key: &str) -> WatsonError {
    WatsonError::invalid_argument(
        format!("Property {} cannot be specified as an additional property", key),
        key,
    )
}
