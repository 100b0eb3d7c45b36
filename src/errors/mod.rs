//! Error types for the Watson model layer.
//!
//! Every decode, encode and construction failure is reported through
//! [`WatsonError`]. Errors are raised at the point of violation and are never
//! recovered internally: no partial model is ever returned.

use thiserror::Error;

/// Result type alias for Watson marshaling operations.
pub type WatsonResult<T> = Result<T, WatsonError>;

/// Comprehensive error type for the Watson model layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WatsonError {
    /// One or more keys in the input are not declared by a strict schema.
    #[error("Schema violation at {path}: unrecognized keys for {model}: {}", .keys.join(", "))]
    SchemaViolation {
        /// Name of the model being decoded.
        model: String,
        /// JSON path of the offending object.
        path: String,
        /// Every unrecognized key, in input order.
        keys: Vec<String>,
    },

    /// A required field is absent (or `null`) in the input.
    #[error("Missing required field at {path}: '{field}' is required by {model}")]
    MissingRequiredField {
        /// Name of the model being decoded.
        model: String,
        /// JSON path of the offending object.
        path: String,
        /// Wire name of the missing field.
        field: String,
    },

    /// The discriminator of a union object does not name a known variant.
    #[error("Unknown variant at {path}: {union} has no variant '{discriminator}'")]
    UnknownVariant {
        /// Name of the union being decoded.
        union: String,
        /// JSON path of the offending object.
        path: String,
        /// The discriminator value found in the input.
        discriminator: String,
    },

    /// A required constructor argument was not supplied, or an argument is unusable.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message describing the problem.
        message: String,
        /// The parameter that caused the error.
        param: Option<String>,
    },

    /// An enumerated field holds a value outside its allowed set (strict enum mode only).
    #[error("Invalid value at {path}: '{value}' is not allowed for {model}.{field}")]
    InvalidValue {
        /// Name of the model being decoded.
        model: String,
        /// JSON path of the offending object.
        path: String,
        /// Wire name of the field.
        field: String,
        /// The rejected value.
        value: String,
        /// The values the field accepts.
        allowed: Vec<String>,
    },

    /// The input nests deeper than the configured limit.
    #[error("Nesting depth exceeded at {path}: limit is {max_depth}")]
    DepthExceeded {
        /// JSON path where the limit was crossed.
        path: String,
        /// The configured limit.
        max_depth: usize,
    },

    /// Serialization/deserialization error (wrong JSON types, malformed text).
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Configuration error (invalid settings or environment values).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },
}

/// Error category for classification and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input does not match the declared schema.
    Schema,
    /// The caller supplied unusable arguments.
    Argument,
    /// JSON-level type or syntax problems.
    Serialization,
    /// Client configuration errors.
    Configuration,
}

impl ErrorCategory {
    /// Returns a stable label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Schema => "schema",
            ErrorCategory::Argument => "argument",
            ErrorCategory::Serialization => "serialization",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WatsonError {
    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WatsonError::SchemaViolation { .. }
            | WatsonError::MissingRequiredField { .. }
            | WatsonError::UnknownVariant { .. }
            | WatsonError::InvalidValue { .. }
            | WatsonError::DepthExceeded { .. } => ErrorCategory::Schema,
            WatsonError::InvalidArgument { .. } => ErrorCategory::Argument,
            WatsonError::Serialization { .. } => ErrorCategory::Serialization,
            WatsonError::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Returns true if this error can only be raised while decoding JSON.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            WatsonError::SchemaViolation { .. }
                | WatsonError::MissingRequiredField { .. }
                | WatsonError::UnknownVariant { .. }
                | WatsonError::InvalidValue { .. }
                | WatsonError::DepthExceeded { .. }
        )
    }

    /// Creates an invalid argument error naming the offending parameter.
    pub fn invalid_argument(message: impl Into<String>, param: impl Into<String>) -> Self {
        WatsonError::InvalidArgument {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Creates an invalid argument error for a required parameter that was not supplied.
    pub fn missing_argument(param: impl Into<String>) -> Self {
        let param = param.into();
        Self::invalid_argument(format!("{} must be provided", param), param)
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        WatsonError::Serialization {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        WatsonError::Configuration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for WatsonError {
    fn from(err: serde_json::Error) -> Self {
        WatsonError::Serialization {
            message: err.to_string(),
        }
    }
}
