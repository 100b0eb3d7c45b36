//! Configuration module for the Watson model layer.
//!
//! Controls how strictly JSON payloads are checked while decoding and whether
//! the [`Marshaler`](crate::marshal::Marshaler) records metrics.

use std::str::FromStr;

use crate::errors::{WatsonError, WatsonResult};

/// Default maximum nesting depth accepted while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How enumerated string fields are checked during decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumValidation {
    /// Any string is accepted; out-of-set values are only logged.
    #[default]
    Permissive,
    /// Out-of-set values fail the decode with [`WatsonError::InvalidValue`].
    Strict,
}

impl FromStr for EnumValidation {
    type Err = WatsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(EnumValidation::Permissive),
            "strict" => Ok(EnumValidation::Strict),
            other => Err(WatsonError::configuration(format!(
                "Unknown enum validation mode '{}', expected 'permissive' or 'strict'",
                other
            ))),
        }
    }
}

/// Options consumed by the decode engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Enumerated field handling.
    pub enum_validation: EnumValidation,
    /// Maximum object/array nesting depth.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            enum_validation: EnumValidation::Permissive,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration for the marshaling facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalConfig {
    /// Enumerated field handling.
    pub enum_validation: EnumValidation,
    /// Maximum object/array nesting depth.
    pub max_depth: usize,
    /// Record decode/encode metrics.
    pub metrics_enabled: bool,
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self {
            enum_validation: EnumValidation::Permissive,
            max_depth: DEFAULT_MAX_DEPTH,
            metrics_enabled: true,
        }
    }
}

impl MarshalConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> MarshalConfigBuilder {
        MarshalConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WATSON_ENUM_VALIDATION` (optional): `permissive` or `strict`
    /// - `WATSON_MAX_DEPTH` (optional): maximum nesting depth
    /// - `WATSON_METRICS_ENABLED` (optional): `true` or `false`
    pub fn from_env() -> WatsonResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> WatsonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = MarshalConfigBuilder::new();

        if let Some(mode) = lookup("WATSON_ENUM_VALIDATION") {
            builder = builder.enum_validation(mode.parse()?);
        }

        if let Some(depth) = lookup("WATSON_MAX_DEPTH") {
            let depth = depth.trim().parse::<usize>().map_err(|_| {
                WatsonError::configuration(format!("WATSON_MAX_DEPTH is not a number: {}", depth))
            })?;
            builder = builder.max_depth(depth);
        }

        if let Some(enabled) = lookup("WATSON_METRICS_ENABLED") {
            let enabled = enabled.trim().parse::<bool>().map_err(|_| {
                WatsonError::configuration(format!(
                    "WATSON_METRICS_ENABLED must be true or false: {}",
                    enabled
                ))
            })?;
            builder = builder.metrics_enabled(enabled);
        }

        builder.build()
    }

    /// Returns the decode options derived from this configuration.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            enum_validation: self.enum_validation,
            max_depth: self.max_depth,
        }
    }
}

/// Builder for `MarshalConfig`.
#[derive(Debug, Default)]
pub struct MarshalConfigBuilder {
    enum_validation: Option<EnumValidation>,
    max_depth: Option<usize>,
    metrics_enabled: Option<bool>,
}

impl MarshalConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enum validation mode.
    pub fn enum_validation(mut self, mode: EnumValidation) -> Self {
        self.enum_validation = Some(mode);
        self
    }

    /// Shorthand for strict enum validation.
    pub fn strict_enums(self) -> Self {
        self.enum_validation(EnumValidation::Strict)
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Enables or disables metrics recording.
    pub fn metrics_enabled(mut self, enabled: bool) -> Self {
        self.metrics_enabled = Some(enabled);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> WatsonResult<MarshalConfig> {
        let max_depth = self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
        if max_depth == 0 {
            return Err(WatsonError::configuration("max_depth must be at least 1"));
        }

        Ok(MarshalConfig {
            enum_validation: self.enum_validation.unwrap_or_default(),
            max_depth,
            metrics_enabled: self.metrics_enabled.unwrap_or(true),
        })
    }
}
