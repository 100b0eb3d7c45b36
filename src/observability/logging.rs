//! Logging setup for decode and encode diagnostics.
//!
//! The engines only emit `tracing` events. Under [`MARSHAL_TARGET`] the
//! facade logs failed calls at `warn` and completed calls at `debug`, and the
//! schema walker logs undocumented enum values at `debug`. [`LoggingConfig`]
//! builds the filter that decides which of these reach the output.

use std::str::FromStr;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{WatsonError, WatsonResult};

/// Target prefix of every event emitted by the marshaling engines.
pub const MARSHAL_TARGET: &str = "integrations_watson::marshal";

/// Log level enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace-level logging (most verbose)
    Trace,
    /// Debug-level logging
    Debug,
    /// Info-level logging
    Info,
    /// Warning-level logging
    Warn,
    /// Error-level logging (least verbose)
    Error,
}

impl LogLevel {
    /// Returns the level as an `EnvFilter` directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = WatsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(WatsonError::configuration(format!("Unknown log level '{}'", other))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local debugging of payloads
    Pretty,
    /// One JSON object per event, with decode fields as JSON keys
    Json,
}

impl FromStr for LogFormat {
    type Err = WatsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(WatsonError::configuration(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level applied to every target
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Lower the marshaling targets to `debug`, exposing per-call completions
    /// and accepted undocumented enum values without raising the global level
    pub decode_diagnostics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            decode_diagnostics: false,
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables decode diagnostics.
    pub fn with_decode_diagnostics(mut self, enabled: bool) -> Self {
        self.decode_diagnostics = enabled;
        self
    }

    /// Shows every decode and encode call and each undocumented enum value.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            decode_diagnostics: true,
        }
    }

    /// Shows only failed decode and encode calls, as JSON.
    pub fn production() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Json,
            decode_diagnostics: false,
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WATSON_LOG_LEVEL` (optional): `trace`, `debug`, `info`, `warn` or `error`
    /// - `WATSON_LOG_FORMAT` (optional): `pretty` or `json`
    /// - `WATSON_DECODE_DIAGNOSTICS` (optional): `true` or `false`
    pub fn from_env() -> WatsonResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> WatsonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("WATSON_LOG_LEVEL") {
            config.level = level.parse()?;
        }
        if let Some(format) = lookup("WATSON_LOG_FORMAT") {
            config.format = format.parse()?;
        }
        if let Some(enabled) = lookup("WATSON_DECODE_DIAGNOSTICS") {
            config.decode_diagnostics = enabled.trim().parse::<bool>().map_err(|_| {
                WatsonError::configuration(format!(
                    "WATSON_DECODE_DIAGNOSTICS must be true or false: {}",
                    enabled
                ))
            })?;
        }

        Ok(config)
    }

    /// Returns the filter directives this configuration installs.
    pub fn directives(&self) -> Vec<String> {
        let mut directives = vec![self.level.as_str().to_string()];
        if self.decode_diagnostics {
            directives.push(format!("{}=debug", MARSHAL_TARGET));
        }
        directives
    }

    /// Installs a global subscriber with this configuration.
    ///
    /// `RUST_LOG` directives are honoured alongside the configured ones.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a global subscriber is already set.
    pub fn init(self) -> WatsonResult<()> {
        let mut filter = EnvFilter::from_default_env();
        for directive in self.directives() {
            let directive = directive.parse::<Directive>().map_err(|err| {
                WatsonError::configuration(format!("invalid log directive '{}': {}", directive, err))
            })?;
            filter = filter.add_directive(directive);
        }

        let result = match self.format {
            LogFormat::Pretty => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(true).with_target(true))
                .try_init(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_current_span(true))
                .try_init(),
        };

        result.map_err(|err| WatsonError::configuration(format!("failed to initialise logging: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.directives(), vec!["info".to_string()]);
    }

    #[test]
    fn test_decode_diagnostics_lower_marshal_target_only() {
        let config = LoggingConfig::new()
            .with_level(LogLevel::Warn)
            .with_decode_diagnostics(true);

        assert_eq!(
            config.directives(),
            vec![
                "warn".to_string(),
                "integrations_watson::marshal=debug".to_string()
            ]
        );
    }

    #[test]
    fn test_presets() {
        let development = LoggingConfig::development();
        assert!(development.decode_diagnostics);
        assert_eq!(development.level, LogLevel::Info);

        let production = LoggingConfig::production();
        assert_eq!(production.format, LogFormat::Json);
        assert_eq!(production.directives(), vec!["warn".to_string()]);
    }

    #[test]
    fn test_logging_config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("WATSON_LOG_LEVEL", "Debug"),
            ("WATSON_LOG_FORMAT", "json"),
            ("WATSON_DECODE_DIAGNOSTICS", "true"),
        ]
        .into_iter()
        .collect();

        let config = LoggingConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.decode_diagnostics);
    }

    #[test]
    fn test_logging_config_rejects_bad_values() {
        assert!(matches!(
            "loud".parse::<LogLevel>(),
            Err(WatsonError::Configuration { .. })
        ));
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(WatsonError::Configuration { .. })
        ));
        let result = LoggingConfig::from_lookup(|name| {
            (name == "WATSON_DECODE_DIAGNOSTICS").then(|| "yes".to_string())
        });
        assert!(matches!(result, Err(WatsonError::Configuration { .. })));
    }

    #[test]
    fn test_directives_parse() {
        for directive in LoggingConfig::development().directives() {
            assert!(directive.parse::<Directive>().is_ok());
        }
    }
}
