//! Watson Model Layer
//!
//! Typed models for the IBM Watson Discovery v2 and Natural Language
//! Understanding v1 APIs, and the marshaling engines that move them to and
//! from wire JSON. Transport and authentication live elsewhere; this crate
//! only converts parsed JSON into models and back.
//!
//! # Features
//!
//! - **Strict models**: unknown keys are rejected and reported together
//! - **Open models**: undeclared keys round-trip through an extension bag
//! - **Aggregations**: `type`-tagged union with recursive nesting
//! - **Observability**: tracing spans, structured logging, metrics
//!
//! # Quick Start
//!
//! ```rust
//! use integrations_watson::{Collection, Marshaler, Model};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), integrations_watson::WatsonError> {
//! let marshaler = Marshaler::default();
//!
//! let collection: Collection =
//!     marshaler.decode(json!({"collection_id": "c1", "name": "example"}))?;
//! assert_eq!(collection.name.as_deref(), Some("example"));
//!
//! let encoded = collection.to_value()?;
//! assert_eq!(encoded, json!({"collection_id": "c1", "name": "example"}));
//! # Ok(())
//! # }
//! ```
//!
//! # Open Models
//!
//! ```rust
//! use integrations_watson::{Model, OpenModel, QueryResult};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), integrations_watson::WatsonError> {
//! let result = QueryResult::from_value(json!({
//!     "document_id": "d1",
//!     "result_metadata": {"collection_id": "c1"},
//!     "title": "Quarterly report"
//! }))?;
//!
//! assert_eq!(result.get_property("title"), Some(&json!("Quarterly report")));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod fixtures;
pub mod marshal;
pub mod observability;
pub mod types;

// Re-exports for convenience
pub use config::{DecodeOptions, EnumValidation, MarshalConfig, MarshalConfigBuilder};
pub use errors::{ErrorCategory, WatsonError, WatsonResult};
pub use marshal::{decode, decode_with, encode, Marshaler, Model, OpenModel, Properties};
pub use observability::{LogFormat, LogLevel, LoggingConfig, MetricsCollector};

// Type re-exports
pub use types::aggregations::QueryAggregation;
pub use types::discovery::{
    Collection, CollectionDetails, DocumentAccepted, ListCollectionsResponse, QueryResponse,
    QueryResult, QueryResultMetadata,
};
pub use types::nlu::{AnalysisResults, Features};
