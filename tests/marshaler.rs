//! Marshaler facade: configuration, metrics and logging setup.

use std::sync::Arc;

use integrations_watson::fixtures;
use integrations_watson::observability::DefaultMetricsCollector;
use integrations_watson::{
    AnalysisResults, Collection, EnumValidation, LogFormat, LogLevel, LoggingConfig,
    MarshalConfig, Marshaler, MetricsCollector, QueryResponse, QueryResult, WatsonError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_decode_and_encode_through_facade() {
    let marshaler = Marshaler::default();

    let response: QueryResponse = marshaler.decode(fixtures::sample_query_response()).unwrap();
    let encoded = marshaler.encode(&response).unwrap();
    assert_eq!(encoded, fixtures::sample_query_response());

    let text = marshaler.encode_string(&response).unwrap();
    let again: QueryResponse = marshaler.decode_str(&text).unwrap();
    assert_eq!(again, response);
}

#[test]
fn test_metrics_track_models_and_error_categories() {
    let collector = Arc::new(DefaultMetricsCollector::new());
    let marshaler = Marshaler::with_metrics(MarshalConfig::default(), collector.clone());

    let _: AnalysisResults = marshaler.decode(fixtures::sample_analysis_results()).unwrap();
    let _: Collection = marshaler.decode(fixtures::sample_collection()).unwrap();
    assert!(marshaler.decode::<Collection>(json!({"bogus": 1})).is_err());
    assert!(marshaler.decode::<QueryResult>(json!({"document_id": "d1"})).is_err());
    assert!(marshaler.decode_str::<Collection>("[").is_err());

    let metrics = collector.get_metrics();
    assert_eq!(metrics.total_operations, 5);
    assert_eq!(metrics.successful_operations, 2);
    assert_eq!(metrics.failed_operations, 3);
    assert_eq!(metrics.models.get("Collection"), Some(&3));
    assert_eq!(metrics.models.get("AnalysisResults"), Some(&1));
    assert_eq!(metrics.errors.get("schema"), Some(&2));
    assert_eq!(metrics.errors.get("serialization"), Some(&1));
    assert!((metrics.success_rate() - 40.0).abs() < 0.1);

    collector.reset();
    assert_eq!(marshaler.metrics().get_metrics().total_operations, 0);
}

#[test]
fn test_config_drives_decode_options() {
    let config = MarshalConfig::builder()
        .enum_validation(EnumValidation::Strict)
        .max_depth(3)
        .build()
        .unwrap();
    let marshaler = Marshaler::new(config);
    assert_eq!(marshaler.config().max_depth, 3);

    let deep = json!({"aggregations": [fixtures::nested_aggregation(1)]});
    assert!(matches!(
        marshaler.decode::<QueryResponse>(deep),
        Err(WatsonError::DepthExceeded { max_depth: 3, .. })
    ));

    let odd_status = json!({"document_id": "d1", "status": "archived"});
    let err = marshaler
        .decode::<integrations_watson::DocumentAccepted>(odd_status)
        .unwrap_err();
    assert!(matches!(err, WatsonError::InvalidValue { .. }));
    assert!(err.is_decode_error());
}

#[test]
fn test_marshaler_is_shareable_across_threads() {
    let marshaler = Arc::new(Marshaler::default());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let marshaler = Arc::clone(&marshaler);
            std::thread::spawn(move || {
                let collection: Collection = marshaler
                    .decode(json!({"collection_id": format!("c{}", i)}))
                    .unwrap();
                collection.collection_id
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_some());
    }
    assert_eq!(marshaler.metrics().get_metrics().successful_operations, 4);
}

#[test]
fn test_logging_initialises_once() {
    let config = LoggingConfig::new()
        .with_level(LogLevel::Warn)
        .with_format(LogFormat::Json)
        .with_decode_diagnostics(true);

    assert!(config.clone().init().is_ok());
    assert!(matches!(
        config.init(),
        Err(WatsonError::Configuration { .. })
    ));
}
