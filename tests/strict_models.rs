//! Strict model decode/encode behaviour over the Discovery and NLU catalogue.

use integrations_watson::fixtures;
use integrations_watson::types::discovery::CollectionEnrichment;
use integrations_watson::{
    decode, AnalysisResults, Collection, CollectionDetails, DecodeOptions, EnumValidation,
    Model, QueryResponse, WatsonError,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

#[test]
fn test_collection_round_trips_exactly() {
    let input = fixtures::sample_collection();
    let collection: Collection = decode(input.clone()).unwrap();

    assert_eq!(collection.collection_id.as_deref(), Some("c1"));
    assert_eq!(collection.name.as_deref(), Some("example"));
    assert_eq!(collection.to_json_string().unwrap(), r#"{"collection_id":"c1","name":"example"}"#);
}

#[test]
fn test_collection_details_round_trip() {
    let input = fixtures::sample_collection_details();
    let details: CollectionDetails = decode(input.clone()).unwrap();

    assert_eq!(details.name, "Quarterly reports");
    assert_eq!(details.enrichments.as_ref().map(Vec::len), Some(2));
    assert_eq!(details.to_value().unwrap(), input);
}

#[test]
fn test_query_response_round_trip() {
    let input = fixtures::sample_query_response();
    let response: QueryResponse = decode(input.clone()).unwrap();

    assert_eq!(response.matching_results, Some(24));
    assert_eq!(response.results().len(), 1);
    assert_eq!(response.aggregations().len(), 3);
    assert_eq!(response.to_value().unwrap(), input);
}

#[test]
fn test_analysis_results_round_trip() {
    let input = fixtures::sample_analysis_results();
    let results: AnalysisResults = decode(input.clone()).unwrap();

    assert_eq!(results.entities_of_type("Company").count(), 1);
    assert_eq!(results.document_sentiment(), Some("positive"));
    assert_eq!(results.to_value().unwrap(), input);
}

#[test]
fn test_unset_fields_are_omitted_not_null() {
    let details = CollectionDetails::new("bare");
    assert_eq!(details.to_value().unwrap(), json!({"name": "bare"}));

    let decoded: CollectionDetails = decode(json!({"name": "bare", "description": null})).unwrap();
    assert_eq!(decoded, details);
    assert_eq!(decoded.to_value().unwrap(), json!({"name": "bare"}));
}

#[test]
fn test_encode_follows_declaration_order() {
    let input = json!({"enrichments": [], "language": "en", "name": "n", "collection_id": "c"});
    let details: CollectionDetails = decode(input).unwrap();

    let encoded = details.to_value().unwrap();
    let keys: Vec<_> = encoded.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["collection_id", "name", "language", "enrichments"]);
}

#[test]
fn test_schema_violation_lists_every_unknown_key() {
    let input = json!({"zeta": 1, "name": "n", "alpha": 2, "created_by": "me"});

    match decode::<CollectionDetails>(input) {
        Err(WatsonError::SchemaViolation { model, path, keys }) => {
            assert_eq!(model, "CollectionDetails");
            assert_eq!(path, "$");
            assert_eq!(keys, vec!["zeta", "alpha", "created_by"]);
        }
        other => panic!("Expected SchemaViolation, got {:?}", other),
    }
}

#[test]
fn test_schema_violation_wins_over_missing_required() {
    let err = decode::<CollectionDetails>(json!({"bogus": true})).unwrap_err();
    assert!(matches!(err, WatsonError::SchemaViolation { .. }));
    assert!(err.to_string().contains("bogus"));
}

#[test_case(json!({}) ; "absent")]
#[test_case(json!({"name": null}) ; "null")]
fn test_missing_required_name(input: Value) {
    match decode::<CollectionDetails>(input) {
        Err(WatsonError::MissingRequiredField { model, path, field }) => {
            assert_eq!(model, "CollectionDetails");
            assert_eq!(path, "$");
            assert_eq!(field, "name");
        }
        other => panic!("Expected MissingRequiredField, got {:?}", other),
    }
}

#[test]
fn test_nested_error_reports_path() {
    let input = json!({
        "matching_results": 1,
        "results": [
            {"document_id": "d0", "result_metadata": {"collection_id": "c1"}},
            {"document_id": "d1", "result_metadata": {"confidence": 0.5}}
        ]
    });

    match decode::<QueryResponse>(input) {
        Err(WatsonError::MissingRequiredField { model, path, field }) => {
            assert_eq!(model, "QueryResultMetadata");
            assert_eq!(path, "$.results[1].result_metadata");
            assert_eq!(field, "collection_id");
        }
        other => panic!("Expected MissingRequiredField, got {:?}", other),
    }
}

#[test_case(json!("just a string") ; "string")]
#[test_case(json!([1, 2]) ; "array")]
#[test_case(json!(null) ; "null")]
fn test_non_object_input_is_rejected(input: Value) {
    let err = decode::<Collection>(input).unwrap_err();
    assert!(matches!(err, WatsonError::Serialization { .. }));
    assert!(err.to_string().contains("Collection"));
}

#[test]
fn test_primitive_type_mismatch_is_rejected() {
    let err = decode::<QueryResponse>(json!({"matching_results": "many"})).unwrap_err();
    assert!(matches!(err, WatsonError::Serialization { .. }));
}

#[test]
fn test_list_order_is_preserved() {
    let details: CollectionDetails = decode(json!({
        "name": "n",
        "enrichments": [
            {"enrichment_id": "b", "fields": ["z", "y"]},
            {"enrichment_id": "a", "fields": ["x"]}
        ]
    }))
    .unwrap();

    assert_eq!(
        details.enrichments,
        Some(vec![
            CollectionEnrichment::new("b", ["z", "y"]),
            CollectionEnrichment::new("a", ["x"]),
        ])
    );
}

#[test]
fn test_strict_enum_mode_rejects_undocumented_values() {
    let input = json!({"retrieval_details": {"document_retrieval_strategy": "magic"}});
    let strict = DecodeOptions {
        enum_validation: EnumValidation::Strict,
        ..DecodeOptions::default()
    };

    let lenient: QueryResponse = decode(input.clone()).unwrap();
    assert_eq!(
        lenient
            .retrieval_details
            .and_then(|d| d.document_retrieval_strategy)
            .as_deref(),
        Some("magic")
    );

    match integrations_watson::decode_with::<QueryResponse>(input, &strict) {
        Err(WatsonError::InvalidValue { model, field, value, path, .. }) => {
            assert_eq!(model, "RetrievalDetails");
            assert_eq!(field, "document_retrieval_strategy");
            assert_eq!(value, "magic");
            assert_eq!(path, "$.retrieval_details.document_retrieval_strategy");
        }
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_decode_from_text() {
    let collection = Collection::from_json_str(r#"{"collection_id": "c1", "name": "example"}"#).unwrap();
    assert_eq!(collection, Collection::new("c1", "example"));

    let err = Collection::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, WatsonError::Serialization { .. }));
}
