//! Test fixtures and sample payloads.
//!
//! Wire JSON shaped like real Discovery and NLU responses, shared by unit
//! tests, integration tests and benchmarks.

use serde_json::{json, Value};

/// Sample collection ID.
pub const TEST_COLLECTION_ID: &str = "f1360220-ea2d-4271-9d62-89a910b13c37";

/// Sample project document ID.
pub const TEST_DOCUMENT_ID: &str = "4ffcfd8052005b99469e632506763bac";

/// A collection summary.
pub fn sample_collection() -> Value {
    json!({
        "collection_id": "c1",
        "name": "example"
    })
}

/// A collection details payload with enrichments.
pub fn sample_collection_details() -> Value {
    json!({
        "collection_id": TEST_COLLECTION_ID,
        "name": "Quarterly reports",
        "description": "Filed reports by quarter",
        "created": "2019-01-01T12:00:00.000Z",
        "language": "en",
        "enrichments": [
            {"enrichment_id": "701db916-fc83-57ab-0000-000000000012", "fields": ["text"]},
            {"enrichment_id": "701db916-fc83-57ab-0000-00000000001e", "fields": ["text", "title"]}
        ]
    })
}

/// A single query result with ingested document fields.
pub fn sample_query_result() -> Value {
    json!({
        "document_id": TEST_DOCUMENT_ID,
        "metadata": {"parent_document_id": "p1", "source": {"url": "https://example.com/q1"}},
        "result_metadata": {
            "document_retrieval_source": "search",
            "collection_id": TEST_COLLECTION_ID,
            "confidence": 0.6217
        },
        "document_passages": [
            {"passage_text": "Revenue grew in the <em>third</em> quarter", "start_offset": 12, "end_offset": 54, "field": "text"}
        ],
        "title": "Q3 report",
        "text": ["Revenue grew in the third quarter."],
        "extracted_metadata": {"filename": "q3.pdf", "file_type": "pdf"}
    })
}

/// A query response exercising results and nested aggregations.
pub fn sample_query_response() -> Value {
    json!({
        "matching_results": 24,
        "retrieval_details": {"document_retrieval_strategy": "untrained"},
        "results": [sample_query_result()],
        "aggregations": [
            {
                "type": "term",
                "field": "enriched_text.entities.type",
                "count": 2,
                "results": [
                    {
                        "key": "Organization",
                        "matching_results": 12,
                        "aggregations": [
                            {"type": "average", "field": "price", "value": 12.75}
                        ]
                    },
                    {"key": "Person", "matching_results": 9}
                ]
            },
            {
                "type": "timeslice",
                "field": "published",
                "interval": "1d",
                "results": [
                    {"key_as_string": "2019-01-01T00:00:00.000Z", "key": 1546300800000_i64, "matching_results": 3}
                ]
            },
            {
                "type": "filter",
                "match": "enriched_text.sentiment.document.label:positive",
                "matching_results": 5,
                "aggregations": [
                    {"type": "term", "field": "author", "matching_results": 3, "key": "smith"}
                ]
            }
        ],
        "suggested_refinements": [{"text": "quarterly revenue"}]
    })
}

/// An NLU analyze response.
pub fn sample_analysis_results() -> Value {
    json!({
        "language": "en",
        "analyzed_text": "IBM opened a new lab in Dublin. Investors were pleased.",
        "usage": {"features": 3, "text_characters": 55, "text_units": 1},
        "entities": [
            {"type": "Company", "text": "IBM", "relevance": 0.97, "count": 1, "sentiment": {"score": 0.42}},
            {"type": "Location", "text": "Dublin", "relevance": 0.61, "count": 1}
        ],
        "keywords": [
            {"text": "new lab", "relevance": 0.88, "count": 1}
        ],
        "concepts": [
            {"text": "Dublin", "relevance": 0.71, "dbpedia_resource": "http://dbpedia.org/resource/Dublin"}
        ],
        "categories": [
            {"label": "/business and industrial", "score": 0.82}
        ],
        "sentiment": {
            "document": {"label": "positive", "score": 0.55},
            "targets": [{"text": "investors", "score": 0.64}]
        }
    })
}

/// An aggregation nested `depth` levels deep through `nested` aggregations.
pub fn nested_aggregation(depth: usize) -> Value {
    let mut value = json!({"type": "max", "field": "price", "value": 9.5});
    for level in 0..depth {
        value = json!({
            "type": "nested",
            "path": format!("level{}", level),
            "matching_results": 1,
            "aggregations": [value]
        });
    }
    value
}
