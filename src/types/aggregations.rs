//! Query aggregation variants.
//!
//! Aggregations arrive as a tagged union keyed by `type`. The dispatch table
//! below maps every known tag to its variant schema; [`QueryAggregation`] is the
//! matching serde enum. Term, histogram, timeslice, filter, nested and group-by
//! aggregations can carry nested `aggregations` lists of the same union.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{WatsonError, WatsonResult};
use crate::marshal::{Field, FieldKind, Model, Schema, Shape, UnionSchema, Variant};

const TYPE: Field = Field::required("type", FieldKind::String);
const SUB_AGGREGATIONS: Field = Field::optional(
    "aggregations",
    FieldKind::List(&FieldKind::Model(aggregation_shape)),
);

static FILTER: Schema = Schema::closed(
    "QueryFilterAggregation",
    &[
        TYPE,
        Field::required("match", FieldKind::String),
        Field::required("matching_results", FieldKind::Integer),
        SUB_AGGREGATIONS,
    ],
);

static TERM: Schema = Schema::closed(
    "QueryTermAggregation",
    &[
        TYPE,
        Field::required("field", FieldKind::String),
        Field::optional("count", FieldKind::Integer),
        Field::optional("name", FieldKind::String),
        Field::optional("key", FieldKind::String),
        Field::optional("matching_results", FieldKind::Integer),
        Field::optional(
            "results",
            FieldKind::List(&FieldKind::Model(QueryTermAggregationResult::shape)),
        ),
        SUB_AGGREGATIONS,
    ],
);

static HISTOGRAM: Schema = Schema::closed(
    "QueryHistogramAggregation",
    &[
        TYPE,
        Field::required("field", FieldKind::String),
        Field::required("interval", FieldKind::Integer),
        Field::optional("name", FieldKind::String),
        Field::optional("matching_results", FieldKind::Integer),
        Field::optional(
            "results",
            FieldKind::List(&FieldKind::Model(QueryHistogramAggregationResult::shape)),
        ),
        SUB_AGGREGATIONS,
    ],
);

static TIMESLICE: Schema = Schema::closed(
    "QueryTimesliceAggregation",
    &[
        TYPE,
        Field::required("field", FieldKind::String),
        Field::required("interval", FieldKind::String),
        Field::optional("name", FieldKind::String),
        Field::optional("anomaly", FieldKind::Boolean),
        Field::optional("matching_results", FieldKind::Integer),
        Field::optional(
            "results",
            FieldKind::List(&FieldKind::Model(QueryTimesliceAggregationResult::shape)),
        ),
        SUB_AGGREGATIONS,
    ],
);

static NESTED: Schema = Schema::closed(
    "QueryNestedAggregation",
    &[
        TYPE,
        Field::required("path", FieldKind::String),
        Field::required("matching_results", FieldKind::Integer),
        SUB_AGGREGATIONS,
    ],
);

static CALCULATION: Schema = Schema::closed(
    "QueryCalculationAggregation",
    &[
        TYPE,
        Field::required("field", FieldKind::String),
        Field::optional("value", FieldKind::Number),
    ],
);

static TOP_HITS: Schema = Schema::closed(
    "QueryTopHitsAggregation",
    &[
        TYPE,
        Field::required("size", FieldKind::Integer),
        Field::optional("name", FieldKind::String),
        Field::optional("hits", FieldKind::Model(QueryTopHitsAggregationResult::shape)),
    ],
);

static GROUP_BY: Schema = Schema::closed(
    "QueryGroupByAggregation",
    &[
        TYPE,
        Field::optional(
            "results",
            FieldKind::List(&FieldKind::Model(QueryGroupByAggregationResult::shape)),
        ),
    ],
);

static TERM_RESULT: Schema = Schema::closed(
    "QueryTermAggregationResult",
    &[
        Field::required("key", FieldKind::String),
        Field::required("matching_results", FieldKind::Integer),
        Field::optional("relevancy", FieldKind::Number),
        Field::optional("total_matching_documents", FieldKind::Integer),
        Field::optional("estimated_matching_documents", FieldKind::Integer),
        SUB_AGGREGATIONS,
    ],
);

static HISTOGRAM_RESULT: Schema = Schema::closed(
    "QueryHistogramAggregationResult",
    &[
        Field::required("key", FieldKind::Integer),
        Field::required("matching_results", FieldKind::Integer),
        SUB_AGGREGATIONS,
    ],
);

static TIMESLICE_RESULT: Schema = Schema::closed(
    "QueryTimesliceAggregationResult",
    &[
        Field::required("key_as_string", FieldKind::String),
        Field::required("key", FieldKind::Integer),
        Field::required("matching_results", FieldKind::Integer),
        SUB_AGGREGATIONS,
    ],
);

static TOP_HITS_RESULT: Schema = Schema::closed(
    "QueryTopHitsAggregationResult",
    &[
        Field::required("matching_results", FieldKind::Integer),
        Field::optional("hits", FieldKind::List(&FieldKind::Any)),
    ],
);

static GROUP_BY_RESULT: Schema = Schema::closed(
    "QueryGroupByAggregationResult",
    &[
        Field::required("key", FieldKind::String),
        Field::required("matching_results", FieldKind::Integer),
        Field::optional("relevancy", FieldKind::Number),
        Field::optional("total_matching_documents", FieldKind::Integer),
        Field::optional("estimated_matching_documents", FieldKind::Integer),
        SUB_AGGREGATIONS,
    ],
);

static AGGREGATIONS: UnionSchema = UnionSchema {
    name: "QueryAggregation",
    discriminator: "type",
    variants: &[
        Variant { tag: "filter", schema: &FILTER },
        Variant { tag: "term", schema: &TERM },
        Variant { tag: "histogram", schema: &HISTOGRAM },
        Variant { tag: "timeslice", schema: &TIMESLICE },
        Variant { tag: "nested", schema: &NESTED },
        Variant { tag: "min", schema: &CALCULATION },
        Variant { tag: "max", schema: &CALCULATION },
        Variant { tag: "sum", schema: &CALCULATION },
        Variant { tag: "average", schema: &CALCULATION },
        Variant { tag: "unique_count", schema: &CALCULATION },
        Variant { tag: "top_hits", schema: &TOP_HITS },
        Variant { tag: "group_by", schema: &GROUP_BY },
    ],
};

pub(crate) fn aggregation_shape() -> Shape {
    Shape::Union(&AGGREGATIONS)
}

/// An aggregation computed over query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryAggregation {
    /// Documents matching a filter.
    Filter(QueryFilterAggregation),
    /// Most frequent values of a field.
    Term(QueryTermAggregation),
    /// Numeric interval buckets.
    Histogram(QueryHistogramAggregation),
    /// Date interval buckets.
    Timeslice(QueryTimesliceAggregation),
    /// Aggregations over a nested document path.
    Nested(QueryNestedAggregation),
    /// Smallest field value.
    Min(QueryCalculationAggregation),
    /// Largest field value.
    Max(QueryCalculationAggregation),
    /// Sum of field values.
    Sum(QueryCalculationAggregation),
    /// Mean of field values.
    Average(QueryCalculationAggregation),
    /// Number of distinct field values.
    UniqueCount(QueryCalculationAggregation),
    /// Highest scoring documents.
    TopHits(QueryTopHitsAggregation),
    /// Groups of documents.
    GroupBy(QueryGroupByAggregation),
}

impl QueryAggregation {
    /// Returns the `type` discriminator of this aggregation.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Filter(_) => "filter",
            Self::Term(_) => "term",
            Self::Histogram(_) => "histogram",
            Self::Timeslice(_) => "timeslice",
            Self::Nested(_) => "nested",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::Sum(_) => "sum",
            Self::Average(_) => "average",
            Self::UniqueCount(_) => "unique_count",
            Self::TopHits(_) => "top_hits",
            Self::GroupBy(_) => "group_by",
        }
    }

    /// Returns the directly nested aggregations, or an empty slice.
    pub fn aggregations(&self) -> &[QueryAggregation] {
        let nested = match self {
            Self::Filter(agg) => &agg.aggregations,
            Self::Term(agg) => &agg.aggregations,
            Self::Histogram(agg) => &agg.aggregations,
            Self::Timeslice(agg) => &agg.aggregations,
            Self::Nested(agg) => &agg.aggregations,
            _ => return &[],
        };
        nested.as_deref().unwrap_or_default()
    }

    /// Returns the calculated value of a metric aggregation.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Min(calc)
            | Self::Max(calc)
            | Self::Sum(calc)
            | Self::Average(calc)
            | Self::UniqueCount(calc) => calc.value.as_ref().and_then(Number::as_f64),
            _ => None,
        }
    }
}

impl Model for QueryAggregation {
    fn shape() -> Shape {
        aggregation_shape()
    }
}

/// Filter aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilterAggregation {
    /// Filter expression.
    #[serde(rename = "match")]
    pub match_: String,

    /// Number of documents matching the filter.
    pub matching_results: i64,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

impl QueryFilterAggregation {
    /// Creates a filter aggregation without nested aggregations.
    pub fn new(match_: impl Into<String>, matching_results: i64) -> Self {
        Self {
            match_: match_.into(),
            matching_results,
            aggregations: None,
        }
    }

    /// Creates a builder.
    pub fn builder() -> QueryFilterAggregationBuilder {
        QueryFilterAggregationBuilder::default()
    }
}

/// Builder for [`QueryFilterAggregation`].
#[derive(Debug, Clone, Default)]
pub struct QueryFilterAggregationBuilder {
    match_: Option<String>,
    matching_results: Option<i64>,
    aggregations: Vec<QueryAggregation>,
}

impl QueryFilterAggregationBuilder {
    /// Sets the filter expression.
    pub fn match_(mut self, expression: impl Into<String>) -> Self {
        self.match_ = Some(expression.into());
        self
    }

    /// Sets the matching document count.
    pub fn matching_results(mut self, count: i64) -> Self {
        self.matching_results = Some(count);
        self
    }

    /// Adds a nested aggregation.
    pub fn aggregation(mut self, aggregation: QueryAggregation) -> Self {
        self.aggregations.push(aggregation);
        self
    }

    /// Builds the aggregation.
    pub fn build(self) -> WatsonResult<QueryFilterAggregation> {
        let match_ = self.match_.ok_or_else(|| WatsonError::missing_argument("match"))?;
        let matching_results = self
            .matching_results
            .ok_or_else(|| WatsonError::missing_argument("matching_results"))?;

        Ok(QueryFilterAggregation {
            match_,
            matching_results,
            aggregations: (!self.aggregations.is_empty()).then_some(self.aggregations),
        })
    }
}

/// Term aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTermAggregation {
    /// Field the terms are taken from.
    pub field: String,

    /// Maximum number of terms requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// Aggregation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Term value when the aggregation is itself a bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Number of matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,

    /// Term buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryTermAggregationResult>>,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

impl QueryTermAggregation {
    /// Creates a term aggregation over `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            count: None,
            name: None,
            key: None,
            matching_results: None,
            results: None,
            aggregations: None,
        }
    }
}

/// Histogram aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHistogramAggregation {
    /// Numeric field.
    pub field: String,

    /// Bucket width.
    pub interval: i64,

    /// Aggregation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Number of matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,

    /// Buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryHistogramAggregationResult>>,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

/// Timeslice aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTimesliceAggregation {
    /// Date field.
    pub field: String,

    /// Bucket width such as `1d`.
    pub interval: String,

    /// Aggregation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether anomaly detection was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<bool>,

    /// Number of matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,

    /// Buckets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryTimesliceAggregationResult>>,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

/// Nested aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryNestedAggregation {
    /// Document path the nested aggregations run over.
    pub path: String,

    /// Number of matching documents.
    pub matching_results: i64,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

/// Metric aggregation shared by `min`, `max`, `sum`, `average` and `unique_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCalculationAggregation {
    /// Numeric field.
    pub field: String,

    /// Calculated value, kept as sent so `3` stays `3` on re-encode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
}

impl QueryCalculationAggregation {
    /// Creates a metric aggregation result.
    ///
    /// A non-finite `value` has no JSON form and leaves the value unset.
    pub fn new(field: impl Into<String>, value: f64) -> Self {
        Self {
            field: field.into(),
            value: Number::from_f64(value),
        }
    }

    /// Creates a metric aggregation result with an integral value.
    pub fn with_count(field: impl Into<String>, value: u64) -> Self {
        Self {
            field: field.into(),
            value: Some(Number::from(value)),
        }
    }
}

/// Top hits aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTopHitsAggregation {
    /// Number of documents requested.
    pub size: i64,

    /// Aggregation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Returned documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<QueryTopHitsAggregationResult>,
}

/// Group-by aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryGroupByAggregation {
    /// Groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryGroupByAggregationResult>>,
}

/// Bucket of a term aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTermAggregationResult {
    /// Term value.
    pub key: String,

    /// Number of documents with this term.
    pub matching_results: i64,

    /// Relevancy score of the term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevancy: Option<Number>,

    /// Documents in the collection with this term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_matching_documents: Option<i64>,

    /// Expected number of matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_matching_documents: Option<i64>,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

impl Model for QueryTermAggregationResult {
    fn shape() -> Shape {
        Shape::Record(&TERM_RESULT)
    }
}

/// Bucket of a histogram aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHistogramAggregationResult {
    /// Lower bound of the bucket.
    pub key: i64,

    /// Number of documents in the bucket.
    pub matching_results: i64,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

impl Model for QueryHistogramAggregationResult {
    fn shape() -> Shape {
        Shape::Record(&HISTOGRAM_RESULT)
    }
}

/// Bucket of a timeslice aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTimesliceAggregationResult {
    /// Bucket start as a date string.
    pub key_as_string: String,

    /// Bucket start in epoch milliseconds.
    pub key: i64,

    /// Number of documents in the bucket.
    pub matching_results: i64,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

impl Model for QueryTimesliceAggregationResult {
    fn shape() -> Shape {
        Shape::Record(&TIMESLICE_RESULT)
    }
}

/// Documents returned by a top hits aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTopHitsAggregationResult {
    /// Number of matching documents.
    pub matching_results: i64,

    /// Free-form documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<Map<String, Value>>>,
}

impl Model for QueryTopHitsAggregationResult {
    fn shape() -> Shape {
        Shape::Record(&TOP_HITS_RESULT)
    }
}

/// A group of a group-by aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryGroupByAggregationResult {
    /// Group value.
    pub key: String,

    /// Number of documents in the group.
    pub matching_results: i64,

    /// Relevancy score of the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevancy: Option<Number>,

    /// Documents in the collection in this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_matching_documents: Option<i64>,

    /// Expected number of documents in the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_matching_documents: Option<i64>,

    /// Nested aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

impl Model for QueryGroupByAggregationResult {
    fn shape() -> Shape {
        Shape::Record(&GROUP_BY_RESULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marshal::decode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"type": "filter", "match": "enriched_text.entities.type:Person", "matching_results": 7}), "filter")]
    #[test_case(json!({"type": "term", "field": "author", "count": 2}), "term")]
    #[test_case(json!({"type": "histogram", "field": "price", "interval": 10}), "histogram")]
    #[test_case(json!({"type": "timeslice", "field": "published", "interval": "1d", "anomaly": false}), "timeslice")]
    #[test_case(json!({"type": "nested", "path": "enriched_text.entities", "matching_results": 4}), "nested")]
    #[test_case(json!({"type": "min", "field": "price", "value": 1.5}), "min")]
    #[test_case(json!({"type": "max", "field": "price", "value": 99.5}), "max")]
    #[test_case(json!({"type": "sum", "field": "price", "value": 120.25}), "sum")]
    #[test_case(json!({"type": "average", "field": "price", "value": 12.5}), "average")]
    #[test_case(json!({"type": "unique_count", "field": "author", "value": 3.5}), "unique_count")]
    #[test_case(json!({"type": "top_hits", "size": 1, "hits": {"matching_results": 1, "hits": [{"id": "d1"}]}}), "top_hits")]
    #[test_case(json!({"type": "group_by", "results": [{"key": "a", "matching_results": 2}]}), "group_by")]
    fn test_variant_dispatch(input: Value, kind: &str) {
        let aggregation: QueryAggregation = decode(input.clone()).unwrap();
        assert_eq!(aggregation.kind(), kind);
        assert_eq!(aggregation.to_value().unwrap(), input);
    }

    #[test]
    fn test_encode_emits_type_first() {
        let aggregation = QueryAggregation::Sum(QueryCalculationAggregation::new("price", 4.5));
        let encoded = aggregation.to_value().unwrap();
        let keys: Vec<_> = encoded.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["type", "field", "value"]);
    }

    #[test]
    fn test_unknown_variant() {
        match decode::<QueryAggregation>(json!({"type": "bogus", "field": "x"})) {
            Err(WatsonError::UnknownVariant {
                union,
                discriminator,
                ..
            }) => {
                assert_eq!(union, "QueryAggregation");
                assert_eq!(discriminator, "bogus");
            }
            other => panic!("Expected UnknownVariant, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type() {
        match decode::<QueryAggregation>(json!({"field": "x"})) {
            Err(WatsonError::MissingRequiredField { field, .. }) => assert_eq!(field, "type"),
            other => panic!("Expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test]
    fn test_variant_schema_is_strict() {
        let result = decode::<QueryAggregation>(json!({"type": "nested", "path": "p", "matching_results": 1, "field": "x"}));
        match result {
            Err(WatsonError::SchemaViolation { model, keys, .. }) => {
                assert_eq!(model, "QueryNestedAggregation");
                assert_eq!(keys, vec!["field".to_string()]);
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_aggregations() {
        let input = json!({
            "type": "filter",
            "match": "x",
            "matching_results": 5,
            "aggregations": [
                {"type": "term", "field": "y", "matching_results": 3, "key": "v"}
            ]
        });

        let aggregation: QueryAggregation = decode(input.clone()).unwrap();
        let QueryAggregation::Filter(filter) = &aggregation else {
            panic!("Expected filter, got {:?}", aggregation);
        };
        assert_eq!(filter.match_, "x");
        assert_eq!(filter.matching_results, 5);

        let nested = aggregation.aggregations();
        assert_eq!(nested.len(), 1);
        match &nested[0] {
            QueryAggregation::Term(term) => {
                assert_eq!(term.field, "y");
                assert_eq!(term.matching_results, Some(3));
                assert_eq!(term.key.as_deref(), Some("v"));
            }
            other => panic!("Expected term, got {:?}", other),
        }
        assert_eq!(aggregation.to_value().unwrap(), input);
    }

    #[test]
    fn test_nested_error_path() {
        let input = json!({
            "type": "term",
            "field": "author",
            "results": [
                {"key": "a", "matching_results": 1},
                {"key": "b", "matching_results": 1, "aggregations": [{"type": "histogram", "field": "p"}]}
            ]
        });

        match decode::<QueryAggregation>(input) {
            Err(WatsonError::MissingRequiredField { model, path, field }) => {
                assert_eq!(model, "QueryHistogramAggregation");
                assert_eq!(path, "$.results[1].aggregations[0]");
                assert_eq!(field, "interval");
            }
            other => panic!("Expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test_case(json!(3) ; "small integer")]
    #[test_case(json!(0) ; "zero")]
    #[test_case(json!(-2) ; "negative integer")]
    #[test_case(json!(9_007_199_254_740_993_u64) ; "integer beyond f64 precision")]
    #[test_case(json!(2.5) ; "fraction")]
    #[test_case(json!(3.0) ; "integral float")]
    fn test_metric_value_keeps_wire_number(value: Value) {
        let input = json!({"type": "sum", "field": "price", "value": value});
        let aggregation: QueryAggregation = decode(input.clone()).unwrap();
        assert_eq!(aggregation.to_value().unwrap(), input);
    }

    #[test_case(json!({"type": "term", "field": "author", "results": [{"key": "a", "matching_results": 2, "relevancy": 1}]}) ; "term relevancy")]
    #[test_case(json!({"type": "group_by", "results": [{"key": "a", "matching_results": 2, "relevancy": 0}]}) ; "group_by relevancy")]
    #[test_case(json!({"type": "term", "field": "author", "results": [{"key": "a", "matching_results": 2, "relevancy": 0.25}]}) ; "fractional relevancy")]
    fn test_relevancy_keeps_wire_number(input: Value) {
        let aggregation: QueryAggregation = decode(input.clone()).unwrap();
        assert_eq!(aggregation.to_value().unwrap(), input);
    }

    #[test]
    fn test_integral_value_encodes_without_fraction() {
        let aggregation = QueryAggregation::UniqueCount(QueryCalculationAggregation::with_count("author", 3));
        assert_eq!(
            aggregation.to_value().unwrap().to_string(),
            r#"{"type":"unique_count","field":"author","value":3}"#
        );
        assert_eq!(aggregation.value(), Some(3.0));
    }

    #[test]
    fn test_non_finite_value_is_unset() {
        let calculation = QueryCalculationAggregation::new("price", f64::NAN);
        assert_eq!(calculation.value, None);
    }

    #[test]
    fn test_metric_value() {
        let aggregation: QueryAggregation =
            decode(json!({"type": "average", "field": "price", "value": 2.5})).unwrap();
        assert_eq!(aggregation.value(), Some(2.5));
        assert!(aggregation.aggregations().is_empty());
    }

    #[test]
    fn test_filter_builder() {
        let filter = QueryFilterAggregation::builder()
            .match_("x")
            .matching_results(2)
            .aggregation(QueryAggregation::Term(QueryTermAggregation::new("y")))
            .build()
            .unwrap();
        assert_eq!(
            QueryAggregation::Filter(filter).to_value().unwrap(),
            json!({"type": "filter", "match": "x", "matching_results": 2, "aggregations": [{"type": "term", "field": "y"}]})
        );

        match QueryFilterAggregation::builder().match_("x").build() {
            Err(WatsonError::InvalidArgument { param, .. }) => {
                assert_eq!(param.as_deref(), Some("matching_results"));
            }
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }
}
