//! Discovery v2 collection, document and query models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::{WatsonError, WatsonResult};
use crate::marshal::{Field, FieldKind, Model, OpenModel, Properties, Schema, Shape};
use crate::types::aggregations::{aggregation_shape, QueryAggregation};

/// Values of [`DocumentAccepted::status`].
pub mod document_status {
    /// Document is being ingested.
    pub const PROCESSING: &str = "processing";
    /// Document is queued for ingestion.
    pub const PENDING: &str = "pending";

    pub(crate) const ALL: &[&str] = &[PROCESSING, PENDING];
}

/// Values of [`QueryResultMetadata::document_retrieval_source`].
pub mod retrieval_source {
    /// Result came from the search index.
    pub const SEARCH: &str = "search";
    /// Result came from a curation.
    pub const CURATION: &str = "curation";

    pub(crate) const ALL: &[&str] = &[SEARCH, CURATION];
}

/// Values of [`RetrievalDetails::document_retrieval_strategy`].
pub mod retrieval_strategy {
    /// No relevancy training applied.
    pub const UNTRAINED: &str = "untrained";
    /// Relevancy training applied.
    pub const RELEVANCY_TRAINING: &str = "relevancy_training";
    /// Continuous relevancy training applied.
    pub const CONTINUOUS_RELEVANCY_TRAINING: &str = "continuous_relevancy_training";

    pub(crate) const ALL: &[&str] = &[UNTRAINED, RELEVANCY_TRAINING, CONTINUOUS_RELEVANCY_TRAINING];
}

static COLLECTION: Schema = Schema::closed(
    "Collection",
    &[
        Field::optional("collection_id", FieldKind::String),
        Field::optional("name", FieldKind::String),
    ],
);

static LIST_COLLECTIONS_RESPONSE: Schema = Schema::closed(
    "ListCollectionsResponse",
    &[Field::optional(
        "collections",
        FieldKind::List(&FieldKind::Model(Collection::shape)),
    )],
);

static COLLECTION_DETAILS: Schema = Schema::closed(
    "CollectionDetails",
    &[
        Field::optional("collection_id", FieldKind::String),
        Field::required("name", FieldKind::String),
        Field::optional("description", FieldKind::String),
        Field::optional("created", FieldKind::DateTime),
        Field::optional("language", FieldKind::String),
        Field::optional(
            "enrichments",
            FieldKind::List(&FieldKind::Model(CollectionEnrichment::shape)),
        ),
    ],
);

static COLLECTION_ENRICHMENT: Schema = Schema::closed(
    "CollectionEnrichment",
    &[
        Field::optional("enrichment_id", FieldKind::String),
        Field::optional("fields", FieldKind::List(&FieldKind::String)),
    ],
);

static DOCUMENT_ACCEPTED: Schema = Schema::closed(
    "DocumentAccepted",
    &[
        Field::optional("document_id", FieldKind::String),
        Field::optional("status", FieldKind::Enum(document_status::ALL)),
    ],
);

static QUERY_RESPONSE: Schema = Schema::closed(
    "QueryResponse",
    &[
        Field::optional("matching_results", FieldKind::Integer),
        Field::optional("results", FieldKind::List(&FieldKind::Model(QueryResult::shape))),
        Field::optional("aggregations", FieldKind::List(&FieldKind::Model(aggregation_shape))),
        Field::optional("retrieval_details", FieldKind::Model(RetrievalDetails::shape)),
        Field::optional("suggested_query", FieldKind::String),
        Field::optional(
            "suggested_refinements",
            FieldKind::List(&FieldKind::Model(QuerySuggestedRefinement::shape)),
        ),
    ],
);

static QUERY_RESULT: Schema = Schema::open(
    "QueryResult",
    &[
        Field::required("document_id", FieldKind::String),
        Field::optional("metadata", FieldKind::Any),
        Field::required("result_metadata", FieldKind::Model(QueryResultMetadata::shape)),
        Field::optional(
            "document_passages",
            FieldKind::List(&FieldKind::Model(QueryResultPassage::shape)),
        ),
    ],
);

static QUERY_RESULT_METADATA: Schema = Schema::closed(
    "QueryResultMetadata",
    &[
        Field::optional(
            "document_retrieval_source",
            FieldKind::Enum(retrieval_source::ALL),
        ),
        Field::required("collection_id", FieldKind::String),
        Field::optional("confidence", FieldKind::Number),
    ],
);

static QUERY_RESULT_PASSAGE: Schema = Schema::closed(
    "QueryResultPassage",
    &[
        Field::optional("passage_text", FieldKind::String),
        Field::optional("start_offset", FieldKind::Integer),
        Field::optional("end_offset", FieldKind::Integer),
        Field::optional("field", FieldKind::String),
    ],
);

static RETRIEVAL_DETAILS: Schema = Schema::closed(
    "RetrievalDetails",
    &[Field::optional(
        "document_retrieval_strategy",
        FieldKind::Enum(retrieval_strategy::ALL),
    )],
);

static QUERY_SUGGESTED_REFINEMENT: Schema = Schema::closed(
    "QuerySuggestedRefinement",
    &[Field::optional("text", FieldKind::String)],
);

/// A collection summary as listed by the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Collection name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Collection {
    /// Creates a collection summary with both fields set.
    pub fn new(collection_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            collection_id: Some(collection_id.into()),
            name: Some(name.into()),
        }
    }
}

impl Model for Collection {
    fn shape() -> Shape {
        Shape::Record(&COLLECTION)
    }
}

/// Response of the list collections call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCollectionsResponse {
    /// Collections in the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<Collection>>,
}

impl ListCollectionsResponse {
    /// Returns the number of collections.
    pub fn len(&self) -> usize {
        self.collections.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if no collections were listed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a collection by ID.
    pub fn get(&self, collection_id: &str) -> Option<&Collection> {
        self.collections
            .as_ref()?
            .iter()
            .find(|c| c.collection_id.as_deref() == Some(collection_id))
    }
}

impl Model for ListCollectionsResponse {
    fn shape() -> Shape {
        Shape::Record(&LIST_COLLECTIONS_RESPONSE)
    }
}

/// Full details of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetails {
    /// Collection ID, assigned by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Collection name.
    pub name: String,

    /// Collection description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation time as an RFC 3339 string, kept in its wire spelling.
    ///
    /// Use [`created_at`](Self::created_at) for the parsed time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Language code of the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Enrichments applied to the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichments: Option<Vec<CollectionEnrichment>>,
}

impl CollectionDetails {
    /// Creates collection details with only the name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            collection_id: None,
            name: name.into(),
            description: None,
            created: None,
            language: None,
            enrichments: None,
        }
    }

    /// Creates a builder.
    pub fn builder() -> CollectionDetailsBuilder {
        CollectionDetailsBuilder::default()
    }

    /// Returns the creation time in UTC, or `None` if unset or unparseable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let created = self.created.as_deref()?;
        DateTime::parse_from_rfc3339(created)
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }
}

impl Model for CollectionDetails {
    fn shape() -> Shape {
        Shape::Record(&COLLECTION_DETAILS)
    }
}

/// Builder for [`CollectionDetails`].
#[derive(Debug, Clone, Default)]
pub struct CollectionDetailsBuilder {
    collection_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    created: Option<String>,
    language: Option<String>,
    enrichments: Vec<CollectionEnrichment>,
}

impl CollectionDetailsBuilder {
    /// Sets the collection ID.
    pub fn collection_id(mut self, id: impl Into<String>) -> Self {
        self.collection_id = Some(id.into());
        self
    }

    /// Sets the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the creation time, written with a `Z` suffix.
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        self
    }

    /// Sets the language.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Adds an enrichment.
    pub fn enrichment(mut self, enrichment: CollectionEnrichment) -> Self {
        self.enrichments.push(enrichment);
        self
    }

    /// Builds the collection details.
    pub fn build(self) -> WatsonResult<CollectionDetails> {
        let name = self.name.ok_or_else(|| WatsonError::missing_argument("name"))?;

        Ok(CollectionDetails {
            collection_id: self.collection_id,
            name,
            description: self.description,
            created: self.created,
            language: self.language,
            enrichments: (!self.enrichments.is_empty()).then_some(self.enrichments),
        })
    }
}

/// An enrichment applied to collection fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnrichment {
    /// Enrichment ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment_id: Option<String>,

    /// Fields the enrichment is applied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl CollectionEnrichment {
    /// Creates an enrichment for the given fields.
    pub fn new<I, S>(enrichment_id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enrichment_id: Some(enrichment_id.into()),
            fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }
}

impl Model for CollectionEnrichment {
    fn shape() -> Shape {
        Shape::Record(&COLLECTION_ENRICHMENT)
    }
}

/// Acknowledgement of a document add or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAccepted {
    /// Document ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Ingestion status, see [`document_status`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl DocumentAccepted {
    /// Returns true if the document is still being ingested.
    pub fn is_processing(&self) -> bool {
        self.status.as_deref() == Some(document_status::PROCESSING)
    }
}

impl Model for DocumentAccepted {
    fn shape() -> Shape {
        Shape::Record(&DOCUMENT_ACCEPTED)
    }
}

/// Response of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Number of matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,

    /// Matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryResult>>,

    /// Aggregations computed over the matching documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,

    /// How documents were retrieved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_details: Option<RetrievalDetails>,

    /// Spelling-corrected query suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_query: Option<String>,

    /// Suggested query refinements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_refinements: Option<Vec<QuerySuggestedRefinement>>,
}

impl QueryResponse {
    /// Returns the matching documents, or an empty slice.
    pub fn results(&self) -> &[QueryResult] {
        self.results.as_deref().unwrap_or_default()
    }

    /// Returns the top-level aggregations, or an empty slice.
    pub fn aggregations(&self) -> &[QueryAggregation] {
        self.aggregations.as_deref().unwrap_or_default()
    }
}

impl Model for QueryResponse {
    fn shape() -> Shape {
        Shape::Record(&QUERY_RESPONSE)
    }
}

/// A single query result.
///
/// Documents carry whatever fields were ingested, so every key the model does
/// not declare is kept in the extension bag and re-emitted on encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Document ID.
    pub document_id: String,

    /// Document metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    /// Retrieval metadata.
    pub result_metadata: QueryResultMetadata,

    /// Passages matching the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_passages: Option<Vec<QueryResultPassage>>,

    #[serde(flatten)]
    properties: Properties,
}

impl QueryResult {
    /// Creates a result with an empty extension bag.
    pub fn new(document_id: impl Into<String>, result_metadata: QueryResultMetadata) -> Self {
        Self {
            document_id: document_id.into(),
            metadata: None,
            result_metadata,
            document_passages: None,
            properties: Properties::new(),
        }
    }

    /// Creates a builder.
    pub fn builder() -> QueryResultBuilder {
        QueryResultBuilder::default()
    }
}

impl Model for QueryResult {
    fn shape() -> Shape {
        Shape::Record(&QUERY_RESULT)
    }
}

impl OpenModel for QueryResult {
    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

/// Builder for [`QueryResult`].
#[derive(Debug, Clone, Default)]
pub struct QueryResultBuilder {
    document_id: Option<String>,
    metadata: Option<Map<String, Value>>,
    result_metadata: Option<QueryResultMetadata>,
    document_passages: Vec<QueryResultPassage>,
    properties: Properties,
}

impl QueryResultBuilder {
    /// Sets the document ID.
    pub fn document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Sets the document metadata.
    pub fn metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the retrieval metadata.
    pub fn result_metadata(mut self, metadata: QueryResultMetadata) -> Self {
        self.result_metadata = Some(metadata);
        self
    }

    /// Adds a passage.
    pub fn passage(mut self, passage: QueryResultPassage) -> Self {
        self.document_passages.push(passage);
        self
    }

    /// Adds an extra document field.
    pub fn property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Builds the result.
    ///
    /// Extra fields are checked the same way as [`OpenModel::set_properties`].
    pub fn build(self) -> WatsonResult<QueryResult> {
        let document_id = self
            .document_id
            .ok_or_else(|| WatsonError::missing_argument("document_id"))?;
        let result_metadata = self
            .result_metadata
            .ok_or_else(|| WatsonError::missing_argument("result_metadata"))?;

        let mut result = QueryResult::new(document_id, result_metadata);
        result.metadata = self.metadata;
        result.document_passages =
            (!self.document_passages.is_empty()).then_some(self.document_passages);
        result.set_properties(self.properties)?;
        Ok(result)
    }
}

/// Retrieval metadata of a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResultMetadata {
    /// Where the result came from, see [`retrieval_source`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_retrieval_source: Option<String>,

    /// Collection holding the document.
    pub collection_id: String,

    /// Confidence score, present when relevancy training is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Number>,
}

impl QueryResultMetadata {
    /// Creates metadata for a document in `collection_id`.
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            document_retrieval_source: None,
            collection_id: collection_id.into(),
            confidence: None,
        }
    }
}

impl Model for QueryResultMetadata {
    fn shape() -> Shape {
        Shape::Record(&QUERY_RESULT_METADATA)
    }
}

/// A passage within a query result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResultPassage {
    /// Passage text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passage_text: Option<String>,

    /// Start offset in the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<i64>,

    /// End offset in the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_offset: Option<i64>,

    /// Source field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Model for QueryResultPassage {
    fn shape() -> Shape {
        Shape::Record(&QUERY_RESULT_PASSAGE)
    }
}

/// Retrieval strategy details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalDetails {
    /// Strategy used, see [`retrieval_strategy`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_retrieval_strategy: Option<String>,
}

impl Model for RetrievalDetails {
    fn shape() -> Shape {
        Shape::Record(&RETRIEVAL_DETAILS)
    }
}

/// A suggested refinement of the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySuggestedRefinement {
    /// Refinement text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Model for QuerySuggestedRefinement {
    fn shape() -> Shape {
        Shape::Record(&QUERY_SUGGESTED_REFINEMENT)
    }
}
