//! Natural Language Understanding v1 analysis models.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::{WatsonError, WatsonResult};
use crate::marshal::{Field, FieldKind, Model, Schema, Shape};

/// Values of [`DocumentSentimentResults::label`].
pub mod sentiment_label {
    /// Positive sentiment.
    pub const POSITIVE: &str = "positive";
    /// Neutral sentiment.
    pub const NEUTRAL: &str = "neutral";
    /// Negative sentiment.
    pub const NEGATIVE: &str = "negative";

    pub(crate) const ALL: &[&str] = &[POSITIVE, NEUTRAL, NEGATIVE];
}

static ANALYSIS_RESULTS: Schema = Schema::closed(
    "AnalysisResults",
    &[
        Field::optional("language", FieldKind::String),
        Field::optional("analyzed_text", FieldKind::String),
        Field::optional("retrieved_url", FieldKind::String),
        Field::optional("usage", FieldKind::Model(AnalysisResultsUsage::shape)),
        Field::optional("concepts", FieldKind::List(&FieldKind::Model(ConceptsResult::shape))),
        Field::optional("entities", FieldKind::List(&FieldKind::Model(EntitiesResult::shape))),
        Field::optional("keywords", FieldKind::List(&FieldKind::Model(KeywordsResult::shape))),
        Field::optional(
            "categories",
            FieldKind::List(&FieldKind::Model(CategoriesResult::shape)),
        ),
        Field::optional("sentiment", FieldKind::Model(SentimentResult::shape)),
    ],
);

static ANALYSIS_RESULTS_USAGE: Schema = Schema::closed(
    "AnalysisResultsUsage",
    &[
        Field::optional("features", FieldKind::Integer),
        Field::optional("text_characters", FieldKind::Integer),
        Field::optional("text_units", FieldKind::Integer),
    ],
);

static CONCEPTS_RESULT: Schema = Schema::closed(
    "ConceptsResult",
    &[
        Field::optional("text", FieldKind::String),
        Field::optional("relevance", FieldKind::Number),
        Field::optional("dbpedia_resource", FieldKind::String),
    ],
);

static ENTITIES_RESULT: Schema = Schema::closed(
    "EntitiesResult",
    &[
        Field::optional("type", FieldKind::String),
        Field::optional("text", FieldKind::String),
        Field::optional("relevance", FieldKind::Number),
        Field::optional("confidence", FieldKind::Number),
        Field::optional("count", FieldKind::Integer),
        Field::optional("sentiment", FieldKind::Model(FeatureSentimentResults::shape)),
    ],
);

static KEYWORDS_RESULT: Schema = Schema::closed(
    "KeywordsResult",
    &[
        Field::optional("count", FieldKind::Integer),
        Field::optional("relevance", FieldKind::Number),
        Field::optional("text", FieldKind::String),
        Field::optional("sentiment", FieldKind::Model(FeatureSentimentResults::shape)),
    ],
);

static CATEGORIES_RESULT: Schema = Schema::closed(
    "CategoriesResult",
    &[
        Field::optional("label", FieldKind::String),
        Field::optional("score", FieldKind::Number),
    ],
);

static FEATURE_SENTIMENT_RESULTS: Schema = Schema::closed(
    "FeatureSentimentResults",
    &[Field::optional("score", FieldKind::Number)],
);

static SENTIMENT_RESULT: Schema = Schema::closed(
    "SentimentResult",
    &[
        Field::optional("document", FieldKind::Model(DocumentSentimentResults::shape)),
        Field::optional(
            "targets",
            FieldKind::List(&FieldKind::Model(TargetedSentimentResults::shape)),
        ),
    ],
);

static DOCUMENT_SENTIMENT_RESULTS: Schema = Schema::closed(
    "DocumentSentimentResults",
    &[
        Field::optional("label", FieldKind::Enum(sentiment_label::ALL)),
        Field::optional("score", FieldKind::Number),
    ],
);

static TARGETED_SENTIMENT_RESULTS: Schema = Schema::closed(
    "TargetedSentimentResults",
    &[
        Field::required("text", FieldKind::String),
        Field::optional("score", FieldKind::Number),
    ],
);

static FEATURES: Schema = Schema::closed(
    "Features",
    &[
        Field::optional("concepts", FieldKind::Model(ConceptsOptions::shape)),
        Field::optional("entities", FieldKind::Model(EntitiesOptions::shape)),
        Field::optional("keywords", FieldKind::Model(KeywordsOptions::shape)),
        Field::optional("sentiment", FieldKind::Model(SentimentOptions::shape)),
        Field::optional("categories", FieldKind::Model(CategoriesOptions::shape)),
    ],
);

static CONCEPTS_OPTIONS: Schema = Schema::closed(
    "ConceptsOptions",
    &[Field::optional("limit", FieldKind::Integer)],
);

static ENTITIES_OPTIONS: Schema = Schema::closed(
    "EntitiesOptions",
    &[
        Field::optional("limit", FieldKind::Integer),
        Field::optional("model", FieldKind::String),
        Field::optional("sentiment", FieldKind::Boolean),
        Field::optional("emotion", FieldKind::Boolean),
    ],
);

static KEYWORDS_OPTIONS: Schema = Schema::closed(
    "KeywordsOptions",
    &[
        Field::optional("limit", FieldKind::Integer),
        Field::optional("sentiment", FieldKind::Boolean),
        Field::optional("emotion", FieldKind::Boolean),
    ],
);

static SENTIMENT_OPTIONS: Schema = Schema::closed(
    "SentimentOptions",
    &[
        Field::optional("document", FieldKind::Boolean),
        Field::optional("targets", FieldKind::List(&FieldKind::String)),
    ],
);

static CATEGORIES_OPTIONS: Schema = Schema::closed(
    "CategoriesOptions",
    &[
        Field::optional("limit", FieldKind::Integer),
        Field::optional("model", FieldKind::String),
    ],
);

/// Results of an analyze call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Language of the analyzed text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Text that was analyzed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_text: Option<String>,

    /// URL of the analyzed page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieved_url: Option<String>,

    /// Billing usage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<AnalysisResultsUsage>,

    /// Concepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Vec<ConceptsResult>>,

    /// Entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<EntitiesResult>>,

    /// Keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<KeywordsResult>>,

    /// Categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoriesResult>>,

    /// Sentiment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentResult>,
}

impl AnalysisResults {
    /// Returns the entities with the given type.
    pub fn entities_of_type<'a>(
        &'a self,
        type_: &'a str,
    ) -> impl Iterator<Item = &'a EntitiesResult> + 'a {
        self.entities
            .iter()
            .flatten()
            .filter(move |e| e.type_.as_deref() == Some(type_))
    }

    /// Returns the document sentiment label, if document sentiment was requested.
    pub fn document_sentiment(&self) -> Option<&str> {
        self.sentiment
            .as_ref()?
            .document
            .as_ref()?
            .label
            .as_deref()
    }
}

impl Model for AnalysisResults {
    fn shape() -> Shape {
        Shape::Record(&ANALYSIS_RESULTS)
    }
}

/// Usage counts of an analyze call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResultsUsage {
    /// Number of features used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<i64>,

    /// Number of text characters processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_characters: Option<i64>,

    /// Number of billed text units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_units: Option<i64>,
}

impl Model for AnalysisResultsUsage {
    fn shape() -> Shape {
        Shape::Record(&ANALYSIS_RESULTS_USAGE)
    }
}

/// A concept found in the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptsResult {
    /// Concept name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Relevance score between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<Number>,

    /// Link to the DBpedia resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbpedia_resource: Option<String>,
}

impl Model for ConceptsResult {
    fn shape() -> Shape {
        Shape::Record(&CONCEPTS_RESULT)
    }
}

/// An entity found in the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitiesResult {
    /// Entity type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Entity text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Relevance score between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<Number>,

    /// Confidence in the entity identification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Number>,

    /// Number of mentions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// Targeted sentiment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<FeatureSentimentResults>,
}

impl Model for EntitiesResult {
    fn shape() -> Shape {
        Shape::Record(&ENTITIES_RESULT)
    }
}

/// A keyword found in the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordsResult {
    /// Number of occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// Relevance score between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<Number>,

    /// Keyword text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Targeted sentiment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<FeatureSentimentResults>,
}

impl Model for KeywordsResult {
    fn shape() -> Shape {
        Shape::Record(&KEYWORDS_RESULT)
    }
}

/// A category of the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResult {
    /// Hierarchical label such as `/technology and computing/software`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Score between 0 and 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Number>,
}

impl Model for CategoriesResult {
    fn shape() -> Shape {
        Shape::Record(&CATEGORIES_RESULT)
    }
}

/// Sentiment of an entity or keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSentimentResults {
    /// Score from -1 (negative) to 1 (positive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Number>,
}

impl Model for FeatureSentimentResults {
    fn shape() -> Shape {
        Shape::Record(&FEATURE_SENTIMENT_RESULTS)
    }
}

/// Document and targeted sentiment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Sentiment of the whole document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentSentimentResults>,

    /// Sentiment of each requested target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<TargetedSentimentResults>>,
}

impl Model for SentimentResult {
    fn shape() -> Shape {
        Shape::Record(&SENTIMENT_RESULT)
    }
}

/// Sentiment of the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSentimentResults {
    /// Label, see [`sentiment_label`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Score from -1 (negative) to 1 (positive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Number>,
}

impl Model for DocumentSentimentResults {
    fn shape() -> Shape {
        Shape::Record(&DOCUMENT_SENTIMENT_RESULTS)
    }
}

/// Sentiment towards one target phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetedSentimentResults {
    /// Target phrase.
    pub text: String,

    /// Score from -1 (negative) to 1 (positive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Number>,
}

impl TargetedSentimentResults {
    /// Creates a targeted sentiment result.
    ///
    /// A non-finite `score` leaves the score unset.
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score: Number::from_f64(score),
        }
    }
}

impl Model for TargetedSentimentResults {
    fn shape() -> Shape {
        Shape::Record(&TARGETED_SENTIMENT_RESULTS)
    }
}

/// Features requested from an analyze call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Concept extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts: Option<ConceptsOptions>,

    /// Entity extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<EntitiesOptions>,

    /// Keyword extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordsOptions>,

    /// Sentiment analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentOptions>,

    /// Text classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoriesOptions>,
}

impl Features {
    /// Creates a builder.
    pub fn builder() -> FeaturesBuilder {
        FeaturesBuilder::default()
    }

    /// Returns true if no feature is requested.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_none()
            && self.entities.is_none()
            && self.keywords.is_none()
            && self.sentiment.is_none()
            && self.categories.is_none()
    }
}

impl Model for Features {
    fn shape() -> Shape {
        Shape::Record(&FEATURES)
    }
}

/// Builder for [`Features`].
#[derive(Debug, Clone, Default)]
pub struct FeaturesBuilder {
    features: Features,
}

impl FeaturesBuilder {
    /// Requests concepts.
    pub fn concepts(mut self, options: ConceptsOptions) -> Self {
        self.features.concepts = Some(options);
        self
    }

    /// Requests entities.
    pub fn entities(mut self, options: EntitiesOptions) -> Self {
        self.features.entities = Some(options);
        self
    }

    /// Requests keywords.
    pub fn keywords(mut self, options: KeywordsOptions) -> Self {
        self.features.keywords = Some(options);
        self
    }

    /// Requests sentiment.
    pub fn sentiment(mut self, options: SentimentOptions) -> Self {
        self.features.sentiment = Some(options);
        self
    }

    /// Requests categories.
    pub fn categories(mut self, options: CategoriesOptions) -> Self {
        self.features.categories = Some(options);
        self
    }

    /// Builds the feature set.
    ///
    /// The service rejects an analyze call without features, so an empty set
    /// is an error here.
    pub fn build(self) -> WatsonResult<Features> {
        if self.features.is_empty() {
            return Err(WatsonError::invalid_argument(
                "at least one feature must be requested",
                "features",
            ));
        }
        Ok(self.features)
    }
}

/// Concept extraction options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptsOptions {
    /// Maximum number of concepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl ConceptsOptions {
    /// Limits the number of concepts returned.
    pub fn with_limit(limit: i64) -> Self {
        Self { limit: Some(limit) }
    }
}

impl Model for ConceptsOptions {
    fn shape() -> Shape {
        Shape::Record(&CONCEPTS_OPTIONS)
    }
}

/// Entity extraction options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitiesOptions {
    /// Maximum number of entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Custom model ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Whether to return sentiment per entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<bool>,

    /// Whether to return emotion per entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<bool>,
}

impl Model for EntitiesOptions {
    fn shape() -> Shape {
        Shape::Record(&ENTITIES_OPTIONS)
    }
}

/// Keyword extraction options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordsOptions {
    /// Maximum number of keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Whether to return sentiment per keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<bool>,

    /// Whether to return emotion per keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<bool>,
}

impl Model for KeywordsOptions {
    fn shape() -> Shape {
        Shape::Record(&KEYWORDS_OPTIONS)
    }
}

/// Sentiment options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentOptions {
    /// Whether to return document sentiment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<bool>,

    /// Target phrases to score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
}

impl Model for SentimentOptions {
    fn shape() -> Shape {
        Shape::Record(&SENTIMENT_OPTIONS)
    }
}

/// Classification options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesOptions {
    /// Maximum number of categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Custom model ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Model for CategoriesOptions {
    fn shape() -> Shape {
        Shape::Record(&CATEGORIES_OPTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DecodeOptions, EnumValidation};
    use crate::marshal::{decode, decode_with};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn test_entity_type_field() {
        let input = json!({"type": "Person", "text": "Ada Lovelace", "relevance": 0.93, "count": 2});
        let entity: EntitiesResult = decode(input.clone()).unwrap();

        assert_eq!(entity.type_.as_deref(), Some("Person"));
        assert_eq!(entity.count, Some(2));
        assert_eq!(entity.to_value().unwrap(), input);
    }

    #[test]
    fn test_analysis_results_helpers() {
        let results: AnalysisResults = decode(json!({
            "language": "en",
            "entities": [
                {"type": "Person", "text": "Ada"},
                {"type": "Location", "text": "London"},
                {"type": "Person", "text": "Charles"}
            ],
            "sentiment": {"document": {"label": "positive", "score": 0.62}}
        }))
        .unwrap();

        let people: Vec<_> = results
            .entities_of_type("Person")
            .filter_map(|e| e.text.as_deref())
            .collect();
        assert_eq!(people, vec!["Ada", "Charles"]);
        assert_eq!(results.document_sentiment(), Some("positive"));
    }

    #[test]
    fn test_targeted_sentiment_requires_text() {
        let input = json!({"targets": [{"text": "stocks", "score": 0.5}, {"score": -0.25}]});

        match decode::<SentimentResult>(input) {
            Err(WatsonError::MissingRequiredField { path, field, .. }) => {
                assert_eq!(path, "$.targets[1]");
                assert_eq!(field, "text");
            }
            other => panic!("Expected MissingRequiredField, got {:?}", other),
        }
    }

    #[test]
    fn test_sentiment_label_strict_mode() {
        let input = json!({"document": {"label": "ecstatic", "score": 0.95}});
        let options = DecodeOptions {
            enum_validation: EnumValidation::Strict,
            ..DecodeOptions::default()
        };

        let lenient: SentimentResult = decode(input.clone()).unwrap();
        assert_eq!(
            lenient.document.and_then(|d| d.label).as_deref(),
            Some("ecstatic")
        );

        match decode_with::<SentimentResult>(input, &options) {
            Err(WatsonError::InvalidValue { path, allowed, .. }) => {
                assert_eq!(path, "$.document.label");
                assert_eq!(allowed.len(), 3);
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test_case(json!({"text": "IBM", "relevance": 1, "confidence": 1}) ; "integral relevance and confidence")]
    #[test_case(json!({"text": "IBM", "relevance": 0, "confidence": 0.5}) ; "zero relevance")]
    #[test_case(json!({"text": "IBM", "relevance": 0.97, "confidence": 1.0}) ; "integral float confidence")]
    fn test_entity_scores_keep_wire_number(input: Value) {
        let entity: EntitiesResult = decode(input.clone()).unwrap();
        assert_eq!(entity.to_value().unwrap(), input);
    }

    #[test_case(json!({"document": {"label": "neutral", "score": 0}}) ; "zero document score")]
    #[test_case(json!({"document": {"label": "negative", "score": -1}}) ; "negative integral score")]
    #[test_case(json!({"targets": [{"text": "stocks", "score": 1}]}) ; "integral target score")]
    fn test_sentiment_scores_keep_wire_number(input: Value) {
        let sentiment: SentimentResult = decode(input.clone()).unwrap();
        assert_eq!(sentiment.to_value().unwrap(), input);
    }

    #[test]
    fn test_integral_scores_encode_without_fraction() {
        let results: AnalysisResults = decode(json!({
            "keywords": [{"text": "lab", "relevance": 1}],
            "concepts": [{"text": "Dublin", "relevance": 0}],
            "categories": [{"label": "/news", "score": 1}]
        }))
        .unwrap();
        assert_eq!(
            results.to_value().unwrap().to_string(),
            r#"{"concepts":[{"text":"Dublin","relevance":0}],"keywords":[{"relevance":1,"text":"lab"}],"categories":[{"label":"/news","score":1}]}"#
        );
    }

    #[test]
    fn test_type_mismatch_is_serialization_error() {
        let result = decode::<AnalysisResultsUsage>(json!({"text_units": "one"}));
        assert!(matches!(result, Err(WatsonError::Serialization { .. })));
    }

    #[test]
    fn test_type_mismatch_names_nested_path() {
        let result = decode::<AnalysisResults>(json!({
            "entities": [{"text": "IBM"}, {"text": "Dublin", "relevance": "high"}]
        }));

        match result {
            Err(WatsonError::Serialization { message }) => assert_eq!(
                message,
                r#"expected number at $.entities[1].relevance in EntitiesResult, found string "high""#
            ),
            other => panic!("Expected Serialization, got {:?}", other),
        }
    }

    #[test]
    fn test_features_builder() {
        let features = Features::builder()
            .keywords(KeywordsOptions {
                limit: Some(3),
                sentiment: Some(true),
                ..KeywordsOptions::default()
            })
            .concepts(ConceptsOptions::with_limit(5))
            .build()
            .unwrap();

        assert_eq!(
            features.to_value().unwrap(),
            json!({"concepts": {"limit": 5}, "keywords": {"limit": 3, "sentiment": true}})
        );
    }

    #[test]
    fn test_features_builder_rejects_empty_set() {
        match Features::builder().build() {
            Err(WatsonError::InvalidArgument { param, .. }) => {
                assert_eq!(param.as_deref(), Some("features"));
            }
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_features_reject_unknown_option() {
        let result = decode::<Features>(json!({"keywords": {"limit": 3, "mentions": true}}));
        match result {
            Err(WatsonError::SchemaViolation { model, path, keys }) => {
                assert_eq!(model, "KeywordsOptions");
                assert_eq!(path, "$.keywords");
                assert_eq!(keys, vec!["mentions".to_string()]);
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }
}
