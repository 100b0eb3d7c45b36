//! Typed Watson models.
//!
//! Each model pairs a serde-derived struct with a static schema table that the
//! decode engines check before typed conversion.

pub mod aggregations;
pub mod discovery;
pub mod nlu;

pub use aggregations::{
    QueryAggregation, QueryCalculationAggregation, QueryFilterAggregation,
    QueryFilterAggregationBuilder, QueryGroupByAggregation, QueryGroupByAggregationResult,
    QueryHistogramAggregation, QueryHistogramAggregationResult, QueryNestedAggregation,
    QueryTermAggregation, QueryTermAggregationResult, QueryTimesliceAggregation,
    QueryTimesliceAggregationResult, QueryTopHitsAggregation, QueryTopHitsAggregationResult,
};
pub use discovery::{
    Collection, CollectionDetails, CollectionDetailsBuilder, CollectionEnrichment,
    DocumentAccepted, ListCollectionsResponse, QueryResponse, QueryResult, QueryResultBuilder,
    QueryResultMetadata, QueryResultPassage, QuerySuggestedRefinement, RetrievalDetails,
};
pub use nlu::{
    AnalysisResults, AnalysisResultsUsage, CategoriesOptions, CategoriesResult, ConceptsOptions,
    ConceptsResult, DocumentSentimentResults, EntitiesOptions, EntitiesResult, FeatureSentimentResults,
    Features, FeaturesBuilder, KeywordsOptions, KeywordsResult, SentimentOptions, SentimentResult,
    TargetedSentimentResults,
};
