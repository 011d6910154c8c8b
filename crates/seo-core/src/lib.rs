//! seo-core: data model for the Serbian SEO text-analysis pipeline
//!
//! This crate provides the plain records exchanged between the analysis
//! engine (`seo-analysis`), the HTTP service (`seo-server`) and the CLI:
//! - TF-IDF and concept/topic results
//! - Search intent and prioritized keywords
//! - Author metrics and recommendations
//! - SEO output bundles and extracted page content

pub mod types;

pub use types::{
    AnalysisReport, AnalysisSummary, AuthorMetrics, AuthorRecommendations, ConceptVector,
    ContentMetadata, DocumentInput, ExtractedContent, IntentType, KeywordCategory, LsaAnalysis,
    ParseEnumError, PrioritizedKeyword, PrioritizedKeywords, RecommendationCategory, SearchIntent,
    SemanticMatch, SeoContext, SeoOutputs, SeoSource, TermScore, TfIdfAnalysis, TopicCluster,
};
