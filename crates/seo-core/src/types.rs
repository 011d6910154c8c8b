//! Core data types for the SEO text-analysis pipeline.
//!
//! Every record here is created fresh per analysis call and discarded once the
//! response is built. The types are plain data: the algorithms that produce
//! them live in `seo-analysis`, the HTTP surface in `seo-server`.
//!
//! All wire-facing types serialize with camelCase field names, which is the
//! contract the API/UI layer consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Pipeline Input
// ============================================================================

/// Text submitted for analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Article body (plain prose, sentence punctuation preserved).
    pub text: String,

    /// Optional headline. When present it is joined in front of the body
    /// for the corpus-level analyses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DocumentInput {
    /// Creates an input without a title.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            title: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns `"{title}. {text}"` when a non-empty title is set, else the body.
    pub fn full_text(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => format!("{}. {}", title, self.text),
            _ => self.text.clone(),
        }
    }
}

// ============================================================================
// TF-IDF
// ============================================================================

/// TF-IDF statistics for one unique token of the analyzed document.
///
/// Invariants: `tfidf == tf * idf`, `tf` in `[0, 1]`, `idf >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermScore {
    pub word: String,
    pub tf: f64,
    pub idf: f64,
    pub tfidf: f64,
}

/// Result of the TF-IDF engine for a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TfIdfAnalysis {
    /// Top terms by TF-IDF, descending.
    pub semantic_core: Vec<TermScore>,
    /// Recurring bigrams and trigrams, most frequent first.
    pub key_phrases: Vec<String>,
    /// Static expansion of the leading terms.
    pub concept_cloud: Vec<String>,
    pub total_words: usize,
    pub unique_words: usize,
    pub average_word_length: f64,
    /// 0-100, higher is easier to read.
    pub readability_score: f64,
}

// ============================================================================
// Concepts and Topics
// ============================================================================

/// A semantic-core term with its related concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptVector {
    pub concept: String,
    /// TF-IDF score of the term.
    pub weight: f64,
    /// At most 8 related concepts, deduplicated.
    pub related_terms: Vec<String>,
}

/// A pair of semantic-core terms judged similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticMatch {
    pub term1: String,
    pub term2: String,
    pub similarity: f64,
}

/// A named topic that the document's vocabulary maps onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    pub name: String,
    pub terms: Vec<String>,
    /// Sum of member weights divided by the total concept count.
    pub strength: f64,
}

/// Output of the concept/topic clusterer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LsaAnalysis {
    pub concept_vectors: Vec<ConceptVector>,
    pub semantic_similarity: Vec<SemanticMatch>,
    pub topic_clusters: Vec<TopicCluster>,
    pub concept_strength: f64,
}

impl LsaAnalysis {
    /// Names of the identified clusters, strongest first.
    pub fn topic_names(&self) -> Vec<String> {
        self.topic_clusters.iter().map(|c| c.name.clone()).collect()
    }
}

// ============================================================================
// Search Intent
// ============================================================================

/// Presumed purpose behind a search query.
///
/// Declaration order is the tie-break priority: when two categories score
/// the same, the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    Informational,
    Commercial,
    Transactional,
    Navigational,
}

impl IntentType {
    /// All categories in tie-break priority order.
    pub const ALL: [IntentType; 4] = [
        IntentType::Informational,
        IntentType::Commercial,
        IntentType::Transactional,
        IntentType::Navigational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Commercial => "commercial",
            Self::Transactional => "transactional",
            Self::Navigational => "navigational",
        }
    }

    /// Position in [`IntentType::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "informational" => Ok(Self::Informational),
            "commercial" => Ok(Self::Commercial),
            "transactional" => Ok(Self::Transactional),
            "navigational" => Ok(Self::Navigational),
            other => Err(ParseEnumError {
                kind: "intent type",
                value: other.to_string(),
            }),
        }
    }
}

/// Classified search intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    #[serde(rename = "type")]
    pub intent_type: IntentType,
    /// Winning score divided by the total score, or 0.5 for the neutral default.
    pub confidence: f64,
    /// Up to 5 matched cue words.
    pub indicators: Vec<String>,
}

impl SearchIntent {
    /// "Assume informational when unsure" default.
    pub fn neutral() -> Self {
        Self {
            intent_type: IntentType::Informational,
            confidence: 0.5,
            indicators: Vec::new(),
        }
    }
}

// ============================================================================
// Keywords
// ============================================================================

/// Priority bucket of a keyword within its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Primary,
    Secondary,
    Tertiary,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked keyword candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedKeyword {
    pub term: String,
    /// 0-100.
    pub score: u8,
    pub category: KeywordCategory,
    pub reasons: Vec<String>,
}

/// Prioritized keywords with their two export formats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedKeywords {
    pub items: Vec<PrioritizedKeyword>,
    pub csv: String,
    pub comma_list: String,
}

impl PrioritizedKeywords {
    /// Terms in priority order.
    pub fn terms(&self) -> Vec<String> {
        self.items.iter().map(|k| k.term.clone()).collect()
    }
}

// ============================================================================
// Author Metrics and Recommendations
// ============================================================================

/// Writing statistics for the author. All ratios are in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorMetrics {
    pub word_count: usize,
    pub reading_time_min: usize,
    pub avg_sentence_length: f64,
    pub type_token_ratio: f64,
    /// Higher means more repetitive.
    pub repetition_score: f64,
    pub primary_density: f64,
    pub secondary_density: f64,
    pub topic_coverage: f64,
    pub keyword_coverage: f64,
    pub long_tail_usage: f64,
}

/// One bucket of actionable suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCategory {
    pub category: String,
    pub items: Vec<String>,
}

/// Suggestions grouped by category. Only non-empty buckets are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecommendations {
    pub categories: Vec<RecommendationCategory>,
}

impl AuthorRecommendations {
    /// Looks up a bucket by its exact name.
    pub fn category(&self, name: &str) -> Option<&RecommendationCategory> {
        self.categories.iter().find(|c| c.category == name)
    }
}

// ============================================================================
// SEO Outputs
// ============================================================================

/// Title, meta description, keyword line and the Markdown that wraps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoOutputs {
    pub title: String,
    pub meta_description: String,
    pub keywords_line: String,
    pub markdown: String,
}

/// Where the final SEO bundle came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SeoSource {
    /// Template output of the deterministic synthesizer.
    Deterministic,
    /// Replaced by an external language model.
    Llm { provider: String, model: String },
}

/// What a refiner gets to see of an analyzed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,
    pub key_terms: Vec<String>,
    pub main_topics: Vec<String>,
    pub search_intent_type: Option<IntentType>,
    /// Leading slice of the body text.
    pub text_sample: String,
}

/// Condensed view of the analysis for quick display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub main_topics: Vec<String>,
    pub key_terms: Vec<String>,
    pub readability_score: f64,
    pub concept_strength: f64,
    pub recommended_focus: String,
}

/// Complete output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub tfidf_analysis: TfIdfAnalysis,
    pub lsa_analysis: LsaAnalysis,
    pub search_intent: SearchIntent,
    pub summary: AnalysisSummary,
    pub prioritized_keywords: PrioritizedKeywords,
    pub author_metrics: AuthorMetrics,
    pub author_recommendations: AuthorRecommendations,
    pub seo_outputs: SeoOutputs,
    pub seo_source: SeoSource,
}

// ============================================================================
// Content Extraction
// ============================================================================

/// Page-level metadata found alongside the article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publish_date: String,
}

/// Readable article text pulled from a web page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub title: String,
    pub content: String,
    pub metadata: ContentMetadata,
    pub word_count: usize,
    pub clean_text: String,
    /// Which strategy produced `content` (`json-ld`, `article`, `paragraphs`, `none`).
    pub extraction_method: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Failure to parse one of the string enums above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
