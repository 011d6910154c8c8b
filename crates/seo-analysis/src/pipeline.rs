//! Runs every analysis stage over one document.

use crate::concepts::ConceptAnalyzer;
use crate::intent::IntentClassifier;
use crate::keywords::{DEFAULT_COMMA_LIST_MAX, KeywordPrioritizer, to_comma_list, to_csv};
use crate::lexicon::Lexicon;
use crate::metrics::compute_author_metrics;
use crate::recommendations::{RecommendationInput, build_author_recommendations};
use crate::synthesis::{SynthesisInput, build_deterministic_seo};
use crate::tfidf::{Corpus, TfIdfEngine};
use seo_core::{
    AnalysisReport, AnalysisSummary, AuthorMetrics, AuthorRecommendations, DocumentInput,
    IntentType, LsaAnalysis, PrioritizedKeywords, SearchIntent, SeoContext, SeoOutputs, SeoSource,
    TfIdfAnalysis,
};
use std::sync::Arc;
use tracing::debug;

/// Semantic-core words listed in the summary.
const SUMMARY_KEY_TERMS: usize = 10;

/// Characters of body text handed to refiners.
const TEXT_SAMPLE_CHARS: usize = 1000;

/// Entry point of the analysis core.
///
/// Cheap to clone; the lexicon is shared.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    lexicon: Arc<Lexicon>,
}

impl Analyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Analyzes `input` against a fresh corpus seeded from the lexicon.
    ///
    /// Identical inputs always give identical results.
    pub fn analyze(&self, input: &DocumentInput) -> Analysis {
        let mut corpus = Corpus::seeded(&self.lexicon);
        self.analyze_with_corpus(input, &mut corpus)
    }

    /// Analyzes `input` against a caller-owned corpus.
    ///
    /// The document is folded into `corpus`, so later calls see shifted IDF
    /// values. Callers sharing one corpus across threads must serialize access.
    pub fn analyze_with_corpus(&self, input: &DocumentInput, corpus: &mut Corpus) -> Analysis {
        let lexicon = self.lexicon.as_ref();
        let full_text = input.full_text();

        let tfidf = TfIdfEngine::new(lexicon).analyze(corpus, &full_text);
        let lsa = ConceptAnalyzer::new(lexicon).analyze(&tfidf.semantic_core);
        let intent = IntentClassifier::new(lexicon).classify(&full_text, &tfidf.semantic_core);
        debug!(
            total_words = tfidf.total_words,
            unique_words = tfidf.unique_words,
            clusters = lsa.topic_clusters.len(),
            intent = %intent.intent_type,
            "document analyzed"
        );

        let items = KeywordPrioritizer::new(lexicon).prioritize(&input.text, &tfidf, &lsa, &intent);
        let keywords = PrioritizedKeywords {
            csv: to_csv(&items),
            comma_list: to_comma_list(&items, DEFAULT_COMMA_LIST_MAX),
            items,
        };
        let keyword_terms = keywords.terms();
        let main_topics = lsa.topic_names();
        debug!(candidates = keyword_terms.len(), "keywords prioritized");

        let metrics = compute_author_metrics(&input.text, &main_topics, &keyword_terms);
        let summary = summarize(&tfidf, &lsa, &intent);

        let deterministic_seo = build_deterministic_seo(SynthesisInput {
            title: input.title.as_deref(),
            key_terms: &keyword_terms,
            main_topics: &main_topics,
        });

        Analysis {
            input: input.clone(),
            tfidf,
            lsa,
            intent,
            summary,
            keywords,
            keyword_terms,
            main_topics,
            metrics,
            deterministic_seo,
        }
    }
}

/// Intermediate result: everything except the final SEO bundle.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub input: DocumentInput,
    pub tfidf: TfIdfAnalysis,
    pub lsa: LsaAnalysis,
    pub intent: SearchIntent,
    pub summary: AnalysisSummary,
    pub keywords: PrioritizedKeywords,
    /// Prioritized terms in order.
    pub keyword_terms: Vec<String>,
    pub main_topics: Vec<String>,
    pub metrics: AuthorMetrics,
    pub deterministic_seo: SeoOutputs,
}

impl Analysis {
    /// Context a refiner receives alongside the deterministic bundle.
    pub fn seo_context(&self) -> SeoContext {
        SeoContext {
            document_title: self.input.title.clone().filter(|t| !t.is_empty()),
            key_terms: self.keyword_terms.clone(),
            main_topics: self.main_topics.clone(),
            search_intent_type: Some(self.intent.intent_type),
            text_sample: self.input.text.chars().take(TEXT_SAMPLE_CHARS).collect(),
        }
    }

    /// Recommendations checked against `seo`.
    pub fn recommendations(&self, seo: &SeoOutputs) -> AuthorRecommendations {
        build_author_recommendations(RecommendationInput {
            metrics: &self.metrics,
            main_topics: &self.main_topics,
            keywords: &self.keyword_terms,
            seo_title: Some(seo.title.as_str()),
            seo_meta: Some(seo.meta_description.as_str()),
        })
    }

    /// Builds the report around the final SEO bundle.
    pub fn finish(self, seo: SeoOutputs, source: SeoSource) -> AnalysisReport {
        let author_recommendations = self.recommendations(&seo);
        AnalysisReport {
            tfidf_analysis: self.tfidf,
            lsa_analysis: self.lsa,
            search_intent: self.intent,
            summary: self.summary,
            prioritized_keywords: self.keywords,
            author_metrics: self.metrics,
            author_recommendations,
            seo_outputs: seo,
            seo_source: source,
        }
    }

    /// Report with the deterministic bundle.
    pub fn into_report(self) -> AnalysisReport {
        let seo = self.deterministic_seo.clone();
        self.finish(seo, SeoSource::Deterministic)
    }
}

fn summarize(tfidf: &TfIdfAnalysis, lsa: &LsaAnalysis, intent: &SearchIntent) -> AnalysisSummary {
    AnalysisSummary {
        main_topics: lsa.topic_names(),
        key_terms: tfidf
            .semantic_core
            .iter()
            .take(SUMMARY_KEY_TERMS)
            .map(|t| t.word.clone())
            .collect(),
        readability_score: tfidf.readability_score,
        concept_strength: lsa.concept_strength,
        recommended_focus: recommended_focus(intent, lsa),
    }
}

/// One-line editorial focus for the summary.
pub fn recommended_focus(intent: &SearchIntent, lsa: &LsaAnalysis) -> String {
    match intent.intent_type {
        IntentType::Commercial => "komercijalna istraga".to_string(),
        IntentType::Transactional => "transakcijski sadržaj".to_string(),
        _ => match lsa.topic_clusters.first() {
            Some(cluster) => format!("{} fokus", cluster.name.to_lowercase()),
            None => "informativni sadržaj".to_string(),
        },
    }
}
