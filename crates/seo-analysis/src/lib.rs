//! seo-analysis: deterministic SEO analysis of Serbian text
//!
//! Stages, in pipeline order:
//! - `tfidf`: tokenization against a seeded corpus, semantic core, key phrases
//! - `concepts`: related concepts, term similarity and topic clusters
//! - `intent`: search-intent classification
//! - `keywords`: prioritized keyword candidates with CSV and comma exports
//! - `metrics` / `recommendations`: author statistics and writing advice
//! - `synthesis`: template title, meta description and keyword line
//!
//! [`Analyzer`] wires them together. All dictionaries live in [`Lexicon`].

pub mod concepts;
pub mod intent;
pub mod keywords;
pub mod lexicon;
pub mod metrics;
pub mod pipeline;
pub mod recommendations;
pub mod synthesis;
pub mod tfidf;
pub mod tokenize;

pub use concepts::ConceptAnalyzer;
pub use intent::IntentClassifier;
pub use keywords::KeywordPrioritizer;
pub use lexicon::{Lexicon, LexiconError};
pub use metrics::compute_author_metrics;
pub use pipeline::{Analysis, Analyzer};
pub use recommendations::{RecommendationInput, build_author_recommendations};
pub use synthesis::{SynthesisInput, build_deterministic_seo, finalize_outputs};
pub use tfidf::{Corpus, TfIdfEngine};
pub use tokenize::Tokenizer;
