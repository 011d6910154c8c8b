//! TF-IDF (Term Frequency-Inverse Document Frequency) analysis.
//!
//! This module scores the vocabulary of one document against a small
//! reference corpus:
//! - Document-frequency bookkeeping ([`Corpus`])
//! - Per-term TF, IDF and TF-IDF ([`TfIdfEngine::analyze`])
//! - Recurring bigrams/trigrams and a static concept cloud
//! - A simplified readability score
//!
//! The analyzed document is folded into the corpus before its own IDF values
//! are computed, so it always counts itself.

use crate::lexicon::Lexicon;
use crate::tokenize::{Tokenizer, split_sentences};
use indexmap::{IndexMap, IndexSet};
use seo_core::{TermScore, TfIdfAnalysis};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Number of terms kept in the semantic core.
pub const SEMANTIC_CORE_SIZE: usize = 20;

/// Number of key phrases kept.
pub const KEY_PHRASE_LIMIT: usize = 15;

/// Leading semantic-core terms that feed the concept cloud.
const CLOUD_SOURCE_TERMS: usize = 10;

/// Maximum concept-cloud size.
const CLOUD_LIMIT: usize = 20;

/// Words longer than this count as complex for readability.
const COMPLEX_WORD_CHARS: usize = 6;

/// Document-frequency statistics for IDF computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// Number of documents in the corpus
    pub document_count: usize,
    /// Number of documents containing each term
    pub document_frequencies: HashMap<String, usize>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a corpus holding the lexicon's reference documents.
    pub fn seeded(lexicon: &Lexicon) -> Self {
        let tokenizer = Tokenizer::analysis(lexicon);
        let mut corpus = Self::new();
        for document in &lexicon.seed_corpus {
            corpus.add_document(&tokenizer.tokenize(document));
        }
        corpus
    }

    /// Adds a document's tokens, counting each unique term once.
    pub fn add_document(&mut self, tokens: &[String]) {
        self.document_count += 1;

        let unique_terms: HashSet<&String> = tokens.iter().collect();
        for term in unique_terms {
            *self.document_frequencies.entry(term.clone()).or_insert(0) += 1;
        }
    }

    /// IDF = ln(N / df), with df taken as at least 1.
    ///
    /// Returns 0.0 for an empty corpus.
    pub fn idf(&self, term: &str) -> f64 {
        if self.document_count == 0 {
            return 0.0;
        }

        let df = self
            .document_frequencies
            .get(term)
            .copied()
            .filter(|df| *df > 0)
            .unwrap_or(1);
        (self.document_count as f64 / df as f64).ln().max(0.0)
    }
}

/// Counts token occurrences, keeping first-occurrence order.
pub fn term_counts(tokens: &[String]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

/// Scores documents against a [`Corpus`].
#[derive(Debug, Clone)]
pub struct TfIdfEngine<'a> {
    lexicon: &'a Lexicon,
    tokenizer: Tokenizer<'a>,
}

impl<'a> TfIdfEngine<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            tokenizer: Tokenizer::analysis(lexicon),
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer<'a> {
        &self.tokenizer
    }

    /// Adds `text` to `corpus` and analyzes it.
    pub fn analyze(&self, corpus: &mut Corpus, text: &str) -> TfIdfAnalysis {
        let tokens = self.tokenizer.tokenize(text);
        corpus.add_document(&tokens);

        let counts = term_counts(&tokens);
        let total = tokens.len() as f64;

        let mut scores: Vec<TermScore> = counts
            .iter()
            .map(|(word, count)| {
                let tf = *count as f64 / total;
                let idf = corpus.idf(word);
                TermScore {
                    word: word.clone(),
                    tf,
                    idf,
                    tfidf: tf * idf,
                }
            })
            .collect();

        // Stable: ties keep first-occurrence order.
        scores.sort_by(|a, b| b.tfidf.partial_cmp(&a.tfidf).unwrap_or(Ordering::Equal));
        scores.truncate(SEMANTIC_CORE_SIZE);

        let average_word_length = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / total
        };

        TfIdfAnalysis {
            key_phrases: self.key_phrases(text),
            concept_cloud: self.concept_cloud(&scores),
            semantic_core: scores,
            total_words: tokens.len(),
            unique_words: counts.len(),
            average_word_length,
            readability_score: readability_score(text, &tokens),
        }
    }

    /// Bigrams and trigrams (within sentences) that occur more than once.
    pub fn key_phrases(&self, text: &str) -> Vec<String> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();

        for sentence in split_sentences(text) {
            let words = self.tokenizer.tokenize(sentence);
            for pair in words.windows(2) {
                *counts.entry(pair.join(" ")).or_insert(0) += 1;
            }
            for triple in words.windows(3) {
                *counts.entry(triple.join(" ")).or_insert(0) += 1;
            }
        }

        let mut recurring: Vec<(String, usize)> =
            counts.into_iter().filter(|(_, count)| *count > 1).collect();
        recurring.sort_by(|a, b| b.1.cmp(&a.1));
        recurring
            .into_iter()
            .take(KEY_PHRASE_LIMIT)
            .map(|(phrase, _)| phrase)
            .collect()
    }

    /// Expands the leading terms through the lexicon's cloud rules.
    pub fn concept_cloud(&self, semantic_core: &[TermScore]) -> Vec<String> {
        let mut cloud: IndexSet<String> = IndexSet::new();

        for term in semantic_core.iter().take(CLOUD_SOURCE_TERMS) {
            for rule in &self.lexicon.cloud_rules {
                if rule.patterns.iter().any(|p| term.word.contains(p.as_str())) {
                    cloud.extend(rule.expansions.iter().cloned());
                }
            }
        }

        cloud.into_iter().take(CLOUD_LIMIT).collect()
    }
}

/// Simplified readability (0-100, higher is easier).
///
/// `100 - (words_per_sentence * 0.39 + complex_ratio * 100 * 11.8 - 15.59)`,
/// clamped. Empty inputs score 100.
pub fn readability_score(text: &str, tokens: &[String]) -> f64 {
    let sentences = split_sentences(text).len();
    let words = tokens.len();
    let complex = tokens
        .iter()
        .filter(|t| t.chars().count() > COMPLEX_WORD_CHARS)
        .count();

    let words_per_sentence = if sentences == 0 {
        0.0
    } else {
        words as f64 / sentences as f64
    };
    let complex_ratio = if words == 0 {
        0.0
    } else {
        complex as f64 / words as f64
    };

    let difficulty = words_per_sentence * 0.39 + complex_ratio * 100.0 * 11.8 - 15.59;
    (100.0 - difficulty).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn corpus_add_document() {
        let mut corpus = Corpus::new();
        corpus.add_document(&tokens(&["mačka", "pas", "mačka"]));
        corpus.add_document(&tokens(&["mačka", "ptica"]));

        assert_eq!(corpus.document_count, 2);
        assert_eq!(corpus.document_frequencies["mačka"], 2);
        assert_eq!(corpus.document_frequencies["pas"], 1);
        assert_eq!(corpus.document_frequencies["ptica"], 1);
    }

    #[test]
    fn idf_computation() {
        let mut corpus = Corpus::new();
        corpus.add_document(&tokens(&["mačka", "pas"]));
        corpus.add_document(&tokens(&["mačka", "ptica"]));
        corpus.add_document(&tokens(&["riba", "ptica"]));

        // mačka appears in 2 of 3 docs: ln(3/2) ~ 0.405
        assert!((corpus.idf("mačka") - 0.405).abs() < 0.01);
        // pas appears in 1 of 3 docs: ln(3/1) ~ 1.099
        assert!((corpus.idf("pas") - 1.099).abs() < 0.01);
        // unseen terms count as df = 1
        assert!((corpus.idf("nepoznato") - 1.099).abs() < 0.01);
    }

    #[test]
    fn idf_empty_corpus() {
        assert_eq!(Corpus::new().idf("bilo"), 0.0);
    }

    #[test]
    fn seeded_corpus_has_reference_documents() {
        let corpus = Corpus::seeded(&Lexicon::serbian());
        assert_eq!(corpus.document_count, 10);
        // "nauka" appears in two reference documents
        assert_eq!(corpus.document_frequencies["nauka"], 2);
        // two-letter tokens never make it into the corpus
        assert!(!corpus.document_frequencies.contains_key("ai"));
    }

    #[test]
    fn term_counts_keep_first_occurrence_order() {
        let counts = term_counts(&tokens(&["b", "a", "b", "c"]));
        let order: Vec<&String> = counts.keys().collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(counts["b"], 2);
    }

    #[test]
    fn analyze_scores_document() {
        let lexicon = Lexicon::serbian();
        let engine = TfIdfEngine::new(&lexicon);
        let mut corpus = Corpus::seeded(&lexicon);

        let analysis = engine.analyze(
            &mut corpus,
            "Fudbal reprezentacija igra. Fudbal reprezentacija pobeđuje. Navijači slave.",
        );

        assert_eq!(corpus.document_count, 11);
        assert_eq!(analysis.total_words, 8);
        assert_eq!(analysis.unique_words, 6);

        let top = &analysis.semantic_core[0];
        assert_eq!(top.word, "reprezentacija");
        assert!((top.tfidf - top.tf * top.idf).abs() < 1e-12);

        for pair in analysis.semantic_core.windows(2) {
            assert!(pair[0].tfidf >= pair[1].tfidf);
        }
        assert_eq!(analysis.key_phrases, vec!["fudbal reprezentacija"]);
    }

    #[test]
    fn analyze_empty_text() {
        let lexicon = Lexicon::serbian();
        let engine = TfIdfEngine::new(&lexicon);
        let mut corpus = Corpus::seeded(&lexicon);

        let analysis = engine.analyze(&mut corpus, "");
        assert!(analysis.semantic_core.is_empty());
        assert!(analysis.key_phrases.is_empty());
        assert_eq!(analysis.total_words, 0);
        assert_eq!(analysis.average_word_length, 0.0);
        assert_eq!(analysis.readability_score, 100.0);
    }

    #[test]
    fn semantic_core_is_capped() {
        let lexicon = Lexicon::serbian();
        let engine = TfIdfEngine::new(&lexicon);
        let mut corpus = Corpus::seeded(&lexicon);

        let words: Vec<String> = (0..30).map(|i| format!("pojam{i}")).collect();
        let analysis = engine.analyze(&mut corpus, &words.join(" "));
        assert_eq!(analysis.unique_words, 30);
        assert_eq!(analysis.semantic_core.len(), SEMANTIC_CORE_SIZE);
    }

    #[test]
    fn key_phrases_need_repetition() {
        let lexicon = Lexicon::serbian();
        let engine = TfIdfEngine::new(&lexicon);
        assert!(engine.key_phrases("Domaći hleb je ukusan.").is_empty());

        let phrases = engine.key_phrases("Domaći hleb mirise. Domaći hleb mirise. Domaći hleb.");
        assert_eq!(phrases, vec!["domaći hleb", "hleb mirise", "domaći hleb mirise"]);
    }

    #[test]
    fn concept_cloud_expands_leading_terms() {
        let lexicon = Lexicon::serbian();
        let engine = TfIdfEngine::new(&lexicon);
        let core = vec![
            TermScore {
                word: "sportski".into(),
                tf: 0.5,
                idf: 1.0,
                tfidf: 0.5,
            },
            TermScore {
                word: "sportisti".into(),
                tf: 0.5,
                idf: 1.0,
                tfidf: 0.5,
            },
        ];
        assert_eq!(
            engine.concept_cloud(&core),
            vec!["liga", "utakmica", "trener", "igrač"]
        );
    }

    #[test]
    fn readability_bounds() {
        let simple = tokens(&["pas", "laje"]);
        assert_eq!(readability_score("Pas laje.", &simple), 100.0);

        let complex = tokens(&["neverovatnoj", "komplikovanoj", "administraciji"]);
        assert_eq!(readability_score("x", &complex), 0.0);
    }
}
