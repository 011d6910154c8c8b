//! Keyword prioritization.
//!
//! Candidates come from three places: the semantic core, recurring
//! multi-word key phrases, and two-way combinations of a seed phrase with the
//! leading terms. Each candidate is scored on four signals:
//!
//! | signal    | weight | fires when                                        |
//! |-----------|--------|---------------------------------------------------|
//! | relevance | 0.40   | TF-IDF relative to the strongest term             |
//! | intent    | 0.25   | the term carries an intent hint                   |
//! | long tail | 0.20   | two to four words, or a recurring key phrase      |
//! | topical   | 0.15   | overlaps a term of an identified topic cluster    |
//!
//! Short single words are damped by 20%. Categories are assigned from score
//! percentiles of the batch.

use crate::lexicon::Lexicon;
use crate::tokenize::{is_long_tail, word_count};
use indexmap::IndexSet;
use seo_core::{
    KeywordCategory, LsaAnalysis, PrioritizedKeyword, SearchIntent, TfIdfAnalysis,
};
use std::collections::{HashMap, HashSet};

const RELEVANCE_WEIGHT: f64 = 0.4;
const INTENT_WEIGHT: f64 = 0.25;
const LONG_TAIL_WEIGHT: f64 = 0.2;
const TOPICAL_WEIGHT: f64 = 0.15;

/// Semantic-core terms considered as candidates.
const CORE_CANDIDATES: usize = 60;

/// Leading terms combined with the seed phrase.
const COMBO_SOURCE_TERMS: usize = 10;

/// Longest synthesized combination, in words.
const COMBO_MAX_WORDS: usize = 4;

/// Single words this short (in characters) get the diversity damping.
const SHORT_WORD_CHARS: usize = 4;

/// Candidates are dropped when all signals are this weak and the term is
/// shorter than [`OFF_TOPIC_MIN_CHARS`].
const OFF_TOPIC_RELEVANCE: f64 = 0.05;
const OFF_TOPIC_MIN_CHARS: usize = 5;

/// Maximum keywords returned.
pub const MAX_KEYWORDS: usize = 50;

/// Default length of the comma-separated export.
pub const DEFAULT_COMMA_LIST_MAX: usize = 20;

const PRIMARY_PERCENTILE: f64 = 0.33;
const SECONDARY_PERCENTILE: f64 = 0.66;

pub const REASON_RELEVANCE: &str = "visoka relevantnost (TF‑IDF)";
pub const REASON_LONG_TAIL: &str = "long‑tail fraza";
pub const REASON_TOPICAL: &str = "tematska pokrivenost";
pub const REASON_BASELINE: &str = "osnovna relevantnost";

/// Ranks keyword candidates for one document.
#[derive(Debug, Clone, Copy)]
pub struct KeywordPrioritizer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> KeywordPrioritizer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Scores and categorizes candidates, best first, at most [`MAX_KEYWORDS`].
    pub fn prioritize(
        &self,
        text: &str,
        tfidf: &TfIdfAnalysis,
        lsa: &LsaAnalysis,
        intent: &SearchIntent,
    ) -> Vec<PrioritizedKeyword> {
        let text_lower = text.to_lowercase();

        let mut relevance: HashMap<String, f64> = HashMap::new();
        let mut max_tfidf = 0.0_f64;
        for term in &tfidf.semantic_core {
            if let Some(clean) = self.lexicon.clean_term(&term.word) {
                relevance.insert(clean, term.tfidf);
                max_tfidf = max_tfidf.max(term.tfidf);
            }
        }

        let clean_phrases: HashSet<String> = tfidf
            .key_phrases
            .iter()
            .filter_map(|p| self.lexicon.clean_term(p))
            .collect();

        let cluster_terms: Vec<String> = lsa
            .topic_clusters
            .iter()
            .flat_map(|c| c.terms.iter().map(|t| t.to_lowercase()))
            .collect();

        let hints = self.lexicon.intent_hints.get(intent.intent_type);
        let intent_reason = format!("usklađeno sa {} intentom", intent.intent_type);

        let mut items: Vec<PrioritizedKeyword> = Vec::new();
        for term in self.candidates(tfidf) {
            let mut reasons = Vec::new();

            let rel = match relevance.get(&term) {
                Some(score) if max_tfidf > 0.0 => score / max_tfidf,
                _ => 0.0,
            };
            if rel > 0.0 {
                reasons.push(REASON_RELEVANCE.to_string());
            }

            let intent_hit = hints.iter().any(|hint| {
                term.contains(hint.as_str()) || text_lower.contains(&format!("{hint} {term}"))
            });
            if intent_hit {
                reasons.push(intent_reason.clone());
            }

            let long_tail = is_long_tail(&term) || clean_phrases.contains(&term);
            if long_tail {
                reasons.push(REASON_LONG_TAIL.to_string());
            }

            let topical = cluster_terms
                .iter()
                .any(|ct| term.contains(ct.as_str()) || ct.contains(term.as_str()));
            if topical {
                reasons.push(REASON_TOPICAL.to_string());
            }

            let chars = term.chars().count();
            if rel < OFF_TOPIC_RELEVANCE && !topical && !intent_hit && chars < OFF_TOPIC_MIN_CHARS {
                continue;
            }

            let diversity = if word_count(&term) == 1 && chars <= SHORT_WORD_CHARS {
                0.0
            } else {
                1.0
            };

            let raw = rel * RELEVANCE_WEIGHT
                + flag(intent_hit) * INTENT_WEIGHT
                + flag(long_tail) * LONG_TAIL_WEIGHT
                + flag(topical) * TOPICAL_WEIGHT;
            let adjusted = raw * (0.8 + 0.2 * diversity);
            let score = (adjusted.min(1.0) * 100.0).round() as u8;

            if reasons.is_empty() {
                reasons.push(REASON_BASELINE.to_string());
            }

            items.push(PrioritizedKeyword {
                term,
                score,
                category: KeywordCategory::Tertiary,
                reasons,
            });
        }

        assign_categories(&mut items);

        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.term.clone()));
        items.truncate(MAX_KEYWORDS);
        items
    }

    /// Deduplicated candidate pool in discovery order.
    fn candidates(&self, tfidf: &TfIdfAnalysis) -> IndexSet<String> {
        let mut pool = IndexSet::new();

        for term in tfidf.semantic_core.iter().take(CORE_CANDIDATES) {
            if let Some(clean) = self.lexicon.clean_term(&term.word) {
                pool.insert(clean);
            }
        }

        for phrase in &tfidf.key_phrases {
            if let Some(clean) = self.lexicon.clean_term(phrase)
                && clean.contains(' ')
            {
                pool.insert(clean);
            }
        }

        let seed = tfidf
            .key_phrases
            .iter()
            .find(|p| word_count(p) >= 2)
            .or_else(|| tfidf.semantic_core.first().map(|t| &t.word))
            .map(|s| s.to_lowercase());

        if let Some(seed) = seed.filter(|s| !s.trim().is_empty()) {
            let leading = tfidf
                .semantic_core
                .iter()
                .take(COMBO_SOURCE_TERMS)
                .filter_map(|t| self.lexicon.clean_term(&t.word));

            for word in leading {
                if word == seed {
                    continue;
                }
                for combo in [format!("{seed} {word}"), format!("{word} {seed}")] {
                    if word_count(&combo) <= COMBO_MAX_WORDS {
                        pool.insert(combo);
                    }
                }
            }
        }

        pool
    }
}

fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Sorts by score (stable) and assigns categories from batch percentiles.
///
/// The score at the 33rd position percentile is the primary cutoff and the
/// one at the 66th the secondary cutoff. Equal scores always share a category.
pub fn assign_categories(items: &mut [PrioritizedKeyword]) {
    items.sort_by(|a, b| b.score.cmp(&a.score));

    let n = items.len();
    if n == 0 {
        return;
    }
    let primary_cutoff = items[percentile_index(n, PRIMARY_PERCENTILE)].score;
    let secondary_cutoff = items[percentile_index(n, SECONDARY_PERCENTILE)].score;

    for item in items.iter_mut() {
        item.category = if item.score >= primary_cutoff {
            KeywordCategory::Primary
        } else if item.score >= secondary_cutoff {
            KeywordCategory::Secondary
        } else {
            KeywordCategory::Tertiary
        };
    }
}

fn percentile_index(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).floor() as usize).min(n - 1)
}

/// `term,score,category` CSV. Commas inside terms become spaces.
pub fn to_csv(items: &[PrioritizedKeyword]) -> String {
    let mut lines = vec!["term,score,category".to_string()];
    lines.extend(
        items
            .iter()
            .map(|i| format!("{},{},{}", i.term.replace(',', " "), i.score, i.category)),
    );
    lines.join("\n")
}

/// First `max` distinct terms joined with `,`.
pub fn to_comma_list(items: &[PrioritizedKeyword], max: usize) -> String {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|i| seen.insert(i.term.as_str()))
        .take(max)
        .map(|i| i.term.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
