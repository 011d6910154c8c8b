//! Writing statistics for the author.

use crate::tokenize::{Tokenizer, is_long_tail, split_sentences};
use regex::Regex;
use seo_core::AuthorMetrics;
use std::collections::HashSet;

const WORDS_PER_MINUTE: f64 = 200.0;

/// Keywords (after the primary) that count toward secondary density.
const SECONDARY_KEYWORDS: usize = 5;

/// Leading keywords considered for coverage.
const COVERAGE_KEYWORDS: usize = 12;

/// Computes [`AuthorMetrics`] for `text`.
///
/// `keywords` must be in priority order; the first one is the primary.
pub fn compute_author_metrics(text: &str, topics: &[String], keywords: &[String]) -> AuthorMetrics {
    let words = Tokenizer::prose().tokenize(text);
    let word_count = words.len();
    let sentence_count = split_sentences(text).len();

    let unique: HashSet<&String> = words.iter().collect();
    let type_token_ratio = if word_count == 0 {
        0.0
    } else {
        unique.len() as f64 / word_count as f64
    };

    let avg_sentence_length = if sentence_count == 0 {
        word_count as f64
    } else {
        word_count as f64 / sentence_count as f64
    };

    let lower = text.to_lowercase();

    let primary_density = keywords
        .first()
        .map(|k| phrase_density(&lower, k, word_count))
        .unwrap_or(0.0);
    let secondary_density = keywords
        .iter()
        .skip(1)
        .take(SECONDARY_KEYWORDS)
        .map(|k| phrase_density(&lower, k, word_count))
        .sum::<f64>()
        .min(1.0);

    let topic_coverage = ratio(
        topics
            .iter()
            .filter(|t| lower.contains(&t.to_lowercase()))
            .count(),
        topics.len(),
    );

    let leading: Vec<&String> = keywords.iter().take(COVERAGE_KEYWORDS).collect();
    let present: Vec<&&String> = leading
        .iter()
        .filter(|k| lower.contains(&k.to_lowercase()))
        .collect();
    let keyword_coverage = ratio(present.len(), leading.len());
    let long_tail_usage = ratio(
        present.iter().filter(|k| is_long_tail(k)).count(),
        leading.len(),
    );

    AuthorMetrics {
        word_count,
        reading_time_min: ((word_count as f64 / WORDS_PER_MINUTE).round() as usize).max(1),
        avg_sentence_length,
        type_token_ratio,
        repetition_score: repetition_score(&words),
        primary_density,
        secondary_density,
        topic_coverage,
        keyword_coverage,
        long_tail_usage,
    }
}

/// Share of word bigrams that repeat an earlier bigram, capped at 1.
pub fn repetition_score(words: &[String]) -> f64 {
    let bigrams: Vec<(&str, &str)> = words
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();

    let mut seen = HashSet::new();
    let repeated = bigrams.iter().filter(|b| !seen.insert(**b)).count();
    (repeated as f64 / bigrams.len().max(1) as f64).min(1.0)
}

/// Whole-phrase occurrences of `phrase` in `lower_text` per word, capped at 1.
///
/// A match must be bounded by the text edges or by characters outside
/// `[a-z0-9čćžšđ]`.
pub fn phrase_density(lower_text: &str, phrase: &str, word_count: usize) -> f64 {
    if phrase.is_empty() {
        return 0.0;
    }

    let pattern = format!(
        r"(?i)(^|[^a-z0-9čćžšđ]){}([^a-z0-9čćžšđ]|$)",
        regex::escape(phrase)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return 0.0;
    };

    let matches = re.find_iter(lower_text).count();
    (matches as f64 / word_count.max(1) as f64).min(1.0)
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
