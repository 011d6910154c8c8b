//! Tokenization for Serbian Latin text.
//!
//! Two configurations are used by the pipeline:
//! - [`Tokenizer::analysis`]: drops stop words, short tokens and pure numbers.
//!   Feeds TF-IDF and everything derived from it.
//! - [`Tokenizer::prose`]: keeps every word (hyphenated compounds included).
//!   Feeds the author metrics, which describe the text as written.

use crate::lexicon::Lexicon;
use std::collections::HashSet;

/// Serbian Latin letters outside ASCII.
const SERBIAN_LETTERS: &[char] = &['č', 'ć', 'ž', 'š', 'đ'];

/// Tokens must be longer than this (in characters) to survive analysis mode.
const ANALYSIS_MIN_EXCLUSIVE_CHARS: usize = 2;

/// Tokenizer settings.
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Extra symbols kept inside tokens.
    pub allowed_symbols: Vec<char>,
    /// Tokens with this many characters or fewer are dropped.
    pub min_exclusive_chars: usize,
    /// Drop tokens made only of ASCII digits.
    pub drop_numeric: bool,
}

/// Splits text into lowercase word tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    config: TokenizerConfig,
    stop_words: Option<&'a HashSet<String>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(config: TokenizerConfig, stop_words: Option<&'a HashSet<String>>) -> Self {
        Self { config, stop_words }
    }

    /// Tokenizer for TF-IDF and concept analysis.
    pub fn analysis(lexicon: &'a Lexicon) -> Self {
        Self::new(
            TokenizerConfig {
                allowed_symbols: Vec::new(),
                min_exclusive_chars: ANALYSIS_MIN_EXCLUSIVE_CHARS,
                drop_numeric: true,
            },
            Some(&lexicon.stop_words),
        )
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text
            .to_lowercase()
            .chars()
            .map(|c| if self.keeps(c) { c } else { ' ' })
            .collect();

        normalized
            .split_whitespace()
            .filter(|token| token.chars().count() > self.config.min_exclusive_chars)
            .filter(|token| !(self.config.drop_numeric && is_numeric(token)))
            .filter(|token| !self.stop_words.is_some_and(|sw| sw.contains(*token)))
            .map(str::to_string)
            .collect()
    }

    fn keeps(&self, c: char) -> bool {
        c.is_ascii_alphanumeric()
            || c == '_'
            || c.is_whitespace()
            || SERBIAN_LETTERS.contains(&c)
            || self.config.allowed_symbols.contains(&c)
    }
}

impl Tokenizer<'static> {
    /// Tokenizer that keeps every word, hyphenated compounds included.
    pub fn prose() -> Self {
        Tokenizer::new(
            TokenizerConfig {
                allowed_symbols: vec!['-'],
                min_exclusive_chars: 0,
                drop_numeric: false,
            },
            None,
        )
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Splits text on runs of `.`, `!` and `?`, dropping blank pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Number of whitespace-separated words.
pub fn word_count(phrase: &str) -> usize {
    phrase.split_whitespace().count()
}

/// Phrases of two to four words.
pub fn is_long_tail(phrase: &str) -> bool {
    (2..=4).contains(&word_count(phrase))
}
