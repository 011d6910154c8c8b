//! Deterministic SEO title, meta description and keyword line.
//!
//! The bundle built here is complete on its own. It is what callers fall back
//! to whenever model-based refinement is disabled or fails, so every function
//! in this module is total.

use seo_core::SeoOutputs;
use std::collections::HashSet;

pub const TITLE_MAX_CHARS: usize = 60;
pub const META_MAX_CHARS: usize = 160;
pub const KEYWORDS_LINE_MAX_CHARS: usize = 300;
pub const KEYWORDS_LINE_MAX_ITEMS: usize = 14;
pub const KEYWORD_SEPARATOR: &str = ", ";

/// Keywords must be longer than this (in characters) to enter the line.
const KEYWORD_MIN_EXCLUSIVE_CHARS: usize = 2;

/// Words of the document title used when nothing better is available.
const TITLE_FALLBACK_WORDS: usize = 3;

/// What the synthesizer works from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesisInput<'a> {
    pub title: Option<&'a str>,
    /// Keyword terms in priority order.
    pub key_terms: &'a [String],
    pub main_topics: &'a [String],
}

impl SynthesisInput<'_> {
    /// First key term, else first topic, else the opening words of the title.
    pub fn primary(&self) -> String {
        self.key_terms
            .first()
            .or_else(|| self.main_topics.first())
            .cloned()
            .unwrap_or_else(|| {
                self.title
                    .unwrap_or_default()
                    .split(' ')
                    .take(TITLE_FALLBACK_WORDS)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
    }

    /// Second key term, else second topic, else empty.
    pub fn secondary(&self) -> String {
        self.key_terms
            .get(1)
            .or_else(|| self.main_topics.get(1))
            .cloned()
            .unwrap_or_default()
    }
}

/// Builds the template bundle.
pub fn build_deterministic_seo(input: SynthesisInput<'_>) -> SeoOutputs {
    let primary = capitalize(&input.primary());
    let secondary = input.secondary();
    let secondary = if secondary.is_empty() {
        "ključne pojmove".to_string()
    } else {
        secondary
    };

    let title = format!("{primary}: Sve što treba da znate");
    let meta = format!(
        "{primary} utiče na vašu publiku i rezultate. Saznajte kako se odnosi na {secondary} i zašto je važno za SEO. Pročitajte kompletnu analizu."
    );

    let mut seen = HashSet::new();
    let keywords: Vec<&str> = input
        .key_terms
        .iter()
        .map(String::as_str)
        .filter(|k| k.chars().count() > KEYWORD_MIN_EXCLUSIVE_CHARS)
        .filter(|k| seen.insert(*k))
        .take(KEYWORDS_LINE_MAX_ITEMS)
        .collect();
    let keywords_line = join_with_char_limit(&keywords, KEYWORDS_LINE_MAX_CHARS, KEYWORD_SEPARATOR);

    finalize_outputs(&title, &meta, &keywords_line)
}

/// Applies the length and punctuation rules and renders the Markdown.
///
/// Title and meta are cut at a word boundary and lose any trailing periods.
/// The keyword line is hard-capped at [`KEYWORDS_LINE_MAX_CHARS`].
pub fn finalize_outputs(title: &str, meta: &str, keywords_line: &str) -> SeoOutputs {
    let title = strip_terminal_periods(&truncate_at_word(title, TITLE_MAX_CHARS));
    let meta = strip_terminal_periods(&truncate_at_word(meta, META_MAX_CHARS));
    let keywords_line: String = keywords_line.chars().take(KEYWORDS_LINE_MAX_CHARS).collect();

    SeoOutputs {
        markdown: render_markdown(&title, &meta, &keywords_line),
        title,
        meta_description: meta,
        keywords_line,
    }
}

/// Cuts `s` to at most `limit` characters at the last space.
///
/// A word ending exactly at `limit` is kept. Falls back to a hard cut when
/// the first word alone is too long.
pub fn truncate_at_word(s: &str, limit: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= limit {
        return s.to_string();
    }

    let cut: String = s.chars().take(limit).collect();
    if s.chars().nth(limit).is_some_and(char::is_whitespace) {
        return cut.trim().to_string();
    }
    match cut.rfind(' ') {
        Some(idx) if idx > 0 => cut[..idx].trim().to_string(),
        _ => cut.trim().to_string(),
    }
}

/// Greedily joins items while the result stays within `limit` characters.
///
/// Stops at the first item that would overflow; items are never split.
pub fn join_with_char_limit<S: AsRef<str>>(items: &[S], limit: usize, sep: &str) -> String {
    let sep_chars = sep.chars().count();
    let mut out: Vec<&str> = Vec::new();
    let mut total = 0;

    for item in items {
        let item = item.as_ref();
        let piece = item.chars().count() + if out.is_empty() { 0 } else { sep_chars };
        if total + piece > limit {
            break;
        }
        out.push(item);
        total += piece;
    }

    out.join(sep)
}

/// Upper-cases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_terminal_periods(s: &str) -> String {
    s.trim().trim_end_matches(|c: char| c == '.' || c.is_whitespace()).to_string()
}

/// Three numbered sections, each value in a code fence.
pub fn render_markdown(title: &str, meta: &str, keywords_line: &str) -> String {
    [
        "1. SEO Naslov (Title Tag)",
        "",
        "```",
        title,
        "```",
        "",
        "2. Meta Opis (Meta Description)",
        "",
        "```",
        meta,
        "```",
        "",
        "3. Formatirana Lista Ključnih Reči",
        "",
        "```",
        keywords_line,
        "```",
    ]
    .join("\n")
}
