//! Integration tests for the analysis pipeline.
//!
//! Properties checked end to end:
//!
//! - TF-IDF scores are non-negative and the semantic core is ranked
//! - Keyword categories follow score percentiles
//! - Synthesized title, meta and keyword line respect their budgets
//! - Truncation ends at word boundaries
//! - Texts without intent cues get the neutral intent
//! - Scoring is reproducible on a fresh corpus
//!
//! Randomized sweeps use seeded generators so failures are replayable.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use seo_analysis::keywords::assign_categories;
use seo_analysis::recommendations::{CATEGORY_FAQ, CATEGORY_KEYWORDS};
use seo_analysis::synthesis::{
    KEYWORDS_LINE_MAX_CHARS, META_MAX_CHARS, TITLE_MAX_CHARS, join_with_char_limit,
    truncate_at_word,
};
use seo_analysis::{
    Analyzer, Corpus, KeywordPrioritizer, RecommendationInput, SynthesisInput,
    build_author_recommendations, build_deterministic_seo,
};
use seo_core::{
    AuthorMetrics, DocumentInput, IntentType, KeywordCategory, PrioritizedKeyword, SearchIntent,
};

// =============================================================================
// Test Helpers
// =============================================================================

const VOCABULARY: &[&str] = &[
    "reprezentacija", "utakmica", "stadion", "trener", "vlada", "ministar", "zakon",
    "izbori", "bolnica", "lečenje", "tehnologija", "internet", "festival", "muzika",
    "hleb", "brašno", "kvasac", "banka", "kredit", "investicija", "ekonomija", "turnir",
    "domaći", "novi", "veliki", "srpski", "gradski", "ključni", "danas", "sutra",
];

/// Generates `sentences` random sentences from the vocabulary.
fn random_text(rng: &mut StdRng, sentences: usize) -> String {
    let mut out = Vec::with_capacity(sentences);
    for _ in 0..sentences {
        let len = rng.gen_range(4..14);
        let words: Vec<&str> = (0..len)
            .filter_map(|_| VOCABULARY.choose(rng).copied())
            .collect();
        out.push(format!("{}.", words.join(" ")));
    }
    out.join(" ")
}

fn random_phrase(rng: &mut StdRng, max_words: usize) -> String {
    let len = rng.gen_range(1..=max_words);
    (0..len)
        .filter_map(|_| VOCABULARY.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// TF-IDF ranking
// =============================================================================

#[test]
fn tfidf_scores_are_non_negative_and_ranked() {
    let analyzer = Analyzer::default();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..50 {
        let sentences = rng.gen_range(1..12);
        let analysis = analyzer.analyze(&DocumentInput::new(random_text(&mut rng, sentences)));
        let core = &analysis.tfidf.semantic_core;

        assert!(core.len() <= 20);
        for term in core {
            assert!(term.tfidf >= 0.0, "{term:?}");
            assert!(term.idf >= 0.0, "{term:?}");
            assert!((0.0..=1.0).contains(&term.tf), "{term:?}");
        }
        for pair in core.windows(2) {
            assert!(pair[0].tfidf >= pair[1].tfidf);
        }
    }
}

// =============================================================================
// Keyword categories
// =============================================================================

#[test]
fn every_keyword_gets_a_category_by_percentile() {
    let analyzer = Analyzer::default();
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..30 {
        let text = random_text(&mut rng, 8);
        let items = analyzer.analyze(&DocumentInput::new(text)).keywords.items;

        let min_primary = items
            .iter()
            .filter(|i| i.category == KeywordCategory::Primary)
            .map(|i| i.score)
            .min();
        let max_tertiary = items
            .iter()
            .filter(|i| i.category == KeywordCategory::Tertiary)
            .map(|i| i.score)
            .max();
        if let (Some(p), Some(t)) = (min_primary, max_tertiary) {
            assert!(p >= t);
        }
        for pair in items.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(items.len() <= 50);
    }
}

#[test]
fn random_score_batches_split_cleanly() {
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        let n = rng.gen_range(1..40);
        let mut items: Vec<PrioritizedKeyword> = (0..n)
            .map(|i| PrioritizedKeyword {
                term: format!("pojam {i}"),
                score: rng.gen_range(0..=100),
                category: KeywordCategory::Tertiary,
                reasons: vec![],
            })
            .collect();
        assign_categories(&mut items);

        assert_eq!(items[0].category, KeywordCategory::Primary);
        for a in &items {
            for b in &items {
                if a.score == b.score {
                    assert_eq!(a.category, b.category);
                }
            }
        }
    }
}

// =============================================================================
// Synthesizer budgets
// =============================================================================

#[test]
fn synthesized_outputs_respect_budgets() {
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..200 {
        let key_terms: Vec<String> = (0..rng.gen_range(0..30))
            .map(|_| random_phrase(&mut rng, 6))
            .collect();
        let topics: Vec<String> = (0..rng.gen_range(0..3))
            .map(|_| random_phrase(&mut rng, 2))
            .collect();
        let title = random_phrase(&mut rng, 8);

        let seo = build_deterministic_seo(SynthesisInput {
            title: Some(&title),
            key_terms: &key_terms,
            main_topics: &topics,
        });

        assert!(seo.title.chars().count() <= TITLE_MAX_CHARS, "{}", seo.title);
        assert!(seo.meta_description.chars().count() <= META_MAX_CHARS);
        assert!(seo.keywords_line.chars().count() <= KEYWORDS_LINE_MAX_CHARS);
        assert!(!seo.title.ends_with('.'));
        assert!(!seo.meta_description.ends_with('.'));
        assert!(seo.markdown.contains(&seo.keywords_line));
    }
}

#[test]
fn truncation_ends_at_word_boundary() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..300 {
        let s = random_phrase(&mut rng, 20);
        let limit = rng.gen_range(1..80);
        let out = truncate_at_word(&s, limit);

        assert!(out.chars().count() <= limit);
        assert!(s.starts_with(&out));
        if out.len() < s.len() {
            let first_word_chars = s.split(' ').next().map_or(0, |w| w.chars().count());
            let at_boundary = s[out.len()..].starts_with(' ');
            assert!(at_boundary || first_word_chars > limit, "{s:?} -> {out:?}");
        }
    }
}

#[test]
fn truncation_keeps_word_ending_at_limit() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let s = random_phrase(&mut rng, 12);
        let words: Vec<&str> = s.split(' ').collect();
        if words.len() < 2 {
            continue;
        }
        let keep = rng.gen_range(1..words.len());
        let prefix = words[..keep].join(" ");
        let out = truncate_at_word(&s, prefix.chars().count());
        assert_eq!(out, prefix, "{s:?}");
    }
}

#[test]
fn keyword_line_cap_is_greedy() {
    let items: Vec<String> = (0..30).map(|i| format!("kljucna rec broj {i:03}")).collect();
    assert!(items.iter().all(|i| i.chars().count() == 20));

    let line = join_with_char_limit(&items, 300, ", ");
    let taken: Vec<&str> = line.split(", ").collect();

    assert!(line.chars().count() <= 300);
    assert_eq!(taken, items[..taken.len()].iter().map(String::as_str).collect::<Vec<_>>());
    // one more item would overflow
    let next = format!("{line}, {}", items[taken.len()]);
    assert!(next.chars().count() > 300);
}

// =============================================================================
// Intent
// =============================================================================

#[test]
fn text_without_cues_is_neutral() {
    let report = Analyzer::default()
        .analyze(&DocumentInput::new(
            "Reka teče mirno kroz ravnicu, a vetar nosi lišće preko polja.",
        ))
        .into_report();
    assert_eq!(report.search_intent, SearchIntent::neutral());
}

#[test]
fn short_informational_text() {
    let report = Analyzer::default()
        .analyze(&DocumentInput::new(
            "Kako se pravi domaći hleb? Ovaj vodič objašnjava korake pripreme testa i pečenja.",
        ))
        .into_report();

    assert_eq!(report.search_intent.intent_type, IntentType::Informational);
    assert_eq!(report.search_intent.confidence, 1.0);
    assert_eq!(report.search_intent.indicators, vec!["kako", "vodič"]);
    assert_eq!(report.summary.recommended_focus, "informativni sadržaj");
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn prioritizer_is_idempotent_on_fresh_corpus() {
    let analyzer = Analyzer::default();
    let lexicon = analyzer.lexicon();
    let mut rng = StdRng::seed_from_u64(6);
    let text = random_text(&mut rng, 10);

    let run = || {
        let mut corpus = Corpus::seeded(lexicon);
        let analysis = analyzer.analyze_with_corpus(&DocumentInput::new(text.clone()), &mut corpus);
        KeywordPrioritizer::new(lexicon).prioritize(
            &text,
            &analysis.tfidf,
            &analysis.lsa,
            &analysis.intent,
        )
    };

    assert_eq!(run(), run());
}

// =============================================================================
// Recommendations
// =============================================================================

#[test]
fn empty_keyword_list_skips_keyword_driven_advice() {
    let metrics = AuthorMetrics {
        long_tail_usage: 0.0,
        ..AuthorMetrics::default()
    };
    let recs = build_author_recommendations(RecommendationInput {
        metrics: &metrics,
        main_topics: &[],
        keywords: &[],
        seo_title: None,
        seo_meta: None,
    });

    assert!(recs.category(CATEGORY_FAQ).is_none());
    if let Some(bucket) = recs.category(CATEGORY_KEYWORDS) {
        assert!(bucket.items.iter().all(|i| !i.contains("long-tail")));
    }
}

#[test]
fn degenerate_inputs_do_not_panic() {
    let analyzer = Analyzer::default();
    for text in ["", "   ", "...", "a b c", "12:30 01.02.2024", "!!!???"] {
        let report = analyzer.analyze(&DocumentInput::new(text)).into_report();
        let metrics = &report.author_metrics;
        assert!(metrics.avg_sentence_length.is_finite());
        assert!(metrics.type_token_ratio.is_finite());
        assert!(report.tfidf_analysis.readability_score.is_finite());
        assert!(report.lsa_analysis.concept_strength.is_finite());
        assert!(metrics.reading_time_min >= 1);
    }
}
