//! Actionable writing suggestions derived from [`AuthorMetrics`].

use crate::tokenize::word_count;
use seo_core::{AuthorMetrics, AuthorRecommendations, RecommendationCategory};

pub const CATEGORY_STRUCTURE: &str = "Struktura i pokrivenost";
pub const CATEGORY_KEYWORDS: &str = "Ključne reči (long-tail first)";
pub const CATEGORY_TITLE_META: &str = "Naslov i meta";
pub const CATEGORY_STYLE: &str = "Stil i jasnoća";
pub const CATEGORY_FAQ: &str = "FAQ (featured snippets)";

const MIN_TOPIC_COVERAGE: f64 = 0.7;
const MAX_AVG_SENTENCE_WORDS: f64 = 24.0;
const MIN_PRIMARY_DENSITY: f64 = 0.008;
const MIN_SECONDARY_DENSITY: f64 = 0.02;
const MIN_LONG_TAIL_USAGE: f64 = 0.6;
const TITLE_CHARS: (usize, usize) = (40, 75);
const META_CHARS: (usize, usize) = (140, 160);
const MAX_REPETITION: f64 = 0.1;
const MIN_TYPE_TOKEN_RATIO: f64 = 0.35;

/// Inputs for [`build_author_recommendations`].
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInput<'a> {
    pub metrics: &'a AuthorMetrics,
    pub main_topics: &'a [String],
    /// Keyword terms in priority order.
    pub keywords: &'a [String],
    pub seo_title: Option<&'a str>,
    pub seo_meta: Option<&'a str>,
}

/// Builds the recommendation buckets. Empty buckets are left out.
pub fn build_author_recommendations(input: RecommendationInput<'_>) -> AuthorRecommendations {
    let metrics = input.metrics;
    let multi_word: Vec<&String> = input.keywords.iter().filter(|k| word_count(k) >= 2).collect();

    let mut categories = Vec::new();

    let mut structure = Vec::new();
    let meta_lower = input.seo_meta.unwrap_or_default().to_lowercase();
    let missing: Vec<&str> = input
        .main_topics
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && !meta_lower.contains(&t.to_lowercase()))
        .take(3)
        .collect();
    if !missing.is_empty() || metrics.topic_coverage < MIN_TOPIC_COVERAGE {
        let named = if missing.is_empty() {
            input
                .main_topics
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
        } else {
            missing
        };
        if named.is_empty() {
            structure.push(
                "Dodaj H2/H3 sekcije koje pokrivaju glavne teme teksta.".to_string(),
            );
        } else {
            structure.push(format!(
                "Dodaj H2/H3 sekcije za nedostajuće teme: {}",
                named.join(", ")
            ));
        }
    }
    if metrics.avg_sentence_length > MAX_AVG_SENTENCE_WORDS {
        structure.push(
            "Skrati preduge rečenice (>24 reči) i razbij pasuse radi veće čitljivosti.".to_string(),
        );
    }
    push_bucket(&mut categories, CATEGORY_STRUCTURE, structure);

    let mut keywords = Vec::new();
    if metrics.primary_density < MIN_PRIMARY_DENSITY {
        keywords.push("Pojačaj prisustvo primarne ključne reči (prirodno, ~0.8–1.5%).".to_string());
    }
    if metrics.secondary_density < MIN_SECONDARY_DENSITY {
        keywords.push("Uvedi 2–3 sekundarne fraze u relevantne pasuse (0.3–0.8%).".to_string());
    }
    if metrics.long_tail_usage < MIN_LONG_TAIL_USAGE && !multi_word.is_empty() {
        let examples: Vec<&str> = multi_word.iter().take(3).map(|k| k.as_str()).collect();
        keywords.push(format!(
            "Ubaci 2–3 long-tail varijante: {}",
            examples.join(", ")
        ));
    }
    push_bucket(&mut categories, CATEGORY_KEYWORDS, keywords);

    let mut title_meta = Vec::new();
    if let Some(title) = input.seo_title.filter(|t| !t.is_empty()) {
        let len = title.chars().count();
        if len > TITLE_CHARS.1 {
            title_meta.push("Skrati SEO naslov na ≤ 75 karaktera.".to_string());
        }
        if len < TITLE_CHARS.0 {
            title_meta.push("Pojačaj SEO naslov (40–75 karaktera, uključujući primarnu).".to_string());
        }
    }
    if let Some(meta) = input.seo_meta.filter(|m| !m.is_empty()) {
        let len = meta.chars().count();
        if len > META_CHARS.1 {
            title_meta.push("Skrati meta opis na 150–160 karaktera.".to_string());
        }
        if len < META_CHARS.0 {
            title_meta
                .push("Produbi meta opis (150–160 karaktera, informativno, bez CTA).".to_string());
        }
    }
    push_bucket(&mut categories, CATEGORY_TITLE_META, title_meta);

    let mut style = Vec::new();
    if metrics.repetition_score > MAX_REPETITION {
        style.push("Smanji ponavljanja isto-slednih fraza; koristi sinonime.".to_string());
    }
    if metrics.type_token_ratio < MIN_TYPE_TOKEN_RATIO {
        style.push("Povećaj raznolikost reči (TTR), dodaj primere i konkretne pojmove.".to_string());
    }
    push_bucket(&mut categories, CATEGORY_STYLE, style);

    if let Some(first) = multi_word.first() {
        let second = multi_word.get(1).unwrap_or(first);
        push_bucket(
            &mut categories,
            CATEGORY_FAQ,
            vec![format!(
                "Dodaj FAQ sa 2–3 pitanja na kraju (npr: \"Šta je {first}?\", \"Kako rešiti {second}?\")"
            )],
        );
    }

    AuthorRecommendations { categories }
}

fn push_bucket(categories: &mut Vec<RecommendationCategory>, name: &str, items: Vec<String>) {
    if !items.is_empty() {
        categories.push(RecommendationCategory {
            category: name.to_string(),
            items,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn healthy_metrics() -> AuthorMetrics {
        AuthorMetrics {
            word_count: 400,
            reading_time_min: 2,
            avg_sentence_length: 15.0,
            type_token_ratio: 0.6,
            repetition_score: 0.02,
            primary_density: 0.01,
            secondary_density: 0.03,
            topic_coverage: 1.0,
            keyword_coverage: 1.0,
            long_tail_usage: 0.8,
        }
    }

    #[test]
    fn healthy_text_gets_no_buckets() {
        let metrics = healthy_metrics();
        let meta = "a".repeat(150);
        let recs = build_author_recommendations(RecommendationInput {
            metrics: &metrics,
            main_topics: &[],
            keywords: &strings(&["hleb"]),
            seo_title: Some("Domaći hleb: recept korak po korak za početnike"),
            seo_meta: Some(&meta),
        });
        assert!(recs.categories.is_empty());
    }

    #[test]
    fn weak_metrics_fill_buckets_in_order() {
        let metrics = AuthorMetrics {
            avg_sentence_length: 30.0,
            type_token_ratio: 0.2,
            repetition_score: 0.3,
            ..AuthorMetrics::default()
        };
        let keywords = strings(&["domaći hleb", "kvasac", "raženi hleb", "hleb bez glutena"]);
        let recs = build_author_recommendations(RecommendationInput {
            metrics: &metrics,
            main_topics: &strings(&["Zdravlje", "Kultura"]),
            keywords: &keywords,
            seo_title: Some("Hleb"),
            seo_meta: Some("Kratak opis."),
        });

        let names: Vec<&str> = recs.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            names,
            vec![
                CATEGORY_STRUCTURE,
                CATEGORY_KEYWORDS,
                CATEGORY_TITLE_META,
                CATEGORY_STYLE,
                CATEGORY_FAQ
            ]
        );

        let structure = recs.category(CATEGORY_STRUCTURE).unwrap();
        assert_eq!(
            structure.items[0],
            "Dodaj H2/H3 sekcije za nedostajuće teme: Zdravlje, Kultura"
        );
        assert_eq!(structure.items.len(), 2);

        let kw = recs.category(CATEGORY_KEYWORDS).unwrap();
        assert_eq!(kw.items.len(), 3);
        assert_eq!(
            kw.items[2],
            "Ubaci 2–3 long-tail varijante: domaći hleb, raženi hleb, hleb bez glutena"
        );

        let faq = recs.category(CATEGORY_FAQ).unwrap();
        assert_eq!(
            faq.items[0],
            "Dodaj FAQ sa 2–3 pitanja na kraju (npr: \"Šta je domaći hleb?\", \"Kako rešiti raženi hleb?\")"
        );
    }

    #[test]
    fn topics_in_meta_are_not_missing() {
        let metrics = AuthorMetrics {
            topic_coverage: 0.5,
            ..healthy_metrics()
        };
        let recs = build_author_recommendations(RecommendationInput {
            metrics: &metrics,
            main_topics: &strings(&["Sport", "Zdravlje", "Kultura"]),
            keywords: &[],
            seo_title: None,
            seo_meta: Some("Sport i zdravlje"),
        });
        let structure = recs.category(CATEGORY_STRUCTURE).unwrap();
        assert_eq!(
            structure.items[0],
            "Dodaj H2/H3 sekcije za nedostajuće teme: Kultura"
        );
    }

    #[test]
    fn low_coverage_without_topics_uses_generic_advice() {
        let metrics = AuthorMetrics {
            topic_coverage: 0.0,
            ..healthy_metrics()
        };
        let recs = build_author_recommendations(RecommendationInput {
            metrics: &metrics,
            main_topics: &[],
            keywords: &[],
            seo_title: None,
            seo_meta: None,
        });
        let structure = recs.category(CATEGORY_STRUCTURE).unwrap();
        assert_eq!(structure.items.len(), 1);
        assert!(!structure.items[0].ends_with(": "));
    }

    #[test]
    fn single_long_keyword_fills_both_faq_slots() {
        let metrics = healthy_metrics();
        let recs = build_author_recommendations(RecommendationInput {
            metrics: &metrics,
            main_topics: &[],
            keywords: &strings(&["domaći hleb"]),
            seo_title: None,
            seo_meta: None,
        });
        let faq = recs.category(CATEGORY_FAQ).unwrap();
        assert!(faq.items[0].contains("\"Šta je domaći hleb?\", \"Kako rešiti domaći hleb?\""));
    }

    #[test]
    fn title_and_meta_length_checks() {
        let metrics = healthy_metrics();
        let long_title = "t".repeat(80);
        let long_meta = "m".repeat(170);
        let recs = build_author_recommendations(RecommendationInput {
            metrics: &metrics,
            main_topics: &[],
            keywords: &[],
            seo_title: Some(&long_title),
            seo_meta: Some(&long_meta),
        });
        let items = &recs.category(CATEGORY_TITLE_META).unwrap().items;
        assert_eq!(
            items,
            &vec![
                "Skrati SEO naslov na ≤ 75 karaktera.".to_string(),
                "Skrati meta opis na 150–160 karaktera.".to_string()
            ]
        );
    }
}
