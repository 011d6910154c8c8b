//! Concept association and topic clustering.
//!
//! Despite the `LsaAnalysis` name on the output, nothing here factorizes a
//! matrix. Semantic-core terms are mapped through the lexicon's concept graph
//! and a crude stem match, and the resulting vectors are grouped under the
//! lexicon's topic patterns.

use crate::lexicon::Lexicon;
use indexmap::IndexSet;
use seo_core::{ConceptVector, LsaAnalysis, SemanticMatch, TermScore, TopicCluster};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Maximum related concepts per term.
pub const MAX_RELATED: usize = 8;

/// Terms longer than this get stem matching.
const STEM_MIN_EXCLUSIVE_CHARS: usize = 4;

/// Characters cut from the end of a term to form its stem.
const STEM_SUFFIX_CHARS: usize = 2;

/// Similarity when one term is directly related to the other.
const DIRECT_RELATION_SIMILARITY: f64 = 0.9;

/// Scale for the shared-concept overlap.
const SHARED_CONCEPT_WEIGHT: f64 = 0.7;

/// Pairs at or below this similarity are not reported.
const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Number of similar pairs kept.
const SIMILARITY_LIMIT: usize = 10;

/// Scale applied to the mean concept weight before capping at 1.
const STRENGTH_SCALE: f64 = 10.0;

/// Maps terms onto concepts and topics.
#[derive(Debug, Clone, Copy)]
pub struct ConceptAnalyzer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ConceptAnalyzer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Runs the whole concept stage over a semantic core.
    pub fn analyze(&self, semantic_core: &[TermScore]) -> LsaAnalysis {
        let concept_vectors = self.concept_vectors(semantic_core);
        let topic_clusters = self.topic_clusters(&concept_vectors);
        let concept_strength = concept_strength(&concept_vectors);

        LsaAnalysis {
            semantic_similarity: self.semantic_similarity(semantic_core),
            concept_vectors,
            topic_clusters,
            concept_strength,
        }
    }

    /// Related concepts for a term, at most [`MAX_RELATED`], deduplicated.
    ///
    /// Order: the direct graph entry, then graph entries in order, each adding
    /// its concept when it lists the term and (for longer terms) its whole
    /// neighbourhood when it shares the term's stem.
    pub fn related_concepts(&self, term: &str) -> Vec<String> {
        let mut related: IndexSet<String> = IndexSet::new();

        if let Some(direct) = self.lexicon.related_of(term) {
            related.extend(direct.iter().cloned());
        }

        let stem = stem(term);
        for entry in &self.lexicon.concept_graph {
            if entry.related.iter().any(|r| r == term) {
                related.insert(entry.concept.clone());
            }

            if let Some(stem) = stem
                && (entry.concept.contains(stem) || entry.related.iter().any(|r| r.contains(stem)))
            {
                related.extend(entry.related.iter().cloned());
            }
        }

        related.into_iter().take(MAX_RELATED).collect()
    }

    /// Similarity of two terms in `[0, 1]`.
    pub fn term_similarity(&self, a: &str, b: &str) -> f64 {
        let related_a = self.related_concepts(a);
        let related_b = self.related_concepts(b);

        if related_a.iter().any(|r| r == b) || related_b.iter().any(|r| r == a) {
            return DIRECT_RELATION_SIMILARITY;
        }

        let set_b: HashSet<&String> = related_b.iter().collect();
        let shared = related_a.iter().filter(|r| set_b.contains(r)).count();
        if shared > 0 {
            let largest = related_a.len().max(related_b.len()) as f64;
            return SHARED_CONCEPT_WEIGHT * shared as f64 / largest;
        }

        bigram_jaccard(a, b)
    }

    /// One vector per semantic-core term, heaviest first.
    pub fn concept_vectors(&self, semantic_core: &[TermScore]) -> Vec<ConceptVector> {
        let mut vectors: Vec<ConceptVector> = semantic_core
            .iter()
            .map(|term| ConceptVector {
                concept: term.word.clone(),
                weight: term.tfidf,
                related_terms: self.related_concepts(&term.word),
            })
            .collect();

        vectors.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
        vectors
    }

    /// Term pairs with similarity above 0.3, most similar first.
    pub fn semantic_similarity(&self, semantic_core: &[TermScore]) -> Vec<SemanticMatch> {
        let mut matches = Vec::new();

        for (i, first) in semantic_core.iter().enumerate() {
            for second in &semantic_core[i + 1..] {
                let similarity = self.term_similarity(&first.word, &second.word);
                if similarity > SIMILARITY_THRESHOLD {
                    matches.push(SemanticMatch {
                        term1: first.word.clone(),
                        term2: second.word.clone(),
                        similarity,
                    });
                }
            }
        }

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(SIMILARITY_LIMIT);
        matches
    }

    /// Groups concept vectors under the lexicon's topic patterns.
    ///
    /// Patterns are visited in order and a concept joins at most one cluster.
    /// Concepts are only claimed by clusters that clear their threshold.
    pub fn topic_clusters(&self, vectors: &[ConceptVector]) -> Vec<TopicCluster> {
        if vectors.is_empty() {
            return Vec::new();
        }

        let total = vectors.len() as f64;
        let mut claimed: HashSet<&str> = HashSet::new();
        let mut clusters = Vec::new();

        for pattern in &self.lexicon.topic_patterns {
            let members: Vec<&ConceptVector> = vectors
                .iter()
                .filter(|v| !claimed.contains(v.concept.as_str()))
                .filter(|v| {
                    pattern.keywords.iter().any(|keyword| {
                        v.concept.contains(keyword.as_str())
                            || v.related_terms.iter().any(|r| r == keyword)
                    })
                })
                .collect();

            if members.is_empty() {
                continue;
            }

            let strength = members.iter().map(|v| v.weight).sum::<f64>() / total;
            if strength >= pattern.threshold {
                claimed.extend(members.iter().map(|v| v.concept.as_str()));
                clusters.push(TopicCluster {
                    name: pattern.name.clone(),
                    terms: members.iter().map(|v| v.concept.clone()).collect(),
                    strength,
                });
            }
        }

        clusters.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap_or(Ordering::Equal));
        clusters
    }
}

/// Mean concept weight scaled by 10 and capped at 1; 0 without concepts.
pub fn concept_strength(vectors: &[ConceptVector]) -> f64 {
    if vectors.is_empty() {
        return 0.0;
    }
    let mean = vectors.iter().map(|v| v.weight).sum::<f64>() / vectors.len() as f64;
    (mean * STRENGTH_SCALE).min(1.0)
}

/// Jaccard index over the sets of adjacent character pairs.
pub fn bigram_jaccard(a: &str, b: &str) -> f64 {
    let bigrams_a = char_bigrams(a);
    let bigrams_b = char_bigrams(b);

    let union = bigrams_a.union(&bigrams_b).count();
    if union == 0 {
        return 0.0;
    }
    bigrams_a.intersection(&bigrams_b).count() as f64 / union as f64
}

fn char_bigrams(s: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Term without its last two characters, for terms longer than four.
fn stem(term: &str) -> Option<&str> {
    let count = term.chars().count();
    if count <= STEM_MIN_EXCLUSIVE_CHARS {
        return None;
    }
    term.char_indices()
        .nth(count - STEM_SUFFIX_CHARS)
        .map(|(idx, _)| &term[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(word: &str, tfidf: f64) -> TermScore {
        TermScore {
            word: word.into(),
            tf: tfidf,
            idf: 1.0,
            tfidf,
        }
    }

    fn vector(concept: &str, weight: f64, related: &[&str]) -> ConceptVector {
        ConceptVector {
            concept: concept.into(),
            weight,
            related_terms: related.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn stem_cuts_two_characters() {
        assert_eq!(stem("fudbal"), Some("fudb"));
        assert_eq!(stem("košarka"), Some("košar"));
        assert_eq!(stem("hleb"), None);
    }

    #[test]
    fn related_concepts_direct_and_reverse() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);

        let related = analyzer.related_concepts("fudbal");
        assert!(related.len() <= MAX_RELATED);
        assert_eq!(related[0], "reprezentacija");
        // "fudbal" appears in the "sport" entry
        assert!(related.contains(&"sport".to_string()) || related.len() == MAX_RELATED);

        // "trener" has no entry of its own; it is listed under "fudbal" first
        let reverse = analyzer.related_concepts("trener");
        assert_eq!(reverse[0], "fudbal");
        assert!(reverse.contains(&"stadion".to_string()));
    }

    #[test]
    fn related_concepts_are_unique_and_capped() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        for term in ["politika", "medicina", "utakmica", "umetnost", "hleb", "xy"] {
            let related = analyzer.related_concepts(term);
            let unique: HashSet<&String> = related.iter().collect();
            assert_eq!(unique.len(), related.len(), "{term}");
            assert!(related.len() <= MAX_RELATED, "{term}");
        }
        assert!(analyzer.related_concepts("xy").is_empty());
    }

    #[test]
    fn similarity_direct_relation() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        assert_eq!(analyzer.term_similarity("vlada", "ministar"), 0.9);
        assert_eq!(analyzer.term_similarity("ministar", "vlada"), 0.9);
    }

    #[test]
    fn similarity_falls_back_to_bigrams() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        let sim = analyzer.term_similarity("hlebac", "hlebovi");
        assert!((sim - bigram_jaccard("hlebac", "hlebovi")).abs() < 1e-12);
        assert!(sim > 0.0 && sim < 1.0);
    }

    #[test]
    fn similarity_is_bounded() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        let terms = ["politika", "izbori", "fudbal", "liga", "hleb", "kvasac", "ab"];
        for a in terms {
            for b in terms {
                let sim = analyzer.term_similarity(a, b);
                assert!((0.0..=1.0).contains(&sim), "{a}/{b}: {sim}");
            }
        }
    }

    #[test]
    fn bigram_jaccard_edge_cases() {
        assert_eq!(bigram_jaccard("a", "b"), 0.0);
        assert_eq!(bigram_jaccard("", ""), 0.0);
        assert_eq!(bigram_jaccard("hleb", "hleb"), 1.0);
        // {ab, bc} vs {bc, cd}: 1 shared of 3
        assert!((bigram_jaccard("abc", "bcd") - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn semantic_similarity_sorted_and_filtered() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        let core = vec![
            score("vlada", 0.3),
            score("ministar", 0.2),
            score("hleb", 0.1),
        ];
        let matches = analyzer.semantic_similarity(&core);
        assert!(!matches.is_empty());
        assert_eq!(matches[0].term1, "vlada");
        assert_eq!(matches[0].term2, "ministar");
        for m in &matches {
            assert!(m.similarity > 0.3);
        }
        for pair in matches.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn concept_vectors_sorted_by_weight() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        let vectors = analyzer.concept_vectors(&[score("hleb", 0.1), score("fudbal", 0.4)]);
        assert_eq!(vectors[0].concept, "fudbal");
        assert_eq!(vectors[1].concept, "hleb");
    }

    #[test]
    fn topic_clusters_claim_concepts_once() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        let vectors = vec![
            vector("vlada", 0.6, &["ministar"]),
            vector("ministar", 0.4, &["vlada"]),
            vector("fudbal", 0.9, &["liga"]),
        ];

        let clusters = analyzer.topic_clusters(&vectors);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].name, "Politika");
        assert_eq!(clusters[0].terms, vec!["vlada", "ministar"]);
        assert!((clusters[0].strength - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(clusters[1].name, "Sport");
        assert!((clusters[1].strength - 0.3).abs() < 1e-12);

        let mut seen = HashSet::new();
        for cluster in &clusters {
            for term in &cluster.terms {
                assert!(seen.insert(term.clone()), "{term} in two clusters");
            }
        }
    }

    #[test]
    fn topic_clusters_respect_threshold() {
        let lexicon = Lexicon::serbian();
        let analyzer = ConceptAnalyzer::new(&lexicon);
        let vectors = vec![vector("vlada", 0.1, &[]), vector("hleb", 0.9, &[])];
        // 0.1 / 2 = 0.05 < 0.3
        assert!(analyzer.topic_clusters(&vectors).is_empty());
        assert!(analyzer.topic_clusters(&[]).is_empty());
    }

    #[test]
    fn strength_is_capped() {
        assert_eq!(concept_strength(&[]), 0.0);
        assert_eq!(concept_strength(&[vector("a", 0.5, &[])]), 1.0);
        assert!((concept_strength(&[vector("a", 0.02, &[])]) - 0.2).abs() < 1e-12);
    }
}
