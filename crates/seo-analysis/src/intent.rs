//! Rule-based search-intent classification.

use crate::lexicon::Lexicon;
use seo_core::{IntentType, SearchIntent, TermScore};

/// Score added per cue word found anywhere in the text.
const INDICATOR_POINTS: u32 = 1;

/// Score added per semantic-core term containing a high-signal fragment.
const SIGNAL_POINTS: u32 = 2;

/// Maximum indicators reported.
const MAX_INDICATORS: usize = 5;

/// Scores text against the lexicon's intent cue lists.
#[derive(Debug, Clone, Copy)]
pub struct IntentClassifier<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> IntentClassifier<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Picks the best-scoring intent.
    ///
    /// Matching is by substring, so `"kako"` also fires on `"kakogod"`. Ties go
    /// to the earliest category in [`IntentType::ALL`]; a text without any cue
    /// gets [`SearchIntent::neutral`].
    pub fn classify(&self, text: &str, semantic_core: &[TermScore]) -> SearchIntent {
        let lower = text.to_lowercase();
        let mut scores = [0u32; 4];
        let mut indicators = Vec::new();

        for intent in IntentType::ALL {
            for cue in self.lexicon.intent_indicators.get(intent) {
                if lower.contains(cue.as_str()) {
                    scores[intent.index()] += INDICATOR_POINTS;
                    indicators.push(cue.clone());
                }
            }
        }

        for term in semantic_core {
            let word = term.word.to_lowercase();
            for intent in IntentType::ALL {
                let signals = self.lexicon.intent_signals.get(intent);
                if signals.iter().any(|s| word.contains(s.as_str())) {
                    scores[intent.index()] += SIGNAL_POINTS;
                }
            }
        }

        let total: u32 = scores.iter().sum();
        if total == 0 {
            return SearchIntent::neutral();
        }

        let best = scores.iter().copied().max().unwrap_or(0);
        let intent_type = IntentType::ALL
            .into_iter()
            .find(|i| scores[i.index()] == best)
            .unwrap_or(IntentType::Informational);

        indicators.truncate(MAX_INDICATORS);
        SearchIntent {
            intent_type,
            confidence: f64::from(best) / f64::from(total),
            indicators,
        }
    }
}
