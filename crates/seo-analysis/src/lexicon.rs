//! Embedded language tables for the analysis pipeline.
//!
//! Stop words, boilerplate terms, the concept graph, topic patterns and
//! intent cue lists are data, not logic. They live in one [`Lexicon`] value
//! that every component borrows, so a second language only needs a second
//! table set. [`Lexicon::serbian`] returns the built-in Serbian (Latin script)
//! tables; [`Lexicon::from_json`] loads and validates a replacement.

use regex::Regex;
use seo_core::IntentType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Clock times such as `14:30`.
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("valid time pattern"));

/// Dates such as `12.05.2024`.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\.\d{1,2}\.\d{2,4}").expect("valid date pattern"));

/// Minimum length (in characters) of a usable keyword.
pub const MIN_TERM_CHARS: usize = 3;

/// Errors raised while loading a custom lexicon.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The JSON document could not be parsed.
    #[error("invalid lexicon document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A table that the pipeline cannot work without is empty.
    #[error("lexicon table must not be empty: {table}")]
    Empty { table: &'static str },

    /// A topic threshold outside `[0, 1]`.
    #[error("topic {topic} has invalid threshold {threshold}")]
    InvalidThreshold { topic: String, threshold: f64 },
}

/// One node of the concept-association graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptEntry {
    pub concept: String,
    pub related: Vec<String>,
}

/// A named topic recognized through a keyword set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPattern {
    pub name: String,
    pub keywords: Vec<String>,
    /// Minimum cluster strength for the topic to be reported.
    pub threshold: f64,
}

/// Concept-cloud rule: a term containing any of `patterns` adds `expansions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudRule {
    pub patterns: Vec<String>,
    pub expansions: Vec<String>,
}

/// Cue words per intent category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentTable {
    pub informational: Vec<String>,
    pub commercial: Vec<String>,
    pub transactional: Vec<String>,
    pub navigational: Vec<String>,
}

impl IntentTable {
    /// Cue words for one category.
    pub fn get(&self, intent: IntentType) -> &[String] {
        match intent {
            IntentType::Informational => &self.informational,
            IntentType::Commercial => &self.commercial,
            IntentType::Transactional => &self.transactional,
            IntentType::Navigational => &self.navigational,
        }
    }

    fn is_empty(&self) -> bool {
        IntentType::ALL.iter().all(|i| self.get(*i).is_empty())
    }
}

/// Complete set of language tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Tokens dropped by the analysis tokenizer.
    pub stop_words: HashSet<String>,
    /// Boilerplate and section-label words never offered as keywords.
    pub banned_terms: HashSet<String>,
    /// Clickbait fragments rejected from model-generated keywords.
    pub clickbait_tokens: Vec<String>,
    /// Reference documents every fresh corpus starts with.
    pub seed_corpus: Vec<String>,
    /// Ordered concept-association graph.
    pub concept_graph: Vec<ConceptEntry>,
    /// Concept-cloud expansion rules.
    pub cloud_rules: Vec<CloudRule>,
    /// Ordered topic patterns; earlier patterns claim concepts first.
    pub topic_patterns: Vec<TopicPattern>,
    /// Classifier cue words (+1 per substring hit).
    pub intent_indicators: IntentTable,
    /// High-signal fragments in semantic-core terms (+2 per term).
    pub intent_signals: IntentTable,
    /// Prioritizer hints for intent fit.
    pub intent_hints: IntentTable,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::serbian()
    }
}

impl Lexicon {
    /// Built-in Serbian tables.
    pub fn serbian() -> Self {
        Self {
            stop_words: strings(SERBIAN_STOP_WORDS).into_iter().collect(),
            banned_terms: strings(BANNED_TERMS).into_iter().collect(),
            clickbait_tokens: strings(CLICKBAIT_TOKENS),
            seed_corpus: strings(SEED_CORPUS),
            concept_graph: CONCEPT_GRAPH
                .iter()
                .map(|(concept, related)| ConceptEntry {
                    concept: (*concept).to_string(),
                    related: strings(related),
                })
                .collect(),
            cloud_rules: CLOUD_RULES
                .iter()
                .map(|(patterns, expansions)| CloudRule {
                    patterns: strings(patterns),
                    expansions: strings(expansions),
                })
                .collect(),
            topic_patterns: TOPIC_PATTERNS
                .iter()
                .map(|(name, keywords, threshold)| TopicPattern {
                    name: (*name).to_string(),
                    keywords: strings(keywords),
                    threshold: *threshold,
                })
                .collect(),
            intent_indicators: intent_table(INTENT_INDICATORS),
            intent_signals: intent_table(INTENT_SIGNALS),
            intent_hints: intent_table(INTENT_HINTS),
        }
    }

    /// Parses a lexicon from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let lexicon: Lexicon = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Checks the tables the pipeline depends on.
    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.seed_corpus.iter().all(|doc| doc.trim().is_empty()) {
            return Err(LexiconError::Empty {
                table: "seed_corpus",
            });
        }
        if self.intent_indicators.is_empty() {
            return Err(LexiconError::Empty {
                table: "intent_indicators",
            });
        }
        for pattern in &self.topic_patterns {
            if !(0.0..=1.0).contains(&pattern.threshold) {
                return Err(LexiconError::InvalidThreshold {
                    topic: pattern.name.clone(),
                    threshold: pattern.threshold,
                });
            }
        }
        Ok(())
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn is_banned(&self, term: &str) -> bool {
        self.banned_terms.contains(term)
    }

    /// Direct concept-graph lookup.
    pub fn related_of(&self, concept: &str) -> Option<&[String]> {
        self.concept_graph
            .iter()
            .find(|entry| entry.concept == concept)
            .map(|entry| entry.related.as_slice())
    }

    /// Normalizes a keyword candidate, rejecting noise.
    ///
    /// Returns the trimmed lowercase term, or `None` for terms shorter than
    /// [`MIN_TERM_CHARS`], banned boilerplate, clock times and dates.
    pub fn clean_term(&self, raw: &str) -> Option<String> {
        let term = raw.trim().to_lowercase();
        if term.chars().count() < MIN_TERM_CHARS {
            return None;
        }
        if self.is_banned(&term) {
            return None;
        }
        if is_time_or_date(&term) {
            return None;
        }
        Some(term)
    }
}

/// True when the term contains a clock time or a numeric date.
pub fn is_time_or_date(term: &str) -> bool {
    TIME_PATTERN.is_match(term) || DATE_PATTERN.is_match(term)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn intent_table(lists: [&[&str]; 4]) -> IntentTable {
    IntentTable {
        informational: strings(lists[0]),
        commercial: strings(lists[1]),
        transactional: strings(lists[2]),
        navigational: strings(lists[3]),
    }
}

// ============================================================================
// Serbian Tables
// ============================================================================

#[rustfmt::skip]
const SERBIAN_STOP_WORDS: &[&str] = &[
    // Short function words
    "a", "al", "ali", "bi", "bio", "bila", "bile", "bili", "bilo", "biće", "bih", "bu", "da",
    "do", "ga", "god", "će", "čak", "dr", "dug", "duh", "dok", "dom", "dan", "dat", "duž", "el",
    "eq", "et", "fa", "fe", "gi", "go", "ha", "ho", "hr", "hm", "je", "jer", "ji", "jo", "ka",
    "ko", "ku", "li", "ma", "me", "mi", "mu", "na", "ne", "ni", "no", "nu", "od", "oh", "ok",
    "pa", "po", "pr", "ra", "re", "se", "si", "so", "su", "ta", "te", "ti", "to", "tu", "tv",
    "uv", "ve", "vo", "za", "že",
    // Pronouns
    "ja", "on", "ona", "ono", "vi", "oni", "one", "ova", "taj", "ovo", "ovaj", "moj", "tvoj",
    "njegov", "njen", "naš", "vaš", "njihov", "koja", "koje", "koji", "koju", "kome", "čiji",
    "čija", "čije", "samo", "sve", "sva", "svak", "neki", "neka", "neko", "ništa", "niko",
    "nikoga", "nikome", "svima", "svemu", "svega",
    // Prepositions and conjunctions
    "bez", "blizu", "zbog", "gdje", "kako", "kada", "kroz", "među", "nad", "oko", "pod", "pred",
    "preko", "prije", "protiv", "takođe", "upravo", "van", "više", "zašto", "zato", "odakle",
    "dokle", "kamo", "kuda", "dokad", "otkad", "koliko",
    // Common verbs
    "biti", "budem", "budemo", "budeš", "budete", "bude", "budu", "jesam", "jesi", "jeste",
    "jest", "jesmo", "jesu", "sam", "smo", "ste", "želim", "želiš", "želi", "želimo", "želite",
    "žele", "hteo", "htela", "hteli", "htele", "htelo", "hoću", "hoćeš", "hoće", "hoćemo",
    "hoćete", "ću", "ćeš", "ćemo", "ćete", "mogu", "možeš", "može", "možemo", "možete",
    "moramo", "moraš", "mora", "morate", "moraju", "treba", "trebam", "trebaš", "trebamo",
    "trebate", "trebaju", "ima", "imamo", "imaš", "imaju", "nema", "nemamo", "nemaš", "nemaju",
    // Adverbs and intensifiers
    "ovde", "ovdje", "onde", "tamo", "sada", "sad", "tada", "pre", "posle", "poslije", "uvek",
    "uvijek", "nikad", "nikada", "već", "još", "tek", "baš", "prilično", "vrlo", "dosta",
    "malo", "mnogo", "najbolji", "najbolja", "najbolje", "dobro", "loše", "jako",
    // Ordinals
    "jedan", "jedna", "jedno", "prvi", "prva", "prvo", "drugi", "druga", "drugo", "treći",
    "treća", "treće", "poslednji", "poslednja", "poslednje", "oba", "obe", "oboje",
    // Question words
    "što", "šta", "gde", "kad", "koga", "kojem", "kojoj", "kojim", "kojima",
    // Time words
    "danas", "sutra", "juče", "jučer", "prekjučer", "prekosutra", "noću", "ujutru", "popodne",
    "uveče", "uvečer", "noćas", "jutros", "sinoć", "godina", "godine", "godinu", "mesec",
    "meseca", "mjesec", "mjeseca", "dana", "dani", "sat", "sata", "sati", "minut", "minuta",
    "sekund", "sekunde", "vreme", "vrijeme", "vremena",
    // Common adjectives
    "nov", "nova", "novo", "novi", "nove", "stari", "stara", "staro", "veliki", "velika",
    "veliko", "mali", "mala", "dobar", "dobra", "loš", "loša", "čist", "čista", "čisto",
    "prost", "prosta", "prosto", "mlad", "mlada", "mlado", "crn", "crna", "crno", "beo", "bela",
    "belo", "bijel", "bijela", "bijelo",
    // Numbers
    "nula", "dva", "tri", "četiri", "pet", "šest", "sedam", "osam", "devet", "deset",
    "jedanaest", "dvanaest", "trinaest", "četrnaest", "petnaest", "šesnaest", "sedamnaest",
    "osamnaest", "devetnaest", "dvadeset", "trideset", "četrdeset", "pedeset", "šezdeset",
    "sedamdeset", "osamdeset", "devedeset", "sto", "hiljada", "hiljade", "tisuća", "tisuće",
    "milion", "milijun", "milijuna",
    // Discourse markers
    "dakle", "inače", "ipak", "zapravo", "naime", "međutim", "najviše", "najmanje", "često",
    "retko", "ponekad", "katkad", "nekad", "nekada",
];

#[rustfmt::skip]
const BANNED_TERMS: &[&str] = &[
    "autor", "društvo", "hronika", "video", "foto", "komentar", "najnovije", "vesti", "portal",
    "izvor", "uredništvo", "politika", "ekonomija", "sport", "pre", "juče", "danas",
];

const CLICKBAIT_TOKENS: &[&str] = &[
    "kliknite ovde",
    "odmah",
    "besplatno",
    "najbolje ikad",
    "šokantno",
    "neverovatno",
    "viralno",
    "ekskluzivno",
    "!!!",
];

const SEED_CORPUS: &[&str] = &[
    "politika vlada srbija beograd novi sad niš kragujevac subotica",
    "sport fudbal košarka tenis olimpijada utakmica turnir liga",
    "ekonomija privreda inflacija banka kredit evro dinar",
    "kultura pozorište film muzika umetnost festival koncert",
    "zdravlje medicina lekar bolnica tretman terapija",
    "tehnologija kompjuter internet digitalni inovacija AI",
    "obrazovanje škola univerzitet student profesor nauka",
    "životna sredina ekologija klima zagađenje priroda",
    "turizam putovanje odmor destinacija hotel restoran",
    "nauka istraživanje studija rezultat analiza podatak",
];

#[rustfmt::skip]
const CONCEPT_GRAPH: &[(&str, &[&str])] = &[
    // Politics
    ("politika", &["vlada", "ministar", "parlament", "skupština", "predsednik", "izbori", "stranka", "koalicija", "opozicija", "referendum"]),
    ("vlada", &["ministar", "premijer", "kabinet", "sednica", "odluka", "uredba", "zakon", "politika", "reforma"]),
    ("izbori", &["glasanje", "kandidat", "stranka", "lista", "kampanja", "birači", "parlament", "referendum", "demokratija"]),
    // Economy
    ("ekonomija", &["privreda", "BDP", "inflacija", "devize", "investicije", "tržište", "trgovina", "finansije", "banka"]),
    ("privreda", &["proizvodnja", "industrija", "poljoprivreda", "turizam", "izvoz", "uvoz", "preduzeća", "zaposleni"]),
    ("inflacija", &["cene", "poskupljenje", "ekonomija", "dinar", "evro", "kupovna", "moć", "troškovi"]),
    // Sport
    ("sport", &["fudbal", "košarka", "tenis", "vaterpolo", "olimpijada", "prvenstvo", "liga", "utakmica", "turnir"]),
    ("fudbal", &["reprezentacija", "liga", "utakmica", "golovi", "igrači", "trener", "stadion", "navijači", "transfer"]),
    ("košarka", &["NBA", "ABA", "liga", "utakmica", "poeni", "koševi", "igrači", "trener", "finale"]),
    // Health
    ("zdravlje", &["medicina", "bolest", "terapija", "lečenje", "dijagnoza", "simptomi", "lekar", "bolnica", "zdravstvo"]),
    ("medicina", &["lečenje", "terapija", "dijagnoza", "simptomi", "zdravlje", "bolest", "lekar", "medicinski"]),
    ("bolnica", &["pacijenti", "lečenje", "operacija", "zdravstvo", "medicinski", "osoblje", "oprema"]),
    // Technology
    ("tehnologija", &["digitalno", "internet", "kompjuter", "softver", "aplikacija", "inovacije", "AI", "automatizacija"]),
    ("internet", &["web", "sajt", "online", "digitalno", "mreža", "povezanost", "tehnologija"]),
    ("AI", &["veštačka", "inteligencija", "mašinsko", "učenje", "algoritmi", "automatizacija", "robotika"]),
    // Culture
    ("kultura", &["umetnost", "pozorište", "muzika", "film", "festival", "nasleđe", "tradicija", "kreativnost"]),
    ("umetnost", &["slika", "skulptura", "galerija", "muzej", "umetnik", "kreativnost", "kultura"]),
    ("festival", &["kultura", "umetnost", "muzika", "film", "pozorište", "manifestacija", "događaj"]),
    // Education
    ("obrazovanje", &["škola", "univerzitet", "student", "profesor", "nauka", "istraživanje", "studije", "diploma"]),
    ("univerzitet", &["fakultet", "student", "profesor", "studije", "istraživanje", "diploma", "akademski"]),
    ("nauka", &["istraživanje", "studija", "rezultati", "analiza", "teorija", "eksperiment", "univerzitet"]),
    // Environment
    ("životna", &["sredina", "ekologija", "priroda", "zagađenje", "klima", "očuvanje", "zaštita", "održivost"]),
    ("klima", &["promena", "globalno", "zagrevanje", "temperature", "vremenske", "prilike", "ekologija"]),
    ("zagađenje", &["životna", "sredina", "vazduh", "voda", "otpad", "ekologija", "zaštita"]),
];

#[rustfmt::skip]
const CLOUD_RULES: &[(&[&str], &[&str])] = &[
    (&["politik"], &["vlada", "izbori", "stranka", "parlament"]),
    (&["ekonom", "privreda"], &["tržište", "investicije", "rast", "razvoj"]),
    (&["sport"], &["liga", "utakmica", "trener", "igrač"]),
    (&["kultur"], &["umetnost", "festival", "tradicija", "nasleđe"]),
    (&["zdravlj"], &["medicina", "terapija", "prevencija", "dijagnoza"]),
    (&["tehnolog"], &["inovacije", "digitalizacija", "automatizacija", "AI"]),
];

#[rustfmt::skip]
const TOPIC_PATTERNS: &[(&str, &[&str], f64)] = &[
    ("Politika", &["politika", "vlada", "ministar", "parlament", "izbori", "stranka", "predsednik"], 0.3),
    ("Ekonomija", &["ekonomija", "privreda", "inflacija", "banka", "investicije", "tržište", "BDP"], 0.3),
    ("Sport", &["sport", "fudbal", "košarka", "utakmica", "liga", "reprezentacija", "turnir"], 0.25),
    ("Zdravlje", &["zdravlje", "medicina", "bolnica", "lečenje", "terapija", "dijagnoza"], 0.25),
    ("Tehnologija", &["tehnologija", "internet", "AI", "digitalno", "inovacije", "automatizacija"], 0.25),
    ("Kultura", &["kultura", "umetnost", "festival", "pozorište", "muzika", "nasleđe"], 0.2),
];

#[rustfmt::skip]
const INTENT_INDICATORS: [&[&str]; 4] = [
    &["kako", "šta", "gde", "kada", "zašto", "vodič", "objašnjenje", "definicija", "lista", "saveti"],
    &["najbolji", "recenzija", "poređenje", "iskustva", "alternativa", "preporuke", "izbor", "opcije"],
    &["kupi", "cena", "popust", "prodaja", "naruči", "rezerviši", "preuzmi", "instaliraj"],
    &["sajt", "portal", "homepage", "kontakt", "adresa", "lokacija", "oficijalni"],
];

const INTENT_SIGNALS: [&[&str]; 4] = [
    &["kako", "vodič"],
    &["najbolji", "recenzija"],
    &["cena", "kupi"],
    &[],
];

#[rustfmt::skip]
const INTENT_HINTS: [&[&str]; 4] = [
    &["kako", "šta", "zašto", "vodič", "definicija", "primeri", "saveti"],
    &["najbolji", "recenzija", "poređenje", "iskustva", "preporuke", "alternativa", "vs"],
    &["cena", "kupi", "naruči", "popust", "akcija", "preuzmi", "rezerviši"],
    &["sajt", "zvanični", "kontakt", "adresa", "prijava", "registracija"],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serbian_tables_are_populated() {
        let lexicon = Lexicon::serbian();
        assert!(lexicon.stop_words.len() > 250);
        assert_eq!(lexicon.seed_corpus.len(), 10);
        assert_eq!(lexicon.concept_graph.len(), 24);
        assert_eq!(lexicon.topic_patterns.len(), 6);
        assert_eq!(lexicon.topic_patterns[0].name, "Politika");
        assert!(lexicon.validate().is_ok());
    }

    #[test]
    fn stop_words_cover_function_words() {
        let lexicon = Lexicon::serbian();
        for word in ["kako", "koji", "takođe", "godine", "dvadeset"] {
            assert!(lexicon.is_stop_word(word), "{word} should be a stop word");
        }
        assert!(!lexicon.is_stop_word("vodič"));
    }

    #[test]
    fn related_of_direct_lookup() {
        let lexicon = Lexicon::serbian();
        let related = lexicon.related_of("fudbal").unwrap();
        assert!(related.contains(&"trener".to_string()));
        assert!(lexicon.related_of("hleb").is_none());
    }

    #[test]
    fn clean_term_rejects_noise() {
        let lexicon = Lexicon::serbian();
        assert_eq!(lexicon.clean_term("  Vlada  "), Some("vlada".to_string()));
        assert_eq!(lexicon.clean_term("ab"), None);
        assert_eq!(lexicon.clean_term("Hronika"), None);
        assert_eq!(lexicon.clean_term("u 14:30"), None);
        assert_eq!(lexicon.clean_term("12.05.2024"), None);
        assert_eq!(lexicon.clean_term("domaći hleb"), Some("domaći hleb".to_string()));
    }

    #[test]
    fn intent_table_lookup() {
        let lexicon = Lexicon::serbian();
        assert!(
            lexicon
                .intent_indicators
                .get(IntentType::Transactional)
                .contains(&"cena".to_string())
        );
        assert!(lexicon.intent_signals.get(IntentType::Navigational).is_empty());
    }

    #[test]
    fn json_round_trip_preserves_tables() {
        let lexicon = Lexicon::serbian();
        let json = serde_json::to_string(&lexicon).unwrap();
        let parsed = Lexicon::from_json(&json).unwrap();
        assert_eq!(parsed, lexicon);
    }

    #[test]
    fn from_json_rejects_empty_seed_corpus() {
        let mut lexicon = Lexicon::serbian();
        lexicon.seed_corpus.clear();
        let json = serde_json::to_string(&lexicon).unwrap();
        let err = Lexicon::from_json(&json).unwrap_err();
        assert!(matches!(err, LexiconError::Empty { table: "seed_corpus" }));
    }

    #[test]
    fn from_json_rejects_bad_threshold() {
        let mut lexicon = Lexicon::serbian();
        lexicon.topic_patterns[2].threshold = 1.5;
        let json = serde_json::to_string(&lexicon).unwrap();
        let err = Lexicon::from_json(&json).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidThreshold { .. }));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        assert!(matches!(
            Lexicon::from_json("{not json"),
            Err(LexiconError::Parse(_))
        ));
    }
}
