//! Turning model output into an SEO bundle.

use seo_analysis::Lexicon;
use seo_analysis::lexicon::is_time_or_date;
use seo_analysis::synthesis::{
    KEYWORD_SEPARATOR, KEYWORDS_LINE_MAX_CHARS, SynthesisInput, finalize_outputs,
    join_with_char_limit,
};
use seo_analysis::tokenize::is_long_tail;
use seo_core::{SeoContext, SeoOutputs};
use serde::Deserialize;
use serde_json::Value;

/// Most keywords kept from a model answer.
pub const MAX_MODEL_KEYWORDS: usize = 14;

/// Keyword count the long-tail share is measured against, at least.
const MIN_TARGET_KEYWORDS: usize = 10;

/// Required share of two-to-four-word phrases.
const LONG_TAIL_SHARE: f64 = 0.7;

/// Secondary terms combined with the primary one.
const SECONDARY_TERMS: usize = 5;

/// Accepted length of a synthesized combination, in characters.
const COMBO_CHARS: (usize, usize) = (8, 40);

#[derive(Debug, Default, Deserialize)]
struct ModelAnswer {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    meta: Option<Value>,
    #[serde(default)]
    keywords: Option<Value>,
}

/// Primary and secondary terms the model was briefed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordBrief {
    pub primary: String,
    pub secondaries: Vec<String>,
}

impl KeywordBrief {
    pub fn from_context(context: &SeoContext) -> Self {
        let input = SynthesisInput {
            title: context.document_title.as_deref(),
            key_terms: &context.key_terms,
            main_topics: &context.main_topics,
        };
        Self {
            primary: input.primary(),
            secondaries: context
                .key_terms
                .iter()
                .skip(1)
                .take(SECONDARY_TERMS)
                .cloned()
                .collect(),
        }
    }
}

/// Slice from the first `{` to the last `}`, or the whole input.
pub fn json_slice(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw,
    }
}

/// Builds the final bundle from a model answer.
///
/// A JSON object `{title, meta, keywords[]}` is preferred; otherwise the
/// numbered Markdown sections are read line by line. Whatever the answer
/// lacks is taken from `fallback`.
pub fn parse_model_output(
    raw: &str,
    fallback: &SeoOutputs,
    brief: &KeywordBrief,
    lexicon: &Lexicon,
) -> SeoOutputs {
    let mut title = fallback.title.clone();
    let mut meta = fallback.meta_description.clone();
    let mut keywords_line = fallback.keywords_line.clone();

    match serde_json::from_str::<ModelAnswer>(json_slice(raw)) {
        Ok(answer) => {
            if let Some(t) = answer.title.as_ref().map(value_text).filter(|t| !t.is_empty()) {
                title = t;
            }
            if let Some(m) = answer.meta.as_ref().map(value_text).filter(|m| !m.is_empty()) {
                meta = m;
            }
            if let Some(raw_keywords) = answer.keywords.as_ref().map(keyword_list) {
                let cleaned = sanitize_keywords(&raw_keywords, brief, lexicon);
                if !cleaned.is_empty() {
                    keywords_line =
                        join_with_char_limit(&cleaned, KEYWORDS_LINE_MAX_CHARS, KEYWORD_SEPARATOR);
                }
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "model answer is not JSON, reading sections");
            let sections = read_sections(raw);
            title = sections.title.unwrap_or(title);
            meta = sections.meta.unwrap_or(meta);
            keywords_line = sections.keywords.unwrap_or(keywords_line);
        }
    }

    finalize_outputs(&title, &meta, &keywords_line)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Models sometimes answer with one comma-separated string.
fn keyword_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(value_text).collect(),
        Value::String(line) => line.split(',').map(|k| k.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Sections {
    title: Option<String>,
    meta: Option<String>,
    keywords: Option<String>,
}

/// Reads the line after each numbered heading. Code fences are skipped.
fn read_sections(raw: &str) -> Sections {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("```"))
        .collect();

    let heading = |label: &str, number: &str| {
        lines
            .iter()
            .position(|l| l.to_lowercase().contains(label) || l.starts_with(number))
    };
    let after = |idx: usize| lines.get(idx + 1).map(|l| l.to_string());

    let title_idx = heading("1. seo naslov", "1.");
    let meta_idx = heading("2. meta opis", "2.");
    let keywords_idx = heading("3. formatirana", "3.");

    let mut sections = Sections::default();
    if let (Some(t), Some(m)) = (title_idx, meta_idx)
        && m > t
    {
        sections.title = after(t);
    }
    if let Some(m) = meta_idx
        && keywords_idx.is_none_or(|k| k > m)
    {
        sections.meta = after(m);
    }
    if let Some(k) = keywords_idx {
        sections.keywords = after(k);
    }
    sections
}

/// Cleans model keywords and tops up long-tail phrases.
///
/// Keeps lowercase, deduplicated terms of at least three characters that are
/// not clock times, dates, stop words, banned terms or clickbait. Then adds
/// primary-secondary combinations and `{single} {primary}` extensions until
/// 70% of the list is long-tail. Returns at most [`MAX_MODEL_KEYWORDS`].
pub fn sanitize_keywords(raw: &[String], brief: &KeywordBrief, lexicon: &Lexicon) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for keyword in raw {
        let Some(term) = lexicon.clean_term(keyword) else {
            continue;
        };
        if is_time_or_date(&term) || lexicon.is_stop_word(&term) {
            continue;
        }
        if lexicon.clickbait_tokens.iter().any(|c| term.contains(c.as_str())) {
            continue;
        }
        if !out.contains(&term) {
            out.push(term);
        }
    }

    let target_total = out.len().clamp(MIN_TARGET_KEYWORDS, MAX_MODEL_KEYWORDS);
    let target_long = (target_total as f64 * LONG_TAIL_SHARE).ceil() as usize;

    let primary = brief.primary.trim().to_lowercase();
    let secondaries = brief
        .secondaries
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    for secondary in secondaries {
        if out.len() >= MAX_MODEL_KEYWORDS {
            break;
        }
        for combo in [format!("{primary} {secondary}"), format!("{secondary} {primary}")] {
            let combo = combo.trim().to_string();
            let chars = combo.chars().count();
            if combo.is_empty()
                || out.contains(&combo)
                || !is_long_tail(&combo)
                || chars < COMBO_CHARS.0
                || chars > COMBO_CHARS.1
            {
                continue;
            }
            out.push(combo);
        }
    }

    let mut long_count = out.iter().filter(|k| is_long_tail(k)).count();
    if long_count < target_long {
        let singles: Vec<String> = out.iter().filter(|k| !is_long_tail(k)).cloned().collect();
        for single in singles {
            if long_count >= target_long {
                break;
            }
            let combo = format!("{single} {primary}").trim().to_string();
            if !out.contains(&combo) && is_long_tail(&combo) {
                out.push(combo);
                long_count += 1;
            }
        }
    }

    out.truncate(MAX_MODEL_KEYWORDS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_analysis::synthesis::{META_MAX_CHARS, TITLE_MAX_CHARS};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn fallback() -> SeoOutputs {
        finalize_outputs("Rezervni naslov", "Rezervni opis teksta", "hleb, kvasac")
    }

    fn brief() -> KeywordBrief {
        KeywordBrief {
            primary: "domaći hleb".into(),
            secondaries: strings(&["kvasac", "brašno"]),
        }
    }

    #[test]
    fn json_slice_trims_chatter() {
        assert_eq!(json_slice("Evo odgovora: {\"a\": 1} hvala"), "{\"a\": 1}");
        assert_eq!(json_slice("bez zagrada"), "bez zagrada");
        assert_eq!(json_slice("} obrnuto {"), "} obrnuto {");
    }

    #[test]
    fn json_answer_replaces_fields() {
        let raw = r#"```json
        {"title": "Kako napraviti domaći hleb.", "meta": "Recept za domaći hleb od kvasca i brašna.",
         "keywords": ["domaći hleb recept", "Hleb od kvasca", "12:30", "je", "besplatno hleb"],
         "slug": "domaci-hleb"}
        ```"#;
        let seo = parse_model_output(raw, &fallback(), &brief(), &Lexicon::serbian());

        assert_eq!(seo.title, "Kako napraviti domaći hleb");
        assert_eq!(seo.meta_description, "Recept za domaći hleb od kvasca i brašna");
        assert!(seo.keywords_line.starts_with("domaći hleb recept, hleb od kvasca"));
        assert!(!seo.keywords_line.contains("12:30"));
        assert!(!seo.keywords_line.contains("besplatno"));
        assert!(seo.markdown.contains("Kako napraviti domaći hleb"));
    }

    #[test]
    fn missing_fields_keep_fallback() {
        let seo = parse_model_output(r#"{"meta": ""}"#, &fallback(), &brief(), &Lexicon::serbian());
        assert_eq!(seo, fallback());
    }

    #[test]
    fn markdown_answer_is_read_by_section() {
        let raw = "1. SEO Naslov (Title Tag)\n\n```\nNovi naslov\n```\n\n\
                   2. Meta Opis (Meta Description)\n\n```\nNovi opis.\n```\n\n\
                   3. Formatirana Lista Ključnih Reči\n\n```\nprva fraza, druga fraza\n```";
        let seo = parse_model_output(raw, &fallback(), &brief(), &Lexicon::serbian());
        assert_eq!(seo.title, "Novi naslov");
        assert_eq!(seo.meta_description, "Novi opis");
        assert_eq!(seo.keywords_line, "prva fraza, druga fraza");
    }

    #[test]
    fn unparseable_answer_keeps_fallback() {
        let seo = parse_model_output("nema strukture", &fallback(), &brief(), &Lexicon::serbian());
        assert_eq!(seo, fallback());
    }

    #[test]
    fn outputs_respect_budgets() {
        let raw = format!(
            r#"{{"title": "{}", "meta": "{}"}}"#,
            "naslov ".repeat(20),
            "opis ".repeat(60)
        );
        let seo = parse_model_output(&raw, &fallback(), &brief(), &Lexicon::serbian());
        assert!(seo.title.chars().count() <= TITLE_MAX_CHARS);
        assert!(seo.meta_description.chars().count() <= META_MAX_CHARS);
    }

    #[test]
    fn sanitize_filters_and_tops_up() {
        let raw = strings(&["Hleb", "hleb", "ab", "01.02.2024", "video", "šokantno otkriće", "kvasac"]);
        let out = sanitize_keywords(&raw, &brief(), &Lexicon::serbian());

        assert_eq!(out[0], "hleb");
        assert_eq!(out[1], "kvasac");
        assert!(out.contains(&"domaći hleb kvasac".to_string()));
        assert!(out.contains(&"kvasac domaći hleb".to_string()));
        assert!(out.contains(&"hleb domaći hleb".to_string()));
        assert!(!out.iter().any(|k| k.contains("video") || k.contains("šokantno")));
        assert!(out.len() <= MAX_MODEL_KEYWORDS);
        let unique: std::collections::HashSet<&String> = out.iter().collect();
        assert_eq!(unique.len(), out.len());
    }

    #[test]
    fn sanitize_caps_at_fourteen() {
        let raw: Vec<String> = (0..30).map(|i| format!("fraza broj {i}")).collect();
        let out = sanitize_keywords(&raw, &brief(), &Lexicon::serbian());
        assert_eq!(out.len(), MAX_MODEL_KEYWORDS);
        assert_eq!(out[0], "fraza broj 0");
    }

    #[test]
    fn brief_from_context() {
        let context = SeoContext {
            key_terms: strings(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]),
            ..SeoContext::default()
        };
        let brief = KeywordBrief::from_context(&context);
        assert_eq!(brief.primary, "a1");
        assert_eq!(brief.secondaries, strings(&["a2", "a3", "a4", "a5", "a6"]));

        let titled = SeoContext {
            document_title: Some("Jedan dva tri četiri".into()),
            ..SeoContext::default()
        };
        assert_eq!(KeywordBrief::from_context(&titled).primary, "Jedan dva tri");
    }
}
