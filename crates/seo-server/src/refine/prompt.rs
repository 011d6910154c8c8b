//! Prompt sent to the model refiners.

use seo_core::SeoContext;

use super::parse::KeywordBrief;

/// System message for chat-style providers.
pub const SYSTEM_PROMPT: &str = "Ti si SEO asistent za srpski jezik.";

const INSTRUCTIONS: &str = "\
Na osnovu analize teksta napiši SEO elemente na srpskom jeziku (latinica).

Vrati JSON objekat sa poljima:
- \"title\": SEO naslov, najviše 75 karaktera, počinje primarnom ključnom reči
- \"meta\": meta opis od 150 do 160 karaktera, prirodan i informativan
- \"keywords\": niz od 10 do 14 ključnih fraza, 70 do 90% fraza od 2 do 4 reči
- \"slug\": kratak URL slug bez dijakritika

Pravila:
- bez clickbait izraza, datuma, vremena i naziva rubrika
- bez ponavljanja iste fraze
- ključne fraze malim slovima";

/// Builds the user prompt for `context`.
pub fn build_prompt(context: &SeoContext) -> String {
    let brief = KeywordBrief::from_context(context);
    let intent = context
        .search_intent_type
        .map(|i| i.as_str())
        .unwrap_or("informational");
    let title = context
        .document_title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("(nema)");

    format!(
        "{INSTRUCTIONS}\n\n\
         Primarna ključna reč: {primary}\n\
         Sekundarne ključne reči: {secondaries}\n\
         Glavne teme: {topics}\n\
         Namera pretrage: {intent}\n\
         Naslov dokumenta: {title}\n\n\
         Uzorak teksta:\n{sample}\n\n\
         Vrati SAMO JSON, bez objašnjenja i bez code fences.",
        primary = brief.primary,
        secondaries = brief.secondaries.join(", "),
        topics = context.main_topics.join(", "),
        sample = context.text_sample,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_core::IntentType;

    #[test]
    fn prompt_carries_context() {
        let context = SeoContext {
            document_title: Some("Domaći hleb".into()),
            key_terms: vec!["hleb".into(), "kvasac".into(), "brašno".into()],
            main_topics: vec!["kuvanje".into()],
            search_intent_type: Some(IntentType::Informational),
            text_sample: "Kako napraviti hleb kod kuće.".into(),
        };
        let prompt = build_prompt(&context);

        assert!(prompt.contains("Primarna ključna reč: hleb"));
        assert!(prompt.contains("Sekundarne ključne reči: kvasac, brašno"));
        assert!(prompt.contains("Glavne teme: kuvanje"));
        assert!(prompt.contains("Naslov dokumenta: Domaći hleb"));
        assert!(prompt.contains("Kako napraviti hleb kod kuće."));
        assert!(prompt.ends_with("bez code fences."));
    }

    #[test]
    fn prompt_marks_missing_title() {
        let prompt = build_prompt(&SeoContext::default());
        assert!(prompt.contains("Naslov dokumenta: (nema)"));
    }
}
