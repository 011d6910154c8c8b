//! Article extraction from news pages.
//!
//! Content is taken from the first source that yields enough text:
//! 1. JSON-LD `articleBody` of an Article / NewsArticle / BlogPosting node
//! 2. Paragraphs of the best-scoring article container
//! 3. Every paragraph on the page longer than 40 characters
//!
//! Navigation, headers, footers, asides, scripts and common ad/share widgets
//! never contribute text.

use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use seo_analysis::Lexicon;
use seo_core::{ContentMetadata, ExtractedContent};
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;

/// Minimum length of a usable content block.
const MIN_CONTENT_CHARS: usize = 100;

/// Paragraphs shorter than this are treated as captions or teasers.
const MIN_PARAGRAPH_CHARS: usize = 40;

/// Content longer than this is cut back to a sentence end.
const MAX_CONTENT_CHARS: usize = 2500;
const CUT_SEARCH_CHARS: usize = 2300;

/// Container length credited to its score, in characters.
const MAX_SCORED_CHARS: usize = 20_000;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const UNTITLED: &str = "Bez naslova";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const BOILERPLATE_TAGS: &[&str] = &["script", "style", "noscript", "nav", "header", "footer", "aside"];

const NOISE_CLASSES: &[&str] = &[
    "sidebar", "menu", "navigation", "nav", "ads", "ad", "advertisement", "banner",
    "social-share", "social", "share", "share-buttons", "comments", "comment", "related-posts",
    "related-articles", "popup", "modal", "cookie-notice", "newsletter", "subscription",
    "widget", "footer", "header", "tags", "trending", "recommended", "more-stories",
];

const ARTICLE_SELECTORS: &[&str] = &[
    "article", ".article", ".post", ".entry-content", ".post-content", ".article-content",
    "[itemprop=\"articleBody\"]", ".article__content", ".article-body__content", ".article-body",
    ".single-article", ".single-content", ".post-body", ".post__content", ".post-text",
    ".story-content", "main", ".main-content", "#content", ".story-body",
];

const ARTICLE_TYPES: &[&str] = &["newsarticle", "article", "blogposting"];

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid selector"));
static JSON_LD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type=\"application/ld+json\"]").expect("valid selector")
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+[A-ZČĆŽŠĐ]").expect("valid regex"));
static TITLE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9čćžšđ]+").expect("valid regex"));
static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C\r]+").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));
static AGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPre\s?\d+\s?[hm]\b").expect("valid regex"));
static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}:\d{2}\b").expect("valid regex"));
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}\.\d{1,2}\.\d{2,4}\b").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9_\sčćžšđČĆŽŠĐ.,!?;:\-]").expect("valid regex")
});

/// Errors from fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Neispravan format URL-a: {0}")]
    InvalidUrl(String),

    #[error("Sajt nije dostupan ili URL ne postoji: {0}")]
    Unreachable(String),

    #[error("Timeout - sajt predugo odgovara")]
    Timeout,

    #[error("Sajt je vratio status {0}")]
    Status(u16),

    #[error("Greška pri obradi URL-a: {0}")]
    Http(String),
}

/// Fetches pages with browser-like headers and extracts the article.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: reqwest::Client,
}

impl HttpExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ExtractError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("sr-RS,sr;q=0.9,en;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    /// Downloads `url` and extracts its article.
    pub async fn fetch(&self, url: &str, lexicon: &Lexicon) -> Result<ExtractedContent, ExtractError> {
        let parsed = validate_url(url)?;

        let response = self.client.get(parsed).send().await.map_err(classify)?;
        if !response.status().is_success() {
            return Err(ExtractError::Status(response.status().as_u16()));
        }
        let html = response.text().await.map_err(classify)?;

        let content = extract_from_html(&html, lexicon);
        tracing::info!(
            url,
            method = %content.extraction_method,
            chars = content.content.chars().count(),
            words = content.word_count,
            "content extracted"
        );
        Ok(content)
    }
}

/// Accepts absolute http(s) URLs only.
pub fn validate_url(url: &str) -> Result<reqwest::Url, ExtractError> {
    let parsed =
        reqwest::Url::parse(url.trim()).map_err(|e| ExtractError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ExtractError::InvalidUrl(format!("unsupported scheme '{other}'"))),
    }
}

fn classify(err: reqwest::Error) -> ExtractError {
    if err.is_timeout() {
        ExtractError::Timeout
    } else if err.is_connect() {
        ExtractError::Unreachable(err.to_string())
    } else {
        ExtractError::Http(err.to_string())
    }
}

/// Extracts title, metadata and article text from an HTML document.
pub fn extract_from_html(html: &str, lexicon: &Lexicon) -> ExtractedContent {
    let doc = Html::parse_document(html);
    let ld = json_ld_article(&doc);

    let metadata = ContentMetadata {
        description: first_attr(
            &doc,
            &["meta[name=\"description\"]", "meta[property=\"og:description\"]"],
            "content",
        )
        .unwrap_or_default(),
        keywords: first_attr(&doc, &["meta[name=\"keywords\"]"], "content").unwrap_or_default(),
        author: first_attr(
            &doc,
            &["meta[name=\"author\"]", "meta[property=\"article:author\"]"],
            "content",
        )
        .or_else(|| ld.as_ref().map(|a| a.author.clone()))
        .unwrap_or_default(),
        publish_date: first_attr(
            &doc,
            &["meta[property=\"article:published_time\"]", "meta[name=\"publish-date\"]"],
            "content",
        )
        .or_else(|| first_attr(&doc, &["time"], "datetime"))
        .or_else(|| ld.as_ref().map(|a| a.published.clone()))
        .unwrap_or_default(),
    };

    let h1 = first_text(&doc, "h1");
    let mut title = first_attr(
        &doc,
        &["meta[property=\"og:title\"]", "meta[name=\"twitter:title\"]"],
        "content",
    )
    .or_else(|| first_text(&doc, "title"))
    .or_else(|| h1.clone())
    .unwrap_or_default();
    if let Some(article) = &ld
        && !article.headline.is_empty()
        && title.chars().count() < 5
    {
        title = article.headline.clone();
    }

    let (content, method) = match ld.as_ref().map(|a| a.body.trim()) {
        Some(body) if body.chars().count() > MIN_CONTENT_CHARS => (body.to_string(), "json-ld"),
        _ => {
            let base_title = ld
                .as_ref()
                .map(|a| a.headline.clone())
                .filter(|h| !h.is_empty())
                .or(h1)
                .unwrap_or_else(|| title.clone());
            match best_container(&doc, &title_tokens(&base_title, lexicon)) {
                Some(text) => (text, "article"),
                None => {
                    let text = long_paragraphs(doc.select(&PARAGRAPH));
                    let method = if text.is_empty() { "none" } else { "paragraphs" };
                    (text, method)
                }
            }
        }
    };

    let content = cap_length(&content);
    let clean_text = clean_text(&content);
    let word_count = clean_text.split_whitespace().count();

    ExtractedContent {
        title: if title.is_empty() { UNTITLED.to_string() } else { title },
        content,
        metadata,
        word_count,
        clean_text,
        extraction_method: method.to_string(),
    }
}

/// Collapses whitespace and strips relative-age markers, clock times, dates
/// and characters outside letters, digits and basic punctuation.
pub fn clean_text(content: &str) -> String {
    let text = INLINE_SPACE.replace_all(content, " ");
    let text = BLANK_LINES.replace_all(&text, "\n");
    let text = AGE_MARKER.replace_all(&text, "");
    let text = CLOCK_TIME.replace_all(&text, "");
    let text = DATE.replace_all(&text, "");
    let text = DISALLOWED.replace_all(&text, "");
    text.trim().to_string()
}

/// Cuts overly long content at the last sentence end within the search window.
pub fn cap_length(content: &str) -> String {
    let content = content.trim();
    if content.chars().count() <= MAX_CONTENT_CHARS {
        return content.to_string();
    }

    let window: String = content.chars().take(CUT_SEARCH_CHARS).collect();
    match SENTENCE_END.find_iter(&window).last() {
        Some(m) => window[..m.start() + 1].trim().to_string(),
        None => window,
    }
}

#[derive(Debug, Default)]
struct LdArticle {
    headline: String,
    author: String,
    published: String,
    body: String,
}

fn json_ld_article(doc: &Html) -> Option<LdArticle> {
    let mut nodes = Vec::new();
    for script in doc.select(&JSON_LD) {
        let raw: String = script.text().collect();
        if let Ok(value) = serde_json::from_str::<Value>(raw.trim()) {
            flatten_ld(value, &mut nodes);
        }
    }

    let article = nodes.into_iter().find(|node| {
        let kind = node
            .get("@type")
            .or_else(|| node.get("type"))
            .map(type_string)
            .unwrap_or_default()
            .to_lowercase();
        ARTICLE_TYPES.iter().any(|t| kind.contains(t))
    })?;

    let field = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| article.get(*k).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    };
    let author = match article.get("author") {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Array(list)) => list
            .first()
            .and_then(|a| a.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(other) => other
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        None => String::new(),
    };

    Some(LdArticle {
        headline: field(&["headline", "name"]),
        author,
        published: field(&["datePublished", "dateCreated"]),
        body: field(&["articleBody"]),
    })
}

fn flatten_ld(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => items.into_iter().for_each(|v| flatten_ld(v, out)),
        Value::Object(mut map) => {
            let graph = map.remove("@graph");
            out.push(Value::Object(map));
            if let Some(graph) = graph {
                flatten_ld(graph, out);
            }
        }
        _ => {}
    }
}

fn type_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}

fn title_tokens(title: &str, lexicon: &Lexicon) -> Vec<String> {
    TITLE_SPLIT
        .split(&title.to_lowercase())
        .map(str::trim)
        .filter(|t| t.chars().count() > 2 && !lexicon.is_stop_word(t) && !lexicon.is_banned(t))
        .map(str::to_string)
        .collect()
}

/// Text of the container that best matches the title.
///
/// Score: 100 per title-token occurrence plus one per hundred characters.
fn best_container(doc: &Html, tokens: &[String]) -> Option<String> {
    let mut best: Option<(f64, String)> = None;

    for css in ARTICLE_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let Some(element) = doc.select(&selector).find(|e| !is_noise(e)) else {
            continue;
        };

        let joined = long_paragraphs(element.select(&PARAGRAPH));
        let raw = if joined.chars().count() > MIN_CONTENT_CHARS {
            joined
        } else {
            visible_text(element)
        };
        let len = raw.chars().count();
        if len < MIN_CONTENT_CHARS {
            continue;
        }

        let low = raw.to_lowercase();
        let hits: usize = tokens.iter().map(|t| low.matches(t.as_str()).count()).sum();
        let score = hits as f64 * 100.0 + len.min(MAX_SCORED_CHARS) as f64 / 100.0;
        if best.as_ref().is_none_or(|(s, _)| score > *s) {
            best = Some((score, raw));
        }
    }

    best.map(|(_, text)| text)
}

fn long_paragraphs<'a>(paragraphs: impl Iterator<Item = ElementRef<'a>>) -> String {
    paragraphs
        .filter(|p| !is_noise(p))
        .map(visible_text)
        .filter(|t| t.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of `element` without boilerplate descendants, whitespace-normalized.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(|a| a.value().as_element())
            .any(is_noise_element);
        if !hidden {
            pieces.push(&**text);
        }
    }
    pieces.concat().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_noise(element: &ElementRef<'_>) -> bool {
    is_noise_element(element.value())
        || element
            .ancestors()
            .filter_map(|a| a.value().as_element())
            .any(is_noise_element)
}

fn is_noise_element(element: &Element) -> bool {
    BOILERPLATE_TAGS.contains(&element.name())
        || element.classes().any(|c| NOISE_CLASSES.contains(&c))
        || element.id() == Some("comments")
}

fn first_attr(doc: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        doc.select(&selector)
            .filter_map(|e| e.value().attr(attr))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(str::to_string)
    })
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    doc.select(&selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
