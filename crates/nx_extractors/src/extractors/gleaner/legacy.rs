use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::debug;

use nx_core::article::MIN_FULL_TEXT_CHARS;
use nx_core::{ArticleContent, Error, Result};

use crate::extractors::{utils, ArticleExtractor};

use super::SIGNATURE_SUFFIX;

/// Pure-CSS strategy for the legacy Gleaner site markup.
#[derive(Debug, Clone)]
pub struct GleanerLegacyExtractor;

const TITLE_SELECTORS: [&str; 2] = ["h1.title", "h1"];
const BODY_SELECTORS: [&str; 2] = ["div.article-content", "div.field-name-body"];
const DATE_CANDIDATES: [(&str, &str); 2] = [
    ("meta[property='article:published_time']", "content"),
    ("time", "datetime"),
];

impl GleanerLegacyExtractor {
    pub fn new() -> Self {
        Self
    }

    fn title(document: &Html) -> Option<String> {
        TITLE_SELECTORS
            .iter()
            .find_map(|selector| utils::select_first_text(document, selector))
    }

    fn full_text(document: &Html) -> Option<String> {
        // The first container present decides; a short body is not rescued
        // by a later selector.
        let container = BODY_SELECTORS
            .iter()
            .find_map(|selector| utils::select_first(document, selector))?;
        let text = utils::join_paragraphs(container, SIGNATURE_SUFFIX);
        if text.trim().chars().count() >= MIN_FULL_TEXT_CHARS {
            Some(text)
        } else {
            None
        }
    }

    fn author(document: &Html) -> Option<String> {
        let raw = utils::select_first_text(document, "a.author-term")?;
        let cleaned = utils::clean_author(&raw);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    fn published_date(document: &Html) -> Option<DateTime<Utc>> {
        utils::first_date(document, &DATE_CANDIDATES)
    }
}

impl Default for GleanerLegacyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleExtractor for GleanerLegacyExtractor {
    fn name(&self) -> &'static str {
        "gleaner-legacy"
    }

    async fn extract(&self, html: &str, url: &str) -> Result<ArticleContent> {
        let document = Html::parse_document(html);

        let title = Self::title(&document).ok_or_else(|| Error::MissingField {
            field: "title",
            url: url.to_string(),
        })?;
        let full_text = Self::full_text(&document).ok_or_else(|| Error::MissingField {
            field: "full_text",
            url: url.to_string(),
        })?;
        let author = Self::author(&document);
        let published_date = Self::published_date(&document);

        debug!(
            "Legacy extraction for {}: {} chars, author {:?}",
            url,
            full_text.len(),
            author
        );
        ArticleContent::new(title, full_text, author, published_date)
    }
}
