use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use tracing::debug;

use nx_core::article::MIN_FULL_TEXT_CHARS;
use nx_core::{dates, ArticleContent, Error, Result};
use nx_inference::CompletionModel;

use crate::extractors::{utils, ArticleExtractor};
use crate::recovery;

/// Strategy for scanned newspaper archive pages (gleaner.newspaperarchive.com).
///
/// Body text is OCR output with unreliable structure, so the headline and
/// byline are recovered from the text itself via the completion model, with
/// structural fallbacks when the model has no answer.
pub struct GleanerArchiveExtractor {
    model: Arc<dyn CompletionModel>,
}

/// Per-block floor when concatenating OCR containers.
const MIN_OCR_BLOCK_CHARS: usize = 50;
/// Per-paragraph floor for the paragraph-tag tactic.
const MIN_PARAGRAPH_CHARS: usize = 20;

/// Everything the title/date chains need from the DOM, collected up front
/// so the parsed document is not held across completion calls.
struct PageSnapshot {
    full_text: Option<String>,
    og_title: Option<String>,
    heading: Option<String>,
    title_tag: Option<String>,
    meta_published: Option<String>,
    time_attr: Option<String>,
}

impl GleanerArchiveExtractor {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    fn snapshot(html: &str) -> PageSnapshot {
        let document = Html::parse_document(html);
        PageSnapshot {
            full_text: Self::full_text(&document),
            og_title: utils::select_first_attr(&document, "meta[property='og:title']", "content"),
            heading: utils::select_first_text(&document, "h1"),
            title_tag: utils::select_first_text(&document, "title"),
            meta_published: utils::select_first_attr(
                &document,
                "meta[property='article:published_time']",
                "content",
            ),
            time_attr: utils::select_first_attr(&document, "time", "datetime"),
        }
    }

    /// Five tactics of decreasing specificity; the first one yielding enough
    /// trimmed text wins.
    fn full_text(document: &Html) -> Option<String> {
        // 1. The named OCR section's inner text area.
        if let Some(section) = utils::select_first(document, "div.organicOCRSection") {
            if let Ok(text_area) = Selector::parse("div.textArea") {
                if let Some(area) = section.select(&text_area).next() {
                    let text = area.text().collect::<String>().trim().to_string();
                    if text.chars().count() >= MIN_FULL_TEXT_CHARS {
                        debug!("OCR text from organicOCRSection: {} chars", text.len());
                        return Some(text);
                    }
                }
            }
        }

        // 2. Every text area on the page, concatenated.
        if let Some(text) = Self::concatenated(document, |el| {
            el.value().attr("class").map_or(false, |c| c.split_whitespace().any(|n| n == "textArea"))
        }) {
            debug!("OCR text from textArea divs: {} chars", text.len());
            return Some(text);
        }

        // 3. Any div whose class mentions OCR.
        if let Some(text) = Self::concatenated(document, |el| {
            el.value()
                .attr("class")
                .map_or(false, |c| c.to_lowercase().contains("ocr"))
        }) {
            debug!("OCR text from ocr-classed divs: {} chars", text.len());
            return Some(text);
        }

        // 4. Paragraph tags, keeping only substantial paragraphs.
        if let Ok(selector) = Selector::parse("p") {
            let paragraphs: Vec<String> = document
                .select(&selector)
                .map(|p| p.text().collect::<String>().trim().to_string())
                .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
                .collect();
            if !paragraphs.is_empty() {
                let text = paragraphs.join("\n\n");
                if text.chars().count() >= MIN_FULL_TEXT_CHARS {
                    debug!("OCR text from paragraphs: {} chars", text.len());
                    return Some(text);
                }
            }
        }

        // 5. Generic page containers.
        for tag in ["main", "article"] {
            if let Some(text) = utils::select_first_text(document, tag) {
                if text.chars().count() >= MIN_FULL_TEXT_CHARS {
                    debug!("OCR text from {} tag: {} chars", tag, text.len());
                    return Some(text);
                }
            }
        }

        None
    }

    fn concatenated(
        document: &Html,
        matches: impl Fn(&scraper::ElementRef<'_>) -> bool,
    ) -> Option<String> {
        let selector = Selector::parse("div").ok()?;
        let blocks: Vec<String> = document
            .select(&selector)
            .filter(|el| matches(el))
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| text.chars().count() > MIN_OCR_BLOCK_CHARS)
            .collect();
        if blocks.is_empty() {
            return None;
        }
        let joined = blocks.join("\n\n");
        if joined.chars().count() >= MIN_FULL_TEXT_CHARS {
            Some(joined)
        } else {
            None
        }
    }

    async fn title(&self, snapshot: &PageSnapshot, full_text: &str, url: &str) -> Option<String> {
        if let Some(headline) = recovery::recover_headline(self.model.as_ref(), full_text).await {
            return Some(headline);
        }
        if let Some(title) = &snapshot.og_title {
            return Some(title.clone());
        }
        if let Some(title) = &snapshot.heading {
            return Some(title.clone());
        }
        if let Some(title) = &snapshot.title_tag {
            return Some(title.clone());
        }
        Self::title_from_url(url)
    }

    /// Synthesize a title from the YYYY-MM-DD segment archive URLs carry.
    fn title_from_url(url: &str) -> Option<String> {
        url.split('/')
            .find(|part| part.len() == 10 && part.starts_with("20"))
            .map(|date| format!("Gleaner Archive - {}", date))
    }

    fn published_date(snapshot: &PageSnapshot, url: &str) -> Option<DateTime<Utc>> {
        // The URL date segment is the most reliable source for archives.
        if let Some(date) = url
            .split('/')
            .find(|part| part.len() == 10 && part.matches('-').count() == 2)
            .and_then(dates::parse_iso_utc)
        {
            return Some(date);
        }
        if let Some(date) = snapshot.meta_published.as_deref().and_then(dates::parse_iso_utc) {
            return Some(date);
        }
        snapshot.time_attr.as_deref().and_then(dates::parse_iso_utc)
    }
}

impl std::fmt::Debug for GleanerArchiveExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GleanerArchiveExtractor")
            .field("model", &self.model.name())
            .finish()
    }
}

#[async_trait]
impl ArticleExtractor for GleanerArchiveExtractor {
    fn name(&self) -> &'static str {
        "gleaner-archive"
    }

    async fn extract(&self, html: &str, url: &str) -> Result<ArticleContent> {
        debug!("Extracting archive article from {}", url);
        let snapshot = Self::snapshot(html);

        let full_text = snapshot.full_text.clone().ok_or_else(|| Error::MissingField {
            field: "full_text",
            url: url.to_string(),
        })?;
        let title = self
            .title(&snapshot, &full_text, url)
            .await
            .ok_or_else(|| Error::MissingField {
                field: "title",
                url: url.to_string(),
            })?;
        let published_date = Self::published_date(&snapshot, url);
        let author = recovery::recover_author(self.model.as_ref(), &full_text).await;

        debug!(
            "Archive extraction for {}: {} chars, author {:?}, date {:?}",
            url,
            full_text.len(),
            author,
            published_date
        );
        ArticleContent::new(title, full_text, author, published_date)
    }
}
