use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::debug;

use nx_core::article::MIN_FULL_TEXT_CHARS;
use nx_core::{dates, ArticleContent, Error, Result};

use crate::extractors::jsonld::{self, ArticleMetadata};
use crate::extractors::{utils, ArticleExtractor};

use super::SIGNATURE_SUFFIX;

/// Hybrid strategy for the current Gleaner site: JSON-LD metadata first,
/// CSS selectors as fallback, with the body always coming from the DOM
/// (the structured data carries no full text).
#[derive(Debug, Clone)]
pub struct GleanerHybridExtractor;

const TITLE_SELECTORS: [&str; 3] = ["h1.article--title", "h1.title", "h1"];
const BODY_SELECTORS: [&str; 3] = [
    "div.article--body",
    "div.article-content",
    "div.field-name-body",
];
const AUTHOR_SELECTORS: [&str; 2] = ["div.article--authors", "a.author-term"];
const DATE_CANDIDATES: [(&str, &str); 2] = [
    ("meta[property='article:published_time']", "content"),
    ("time", "datetime"),
];

impl GleanerHybridExtractor {
    pub fn new() -> Self {
        Self
    }

    fn title(document: &Html, metadata: &ArticleMetadata) -> Option<String> {
        if let Some(headline) = &metadata.headline {
            return Some(headline.clone());
        }
        TITLE_SELECTORS
            .iter()
            .find_map(|selector| utils::select_first_text(document, selector))
    }

    fn full_text(document: &Html) -> Option<String> {
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

    fn author(document: &Html, metadata: &ArticleMetadata) -> Option<String> {
        let raw = metadata.author_name.clone().or_else(|| {
            AUTHOR_SELECTORS
                .iter()
                .find_map(|selector| utils::select_first_text(document, selector))
        })?;
        let cleaned = utils::clean_author(&raw);
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    fn published_date(document: &Html, metadata: &ArticleMetadata) -> Option<DateTime<Utc>> {
        if let Some(parsed) = metadata
            .date_published
            .as_deref()
            .and_then(dates::parse_iso_utc)
        {
            return Some(parsed);
        }
        utils::first_date(document, &DATE_CANDIDATES)
    }
}

impl Default for GleanerHybridExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleExtractor for GleanerHybridExtractor {
    fn name(&self) -> &'static str {
        "gleaner-hybrid"
    }

    async fn extract(&self, html: &str, url: &str) -> Result<ArticleContent> {
        let document = Html::parse_document(html);
        let metadata = jsonld::parse_article_metadata(&document).unwrap_or_default();

        let title = Self::title(&document, &metadata).ok_or_else(|| Error::MissingField {
            field: "title",
            url: url.to_string(),
        })?;
        let full_text = Self::full_text(&document).ok_or_else(|| Error::MissingField {
            field: "full_text",
            url: url.to_string(),
        })?;
        let author = Self::author(&document, &metadata);
        let published_date = Self::published_date(&document, &metadata);

        debug!(
            "Hybrid extraction for {}: {} chars, author {:?}",
            url,
            full_text.len(),
            author
        );
        ArticleContent::new(title, full_text, author, published_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PARAGRAPH: &str =
        "Health officials urged an integrated response spanning human, animal and environmental care.";

    fn hybrid_html() -> String {
        format!(
            r#"
            <html><body>
                <script type="application/ld+json">
                {{
                    "@type": "Article",
                    "headline": "Embrace 'One Health'",
                    "author": {{"@type": "Person", "name": "Corey Robinson"}},
                    "datePublished": "2024-01-15T08:30:00-05:00"
                }}
                </script>
                <h1 class="article--title">CSS Title Should Lose</h1>
                <div class="article--authors">CSS Author Should Lose</div>
                <div class="article--body">
                    <p>{}</p>
                </div>
            </body></html>
            "#,
            PARAGRAPH
        )
    }

    #[tokio::test]
    async fn test_json_ld_wins_over_selectors() {
        let extractor = GleanerHybridExtractor::new();
        let article = extractor
            .extract(&hybrid_html(), "https://jamaica-gleaner.com/article/2")
            .await
            .unwrap();

        assert_eq!(article.title(), "Embrace 'One Health'");
        assert_eq!(article.author(), Some("Corey Robinson"));
        assert!(article.full_text().starts_with(PARAGRAPH));
        assert_eq!(
            article.published_date(),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 13, 30, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_selectors_back_up_missing_json_ld() {
        let html = format!(
            r#"
            <h1 class="article--title">New Site Title</h1>
            <div class="article--authors">By Staff Writer/Gleaner Writer</div>
            <div class="article--body"><p>{}</p></div>
            "#,
            PARAGRAPH
        );
        let extractor = GleanerHybridExtractor::new();
        let article = extractor.extract(&html, "http://example.test/a").await.unwrap();
        assert_eq!(article.title(), "New Site Title");
        assert_eq!(article.author(), Some("Staff Writer"));
    }

    #[tokio::test]
    async fn test_legacy_containers_still_work() {
        let html = format!(
            r#"<h1 class="title">Old Markup</h1><div class="field-name-body"><p>{}</p></div>"#,
            PARAGRAPH
        );
        let extractor = GleanerHybridExtractor::new();
        let article = extractor.extract(&html, "http://example.test/b").await.unwrap();
        assert_eq!(article.title(), "Old Markup");
        assert!(article.full_text().starts_with(PARAGRAPH));
    }

    #[tokio::test]
    async fn test_body_missing_is_hard_error() {
        let html = r#"<h1>Title Only</h1><p>Stray paragraph outside any known container.</p>"#;
        let extractor = GleanerHybridExtractor::new();
        let err = extractor.extract(html, "http://example.test/c").await.unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "full_text", .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_ld_falls_back_silently() {
        let html = format!(
            r#"
            <script type="application/ld+json">{{broken</script>
            <h1 class="title">Fallback Title</h1>
            <div class="article-content"><p>{}</p></div>
            "#,
            PARAGRAPH
        );
        let extractor = GleanerHybridExtractor::new();
        let article = extractor.extract(&html, "http://example.test/d").await.unwrap();
        assert_eq!(article.title(), "Fallback Title");
    }
}
