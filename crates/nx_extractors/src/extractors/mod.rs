use async_trait::async_trait;
use nx_core::{ArticleContent, Result};

pub mod gleaner;
pub mod jsonld;

/// An extraction strategy for one family of page layouts.
///
/// Mandatory fields (title, body) fail with [`nx_core::Error::MissingField`]
/// once their fallback chain is exhausted. Optional fields (author, date)
/// never fail; they resolve to `None` instead.
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Identifying name, used in combined failure reports.
    fn name(&self) -> &'static str;

    /// Extract a validated article record from raw page markup.
    async fn extract(&self, html: &str, url: &str) -> Result<ArticleContent>;
}

/// Common DOM utilities shared by the extraction strategies.
pub(crate) mod utils {
    use chrono::{DateTime, Utc};
    use nx_core::dates;
    use scraper::{ElementRef, Html, Selector};

    pub fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(selector).ok()?;
        document.select(&selector).next()
    }

    /// First non-empty text content matched by `selector`, trimmed.
    pub fn select_first_text(document: &Html, selector: &str) -> Option<String> {
        let element = select_first(document, selector)?;
        let text = element.text().collect::<String>().trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// First non-empty attribute value matched by `selector`, trimmed.
    pub fn select_first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
        let element = select_first(document, selector)?;
        let value = element.value().attr(attr)?.trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Join the paragraph children of `container` with blank lines,
    /// dropping empty paragraphs and trailing reporter signatures
    /// (paragraphs ending in an address at `signature_suffix`).
    pub fn join_paragraphs(container: ElementRef<'_>, signature_suffix: &str) -> String {
        let paragraph = match Selector::parse("p") {
            Ok(selector) => selector,
            Err(_) => return String::new(),
        };
        container
            .select(&paragraph)
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty() && !text.ends_with(signature_suffix))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Strip a leading "By "/"by " prefix and any "/Staff Reporter"-style
    /// role suffix from a byline. Idempotent.
    pub fn clean_author(raw: &str) -> String {
        let cleaned = raw.trim().replace("By ", "").replace("by ", "");
        match cleaned.split_once('/') {
            Some((name, _role)) => name.trim().to_string(),
            None => cleaned.trim().to_string(),
        }
    }

    /// Walk `(selector, attribute)` candidates in order, returning the first
    /// value that parses as an ISO-8601 timestamp. Parse failures fall
    /// through to the next candidate.
    pub fn first_date(document: &Html, candidates: &[(&str, &str)]) -> Option<DateTime<Utc>> {
        for (selector, attr) in candidates {
            if let Some(value) = select_first_attr(document, selector, attr) {
                if let Some(date) = dates::parse_iso_utc(&value) {
                    return Some(date);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_select_first_text() {
        let html = r#"
            <h1 class="title">Test Title</h1>
            <div class="content">Test Content</div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            utils::select_first_text(&document, "h1.title").unwrap(),
            "Test Title"
        );
        assert!(utils::select_first_text(&document, ".missing").is_none());
    }

    #[test]
    fn test_select_first_attr() {
        let html = r#"<meta property="article:published_time" content="2024-01-15T10:00:00+00:00">"#;
        let document = Html::parse_document(html);

        assert_eq!(
            utils::select_first_attr(
                &document,
                "meta[property='article:published_time']",
                "content"
            )
            .unwrap(),
            "2024-01-15T10:00:00+00:00"
        );
        assert!(utils::select_first_attr(&document, "meta", "missing").is_none());
    }

    #[test]
    fn test_join_paragraphs_filters_signatures() {
        let html = r#"
            <div class="article-content">
                <p>First paragraph.</p>
                <p>   </p>
                <p>Second paragraph.</p>
                <p>jane.doe@gleanerjm.com</p>
            </div>
        "#;
        let document = Html::parse_document(html);
        let container = utils::select_first(&document, "div.article-content").unwrap();

        let joined = utils::join_paragraphs(container, "@gleanerjm.com");
        assert_eq!(joined, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_clean_author_strips_prefix_and_role() {
        assert_eq!(utils::clean_author("By Jane Doe/Staff Reporter"), "Jane Doe");
        assert_eq!(utils::clean_author("by Jane Doe"), "Jane Doe");
        assert_eq!(utils::clean_author("Jane Doe"), "Jane Doe");
    }

    #[test]
    fn test_clean_author_is_idempotent() {
        let once = utils::clean_author("By Jane Doe/Staff Reporter");
        let twice = utils::clean_author(&once);
        assert_eq!(once, twice);
        assert_eq!(twice, "Jane Doe");
    }

    #[test]
    fn test_first_date_skips_unparseable_candidates() {
        let html = r#"
            <meta property="article:published_time" content="not a date">
            <time datetime="2021-11-07T05:00:00+00:00">November 7</time>
        "#;
        let document = Html::parse_document(html);
        let date = utils::first_date(
            &document,
            &[
                ("meta[property='article:published_time']", "content"),
                ("time", "datetime"),
            ],
        )
        .unwrap();
        assert_eq!(date.to_rfc3339(), "2021-11-07T05:00:00+00:00");
    }
}
