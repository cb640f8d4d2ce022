use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

/// Minimum body length for a meaningful article, counted after trimming.
pub const MIN_FULL_TEXT_CHARS: usize = 50;

/// Validated article record produced by an extraction strategy.
///
/// Construction re-checks every invariant regardless of which strategy
/// produced the fields, so a strategy cannot hand malformed data to the
/// storage or classification layers downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleContent {
    title: String,
    full_text: String,
    author: Option<String>,
    published_date: Option<DateTime<Utc>>,
}

impl ArticleContent {
    /// Build a validated record.
    ///
    /// Title and body are trimmed; an empty title or a body under
    /// [`MIN_FULL_TEXT_CHARS`] is a [`Error::Validation`]. An author that is
    /// empty after trimming collapses to `None`. The timestamp type itself
    /// guarantees a UTC instant; naive inputs must be resolved at the parse
    /// boundary (see [`crate::dates`]).
    pub fn new(
        title: impl Into<String>,
        full_text: impl Into<String>,
        author: Option<String>,
        published_date: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(Error::Validation("title cannot be empty".to_string()));
        }

        let full_text = full_text.into().trim().to_string();
        if full_text.is_empty() {
            return Err(Error::Validation("full text cannot be empty".to_string()));
        }
        if full_text.chars().count() < MIN_FULL_TEXT_CHARS {
            return Err(Error::Validation(format!(
                "full text must be at least {} characters",
                MIN_FULL_TEXT_CHARS
            )));
        }

        let author = author
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Ok(Self {
            title,
            full_text,
            author,
            published_date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        self.published_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BODY: &str = "This is a body of article text that is comfortably longer than fifty characters.";

    #[test]
    fn test_new_trims_fields() {
        let article = ArticleContent::new("  A Title  ", format!("  {}  ", BODY), None, None).unwrap();
        assert_eq!(article.title(), "A Title");
        assert_eq!(article.full_text(), BODY);
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = ArticleContent::new("   ", BODY, None, None);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_short_body_rejected() {
        let result = ArticleContent::new("Title", "Too short.", None, None);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_author_collapses_to_none() {
        let article = ArticleContent::new("Title", BODY, Some("   ".to_string()), None).unwrap();
        assert_eq!(article.author(), None);

        let article = ArticleContent::new("Title", BODY, Some(" Jane Doe ".to_string()), None).unwrap();
        assert_eq!(article.author(), Some("Jane Doe"));
    }

    #[test]
    fn test_published_date_is_utc() {
        let date = Utc.with_ymd_and_hms(2021, 11, 7, 5, 0, 0).unwrap();
        let article = ArticleContent::new("Title", BODY, None, Some(date)).unwrap();
        assert_eq!(article.published_date(), Some(date));
    }
}
