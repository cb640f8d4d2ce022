use scraper::{Html, Selector};
use serde_json::Value;

/// Snapshot of the Schema.org Article metadata embedded in a page.
///
/// Parsed once per document and threaded into each field's extraction chain
/// as the highest-priority source. Absent or malformed blocks are never an
/// error; the snapshot just stays empty.
#[derive(Debug, Clone, Default)]
pub struct ArticleMetadata {
    pub headline: Option<String>,
    pub author_name: Option<String>,
    pub date_published: Option<String>,
}

/// Parse the first valid JSON-LD block typed as an Article.
/// Malformed blocks and other types are skipped silently.
pub fn parse_article_metadata(document: &Html) -> Option<ArticleMetadata> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let value = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => value,
            Err(_) => continue,
        };
        if value.get("@type").and_then(Value::as_str) != Some("Article") {
            continue;
        }
        return Some(ArticleMetadata {
            headline: string_field(&value, "headline"),
            author_name: author_name(&value),
            date_published: string_field(&value, "datePublished"),
        });
    }

    None
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    let text = value.get(key)?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn author_name(value: &Value) -> Option<String> {
    let author = value.get("author")?;
    let name = match author {
        Value::Object(obj) => obj.get("name")?.as_str()?,
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("name").and_then(Value::as_str))?,
        Value::String(s) => s.as_str(),
        _ => return None,
    };
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_article_block() {
        let html = r#"
            <script type="application/ld+json">
            {
                "@type": "Article",
                "headline": "Embrace 'One Health'",
                "author": {"@type": "Person", "name": "Corey Robinson"},
                "datePublished": "2024-01-15T10:00:00+00:00"
            }
            </script>
        "#;
        let document = Html::parse_document(html);
        let metadata = parse_article_metadata(&document).unwrap();
        assert_eq!(metadata.headline.as_deref(), Some("Embrace 'One Health'"));
        assert_eq!(metadata.author_name.as_deref(), Some("Corey Robinson"));
        assert_eq!(
            metadata.date_published.as_deref(),
            Some("2024-01-15T10:00:00+00:00")
        );
    }

    #[test]
    fn test_malformed_block_skipped() {
        let html = r#"
            <script type="application/ld+json">{not valid json</script>
            <script type="application/ld+json">
            {"@type": "Article", "headline": "Still Found"}
            </script>
        "#;
        let document = Html::parse_document(html);
        let metadata = parse_article_metadata(&document).unwrap();
        assert_eq!(metadata.headline.as_deref(), Some("Still Found"));
    }

    #[test]
    fn test_non_article_types_skipped() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "BreadcrumbList", "headline": "Not An Article"}
            </script>
        "#;
        let document = Html::parse_document(html);
        assert!(parse_article_metadata(&document).is_none());
    }

    #[test]
    fn test_author_array_and_string_forms() {
        let html = r#"
            <script type="application/ld+json">
            {"@type": "Article", "author": [{"name": "First Author"}, {"name": "Second Author"}]}
            </script>
        "#;
        let document = Html::parse_document(html);
        let metadata = parse_article_metadata(&document).unwrap();
        assert_eq!(metadata.author_name.as_deref(), Some("First Author"));

        let html = r#"
            <script type="application/ld+json">
            {"@type": "Article", "author": "Plain Name"}
            </script>
        "#;
        let document = Html::parse_document(html);
        let metadata = parse_article_metadata(&document).unwrap();
        assert_eq!(metadata.author_name.as_deref(), Some("Plain Name"));
    }

    #[test]
    fn test_absent_metadata_is_none() {
        let document = Html::parse_document("<html><body><p>No metadata.</p></body></html>");
        assert!(parse_article_metadata(&document).is_none());
    }
}
