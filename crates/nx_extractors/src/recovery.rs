//! Fail-soft recovery of headline and byline from OCR text via the
//! completion model. Every call site gets an `Option`: transport errors,
//! the not-found sentinel, and empty answers all collapse to `None`.

use tracing::{debug, warn};

use nx_inference::{CompletionModel, CompletionRequest, NOT_FOUND_SENTINEL};

/// Headlines occur near the start of OCR text.
const HEADLINE_SAMPLE_CHARS: usize = 500;
/// Bylines are typically within the first few paragraphs.
const AUTHOR_SAMPLE_CHARS: usize = 1000;
/// Answers at or under this length are treated as implausible headlines.
const MIN_HEADLINE_CHARS: usize = 5;

const HEADLINE_SYSTEM_PROMPT: &str = "You are a precise headline extraction assistant. \
Extract the article headline from OCR text of a scanned newspaper page. \
The headline is typically in larger text near the start of the article body, \
after the newspaper name and date. \
Return ONLY the headline text, or 'NONE' if no clear headline is found. \
Do not include the newspaper name, date, author name, or byline.";

const AUTHOR_SYSTEM_PROMPT: &str = "You are a precise text extraction assistant. \
Extract the author's name from newspaper article text. \
Look for bylines like 'By [Name]' or '[Name]\\nStaff Reporter'. \
Return ONLY the author's full name, or 'NONE' if no author is found. \
Do not include titles, job descriptions, or explanations.";

pub(crate) async fn recover_headline(
    model: &dyn CompletionModel,
    full_text: &str,
) -> Option<String> {
    let request = CompletionRequest {
        system: HEADLINE_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Extract the article headline from this newspaper OCR text:\n\n{}",
            truncate_chars(full_text, HEADLINE_SAMPLE_CHARS)
        ),
        temperature: 0.0,
        max_tokens: 100,
    };

    let answer = ask(model, &request).await?;
    if answer.chars().count() > MIN_HEADLINE_CHARS {
        debug!("Headline recovered from OCR text: {}", answer);
        Some(answer)
    } else {
        None
    }
}

pub(crate) async fn recover_author(
    model: &dyn CompletionModel,
    full_text: &str,
) -> Option<String> {
    let request = CompletionRequest {
        system: AUTHOR_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Extract the author's name from this newspaper text:\n\n{}",
            truncate_chars(full_text, AUTHOR_SAMPLE_CHARS)
        ),
        temperature: 0.0,
        max_tokens: 50,
    };

    ask(model, &request).await
}

async fn ask(model: &dyn CompletionModel, request: &CompletionRequest) -> Option<String> {
    match model.complete(request).await {
        Ok(answer) => {
            let answer = answer.trim();
            if answer.is_empty() || answer.to_uppercase() == NOT_FOUND_SENTINEL {
                None
            } else {
                Some(answer.to_string())
            }
        }
        Err(e) => {
            warn!("Completion call failed ({}): {}", model.name(), e);
            None
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
