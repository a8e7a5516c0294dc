//! OCR text normalization.
//!
//! Raw OCR output arrives with arbitrary line breaks and spacing, and is
//! sometimes re-encoded as a JSON object `{"extractedText": "..."}` by the
//! upload layer. Everything downstream works on the canonical form produced
//! here: the unwrapped text with every whitespace run collapsed to one space.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Field holding the OCR text in a JSON-wrapped payload.
pub const WRAPPED_TEXT_KEY: &str = "extractedText";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize raw OCR text into its canonical single-spaced form.
///
/// JSON wrappers are unwrapped until the text is no longer a wrapper, which
/// keeps the function idempotent. A wrapper that fails to parse is kept as
/// plain text.
pub fn normalize(raw: &str) -> String {
    let mut text = collapse_whitespace(raw);

    while let Some(inner) = unwrap_extracted_text(&text) {
        text = collapse_whitespace(&inner);
    }

    text
}

/// Collapse every whitespace run (newlines included) into a single space and
/// trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Return the `extractedText` string if `text` is a JSON object carrying one.
pub fn unwrap_extracted_text(text: &str) -> Option<String> {
    if !text.trim_start().starts_with('{') {
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(mut object)) => match object.remove(WRAPPED_TEXT_KEY) {
            Some(Value::String(inner)) => Some(inner),
            Some(_) => {
                debug!("`{}` is not a string, treating input as plain text", WRAPPED_TEXT_KEY);
                None
            }
            None => {
                debug!("JSON input has no `{}`, treating it as plain text", WRAPPED_TEXT_KEY);
                None
            }
        },
        Ok(_) => None,
        Err(e) => {
            debug!("Input looks like JSON but failed to parse ({}), treating it as plain text", e);
            None
        }
    }
}
