//! Reply-text extraction from completion response bodies.
//!
//! The upstream envelope is not contractually guaranteed, so extraction is an
//! explicit ordered list of shape matchers. Each matcher either produces text
//! or falls through; a miss on every shape degrades to a truncated JSON dump
//! instead of an error.

use serde_json::Value;

/// Character cap applied to the raw-JSON fallback dump.
pub const FALLBACK_DUMP_MAX_CHARS: usize = 1900;

type ShapeMatcher = fn(&Value) -> Option<String>;

/// Shapes tried in order; first hit wins.
const SHAPE_MATCHERS: &[ShapeMatcher] = &[
    choice_message_content,
    top_level_response,
    top_level_text,
];

/// OpenAI-compatible: `choices[0].message.content`.
fn choice_message_content(body: &Value) -> Option<String> {
    non_empty(body["choices"][0]["message"]["content"].as_str())
}

/// Alternate envelope with a top-level `response` field.
fn top_level_response(body: &Value) -> Option<String> {
    non_empty(body["response"].as_str())
}

/// Alternate envelope with a top-level `text` field.
fn top_level_text(body: &Value) -> Option<String> {
    non_empty(body["text"].as_str())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Run the shape matchers; `None` if no known shape produced text.
#[must_use]
pub fn extract_reply_text(body: &Value) -> Option<String> {
    SHAPE_MATCHERS.iter().find_map(|matcher| matcher(body))
}

/// Extraction with the defined fallback: a JSON dump of the whole body capped
/// at [`FALLBACK_DUMP_MAX_CHARS`] characters.
#[must_use]
pub fn extract_or_dump(body: &Value) -> String {
    extract_reply_text(body).unwrap_or_else(|| truncate_chars(&body.to_string(), FALLBACK_DUMP_MAX_CHARS))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
