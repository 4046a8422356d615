//! Response Normalizer: turns an unreliable free-text model reply into the
//! shape the originating operation expects.
//!
//! Parse failures are absorbed here: a reply that cannot be structured becomes
//! the operation's fallback value, never an error.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::writing::operation::{ExpectedShape, ModelReply, NormalizedResult, Operation};
use crate::writing::schemas::fallback;

fn fence_marker() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // ``` with an optional language tag, plus any whitespace after it
    FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_+\-]*\s*").expect("fence pattern is valid"))
}

/// Removes every code-fence marker (```` ```json ````, ```` ``` ````, ...) from the text.
pub fn strip_code_fences(text: &str) -> String {
    fence_marker().replace_all(text, "").into_owned()
}

/// Leftmost `open` through the last `close` in the text, inclusive.
pub fn extract_bracketed(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Strips fences, extracts the bracketed region matching `shape` and parses it.
/// `None` for plain-text shapes, missing brackets or malformed JSON.
pub fn try_parse_structured(raw: &str, shape: ExpectedShape) -> Option<Value> {
    let (open, close) = match shape {
        ExpectedShape::Record => ('{', '}'),
        ExpectedShape::List => ('[', ']'),
        ExpectedShape::PlainText => return None,
    };

    let cleaned = strip_code_fences(raw);
    let candidate = extract_bracketed(&cleaned, open, close)?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to parse structured model reply: {e}");
            None
        }
    }
}

/// Consumes the reply and produces the caller's expected shape.
pub fn normalize(operation: &Operation, reply: ModelReply, subject: &str) -> NormalizedResult {
    let shape = operation.expected_shape();
    if shape == ExpectedShape::PlainText {
        return NormalizedResult::PlainText(reply.raw_text.trim().to_string());
    }

    match (shape, try_parse_structured(&reply.raw_text, shape)) {
        (ExpectedShape::Record, Some(Value::Object(map))) => NormalizedResult::Record(map),
        (ExpectedShape::List, Some(Value::Array(items))) => NormalizedResult::List(items),
        _ => {
            warn!("{} reply could not be structured; using fallback", operation.label());
            fallback(operation, &reply.raw_text, subject)
        }
    }
}
