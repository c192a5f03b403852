//! HTTP response helpers shared by the API client and the front ends.

use serde_json::Value;

use crate::text_processing::{redact_sensitive, truncate_for_summary};

const SUMMARY_MAX_LEN: usize = 160;

/// Parse response text as JSON, returning `None` when it is not valid JSON.
///
/// # Example
/// ```rust
/// use yousmala_util::http::parse_response_json;
///
/// assert!(parse_response_json(r#"{"orderId": "O1"}"#).is_some());
/// assert!(parse_response_json("Created").is_none());
/// ```
pub fn parse_response_json(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text).ok()
}

/// Returns a friendly message for well-known HTTP status codes.
pub fn status_error_message(status_code: u16) -> Option<String> {
    match status_code {
        400 => Some("Bad Request (400). Hint: the back office rejected the submitted values".into()),
        404 => Some("Not Found (404). Hint: check YOUSMALA_API_BASE points at the back office".into()),
        500..=599 => Some(format!("Server error ({}). Hint: the back office failed to process the request", status_code)),
        _ => None,
    }
}

/// Build a one-line, redacted description of a failed HTTP exchange.
///
/// JSON bodies carrying a `message`/`title`/`error` member are summarised by
/// that member; anything else is used as raw text.
pub fn summarize_http_failure(status_code: u16, body: &str) -> String {
    let detail = parse_response_json(body)
        .as_ref()
        .and_then(extract_error_detail)
        .unwrap_or_else(|| body.to_string());
    let detail = truncate_for_summary(&redact_sensitive(&detail), SUMMARY_MAX_LEN);

    let headline = status_error_message(status_code).unwrap_or_else(|| format!("HTTP {}", status_code));
    if detail.is_empty() {
        headline
    } else {
        format!("{}: {}", headline, detail)
    }
}

fn extract_error_detail(value: &Value) -> Option<String> {
    ["message", "title", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
