pub mod http;
pub mod text_processing;

pub use http::{parse_response_json, status_error_message, summarize_http_failure};
pub use text_processing::{redact_sensitive, truncate_for_summary};
