//! Response types shared by the fetcher, parser and orchestrator.

use serde::Serialize;

/// Maximum snippet length in characters before truncation.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Outcome of a single engine fetch attempt.
///
/// A status code of 0 means the request failed at the transport level
/// (timeout, DNS, connection refused, TLS); in that case `error` is set and
/// `raw_body` is empty. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    /// Engine shortcut this outcome belongs to.
    pub engine: String,
    /// Fully resolved request URL.
    #[serde(rename = "url")]
    pub request_url: String,
    /// HTTP status code, or 0 on transport failure.
    pub status_code: u16,
    /// Full response body; empty on failure.
    #[serde(skip)]
    pub raw_body: String,
    /// Transport error message, if the fetch failed.
    pub error: Option<String>,
}

impl FetchOutcome {
    /// Creates a successful outcome.
    pub fn success(
        engine: impl Into<String>,
        request_url: impl Into<String>,
        status_code: u16,
        raw_body: impl Into<String>,
    ) -> Self {
        Self {
            engine: engine.into(),
            request_url: request_url.into(),
            status_code,
            raw_body: raw_body.into(),
            error: None,
        }
    }

    /// Creates a transport-failure outcome (status 0, empty body).
    pub fn failure(
        engine: impl Into<String>,
        request_url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            engine: engine.into(),
            request_url: request_url.into(),
            status_code: 0,
            raw_body: String::new(),
            error: Some(error.into()),
        }
    }

    /// Returns true if the fetch produced a 200 response with a body.
    pub fn is_ok(&self) -> bool {
        self.status_code == 200 && !self.raw_body.is_empty()
    }
}

/// A single scraped result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    /// Trimmed text content of the matched title element.
    pub title: String,
    /// `href` of the positionally paired link element; empty if absent.
    pub link: String,
    /// Title text truncated to [`SNIPPET_MAX_CHARS`] with a trailing `...`.
    pub snippet: String,
}

impl ParsedResult {
    /// Creates a result, deriving the snippet from the title.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        let title = title.into();
        let snippet = truncate_chars(&title, SNIPPET_MAX_CHARS);
        Self {
            title,
            link: link.into(),
            snippet,
        }
    }
}

/// One fan-out slot: the fetch outcome plus whatever the parser extracted.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSearch {
    /// Fetch outcome for this engine.
    #[serde(flatten)]
    pub outcome: FetchOutcome,
    /// Parsed results; empty whenever the fetch failed or markup mismatched.
    pub results: Vec<ParsedResult>,
}

/// Aggregate response for a multi-engine search. Built fresh per request.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResponse {
    /// The original query string.
    pub query: String,
    /// Engine keys exactly as requested, in request order.
    pub engines: Vec<String>,
    /// Per-engine outcomes, in the same order as `engines`.
    pub results: Vec<EngineSearch>,
}

/// Truncates `s` to at most `max` characters, appending `...` if truncated.
///
/// Operates on character boundaries, not bytes, so multi-byte text is safe.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_outcome_success() {
        let outcome = FetchOutcome::success("gg", "https://example.com", 200, "<html></html>");
        assert_eq!(outcome.engine, "gg");
        assert_eq!(outcome.status_code, 200);
        assert!(outcome.error.is_none());
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_fetch_outcome_failure_invariants() {
        let outcome = FetchOutcome::failure("gg", "https://example.com", "Request timeout");
        assert_eq!(outcome.status_code, 0);
        assert!(outcome.raw_body.is_empty());
        assert_eq!(outcome.error.as_deref(), Some("Request timeout"));
        assert!(!outcome.is_ok());
    }

    #[test]
    fn test_fetch_outcome_non_200_not_ok() {
        let outcome = FetchOutcome::success("gg", "https://example.com", 403, "denied");
        assert!(!outcome.is_ok());
    }

    #[test]
    fn test_fetch_outcome_empty_body_not_ok() {
        let outcome = FetchOutcome::success("gg", "https://example.com", 200, "");
        assert!(!outcome.is_ok());
    }

    #[test]
    fn test_parsed_result_short_title_snippet_equals_title() {
        let result = ParsedResult::new("A short title", "https://example.com");
        assert_eq!(result.snippet, "A short title");
    }

    #[test]
    fn test_parsed_result_long_title_snippet_truncated() {
        let title = "x".repeat(250);
        let result = ParsedResult::new(title.clone(), "");
        assert_eq!(result.snippet.len(), 203);
        assert_eq!(&result.snippet[..200], &title[..200]);
        assert!(result.snippet.ends_with("..."));
    }

    #[test]
    fn test_truncate_chars_exact_boundary() {
        let s = "y".repeat(200);
        assert_eq!(truncate_chars(&s, 200), s);
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let s = "搜".repeat(210);
        let truncated = truncate_chars(&s, 200);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_fetch_outcome_serialization_skips_body() {
        let outcome = FetchOutcome::success("gg", "https://example.com", 200, "<html>secret</html>");
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"url\":\"https://example.com\""));
        assert!(json.contains("\"status_code\":200"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_aggregate_response_serialization() {
        let response = AggregateResponse {
            query: "rust".into(),
            engines: vec!["gg".into()],
            results: vec![EngineSearch {
                outcome: FetchOutcome::failure("gg", "https://g", "boom"),
                results: vec![],
            }],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"query\":\"rust\""));
        assert!(json.contains("\"error\":\"boom\""));
    }
}
