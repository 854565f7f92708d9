//! Best-effort HTML result extraction.
//!
//! Scraping rules are a lookup table from engine shortcut to a selector
//! pair, with an explicit generic default, so new engines need no parser
//! changes. Titles and links are paired positionally (i-th title with i-th
//! link), which can mis-pair when the two selector queries diverge on real
//! markup; that mirrors the intended best-effort behavior and is a known
//! limitation rather than a correctness guarantee.

use scraper::{Html, Selector};
use tracing::debug;

use crate::result::{FetchOutcome, ParsedResult};

/// Maximum number of results extracted per engine.
pub const MAX_RESULTS: usize = 10;

/// CSS selectors for title and link candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorPair {
    /// Selector matching title elements.
    pub title: &'static str,
    /// Selector matching link elements.
    pub link: &'static str,
}

/// Fallback selectors: any heading for titles, any anchor for links.
pub const GENERIC_SELECTORS: SelectorPair = SelectorPair {
    title: "h1, h2, h3, h4",
    link: "a",
};

/// Returns the selector pair tuned for an engine, or the generic fallback.
pub fn selectors_for(engine: &str) -> SelectorPair {
    match engine {
        "gh" => SelectorPair {
            title: r#"a[data-testid="results-list"] .text-normal"#,
            link: r#"a[data-testid="results-list"]"#,
        },
        "gg" => SelectorPair {
            title: "h3",
            link: "a",
        },
        _ => GENERIC_SELECTORS,
    }
}

/// Extracts up to [`MAX_RESULTS`] results from a fetch outcome.
///
/// Pure and infallible: non-200 or empty-body outcomes and selector
/// mismatches all yield an empty list. Internal failures are logged at
/// debug level and otherwise swallowed.
pub fn parse(outcome: &FetchOutcome) -> Vec<ParsedResult> {
    let (results, diagnostic) = parse_with_diagnostic(outcome);
    if let Some(reason) = diagnostic {
        debug!("Parsing {} results failed: {}", outcome.engine, reason);
    }
    results
}

/// Like [`parse`], but also reports why extraction failed, if it did.
///
/// The diagnostic is advisory; callers may surface or ignore it.
pub fn parse_with_diagnostic(outcome: &FetchOutcome) -> (Vec<ParsedResult>, Option<String>) {
    if !outcome.is_ok() {
        return (Vec::new(), None);
    }

    let selectors = selectors_for(&outcome.engine);
    let title_selector = match Selector::parse(selectors.title) {
        Ok(s) => s,
        Err(e) => return (Vec::new(), Some(format!("bad title selector: {e:?}"))),
    };
    let link_selector = match Selector::parse(selectors.link) {
        Ok(s) => s,
        Err(e) => return (Vec::new(), Some(format!("bad link selector: {e:?}"))),
    };

    let document = Html::parse_document(&outcome.raw_body);
    let titles: Vec<String> = document
        .select(&title_selector)
        .take(MAX_RESULTS)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    let links: Vec<String> = document
        .select(&link_selector)
        .take(MAX_RESULTS)
        .map(|el| el.value().attr("href").unwrap_or_default().to_string())
        .collect();

    let results = titles
        .into_iter()
        .zip(links)
        .map(|(title, link)| ParsedResult::new(title, link))
        .collect();
    (results, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::FetchOutcome;

    fn outcome(engine: &str, status: u16, body: &str) -> FetchOutcome {
        FetchOutcome::success(engine, "https://example.com", status, body)
    }

    #[test]
    fn test_selectors_for_github() {
        let pair = selectors_for("gh");
        assert!(pair.title.contains("results-list"));
    }

    #[test]
    fn test_selectors_for_google() {
        let pair = selectors_for("gg");
        assert_eq!(pair.title, "h3");
        assert_eq!(pair.link, "a");
    }

    #[test]
    fn test_selectors_for_unknown_engine_is_generic() {
        assert_eq!(selectors_for("brave"), GENERIC_SELECTORS);
        assert_eq!(selectors_for("anything"), GENERIC_SELECTORS);
    }

    #[test]
    fn test_parse_non_200_returns_empty() {
        let results = parse(&outcome("brave", 500, "<h1>err</h1><a href='/'>x</a>"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_empty_body_returns_empty() {
        let results = parse(&outcome("brave", 200, ""));
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_transport_failure_returns_empty() {
        let failed = FetchOutcome::failure("brave", "https://example.com", "Request timeout");
        assert!(parse(&failed).is_empty());
    }

    #[test]
    fn test_parse_generic_pairs_titles_and_links_positionally() {
        let html = r#"
            <html><body>
                <a href="https://one.example">first link</a>
                <h2>First Title</h2>
                <a href="https://two.example">second link</a>
                <h3>Second Title</h3>
            </body></html>
        "#;
        let results = parse(&outcome("brave", 200, html));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "First Title");
        assert_eq!(results[0].link, "https://one.example");
        assert_eq!(results[1].title, "Second Title");
        assert_eq!(results[1].link, "https://two.example");
    }

    #[test]
    fn test_parse_bounded_by_fewer_links() {
        let html = r#"
            <h2>One</h2><h2>Two</h2><h2>Three</h2>
            <a href="https://only.example">only</a>
        "#;
        let results = parse(&outcome("brave", 200, html));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "One");
    }

    #[test]
    fn test_parse_caps_at_ten_results() {
        let mut html = String::new();
        for i in 0..15 {
            html.push_str(&format!("<h2>Title {i}</h2><a href=\"/{i}\">l</a>"));
        }
        let results = parse(&outcome("brave", 200, &html));
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[9].title, "Title 9");
    }

    #[test]
    fn test_parse_missing_href_yields_empty_link() {
        let html = "<h2>Anchorless</h2><a>no href</a>";
        let results = parse(&outcome("brave", 200, html));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].link, "");
    }

    #[test]
    fn test_parse_trims_title_text() {
        let html = "<h2>  spaced out \n</h2><a href=\"/x\">l</a>";
        let results = parse(&outcome("brave", 200, html));
        assert_eq!(results[0].title, "spaced out");
        assert_eq!(results[0].snippet, "spaced out");
    }

    #[test]
    fn test_parse_long_title_truncates_snippet() {
        let long = "t".repeat(250);
        let html = format!("<h2>{long}</h2><a href=\"/x\">l</a>");
        let results = parse(&outcome("brave", 200, &html));
        assert_eq!(results[0].title.len(), 250);
        assert_eq!(results[0].snippet, format!("{}...", "t".repeat(200)));
    }

    #[test]
    fn test_parse_google_selectors_match_h3_only() {
        let html = r#"
            <h1>Not a result</h1>
            <a href="https://r.example">r</a>
            <h3>Result Title</h3>
        "#;
        let results = parse(&outcome("gg", 200, html));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Result Title");
    }

    #[test]
    fn test_parse_with_diagnostic_clean_html_has_none() {
        let (results, diagnostic) = parse_with_diagnostic(&outcome("brave", 200, "<p>none</p>"));
        assert!(results.is_empty());
        assert!(diagnostic.is_none());
    }
}
