//! Fetch dispatcher: one time-bounded HTTP GET per engine.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::registry::EngineDescriptor;
use crate::result::FetchOutcome;
use crate::Result;

/// Browser-style User-Agent sent with every engine request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Substitutes the percent-encoded query into a URL template.
///
/// The template carries a single `{}` placeholder.
pub fn build_url(template: &str, query: &str) -> String {
    template.replacen("{}", &urlencoding::encode(query), 1)
}

/// Issues single engine fetches over a shared connection pool.
///
/// `fetch` is a total function: every failure path (timeout, DNS, refused
/// connection, TLS, body read) is captured into the returned
/// [`FetchOutcome`] rather than propagated to the caller.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a browser User-Agent.
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher over a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the engine's result page for `query` with the given timeout.
    pub async fn fetch(
        &self,
        engine: &EngineDescriptor,
        query: &str,
        timeout: Duration,
    ) -> FetchOutcome {
        let url = build_url(&engine.url_template, query);
        debug!("Fetching {} via {}", engine.key, url);

        let response = match self.client.get(&url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return Self::failure_outcome(&engine.key, &url, e),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => FetchOutcome::success(&engine.key, url, status, body),
            Err(e) => Self::failure_outcome(&engine.key, &url, e),
        }
    }

    fn failure_outcome(engine: &str, url: &str, e: reqwest::Error) -> FetchOutcome {
        let message = if e.is_timeout() {
            "Request timeout".to_string()
        } else {
            e.to_string()
        };
        debug!("Fetch for {} failed: {}", engine, message);
        FetchOutcome::failure(engine, url, message)
    }
}
