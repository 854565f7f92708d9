//! Fan-out orchestration across registered engines.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::fetch::{build_url, Fetcher};
use crate::parse;
use crate::registry::{Registry, DEFAULT_ENGINE};
use crate::result::{AggregateResponse, EngineSearch};
use crate::{GatewayError, Result};

/// A resolved engine URL for browser-style search (no fetch performed).
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedUrl {
    /// Engine shortcut.
    pub engine: String,
    /// Human-readable engine name.
    pub name: String,
    /// Fully resolved search URL.
    pub url: String,
}

/// Meta search gateway: validates requests, fans out fetches concurrently
/// and reassembles per-engine outcomes in request order.
pub struct Gateway {
    registry: Arc<Registry>,
    fetcher: Fetcher,
    timeout: Duration,
}

impl Gateway {
    /// Creates a gateway over the built-in engine registry.
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::default())
    }

    /// Creates a gateway over a custom registry.
    pub fn with_registry(registry: Registry) -> Result<Self> {
        Ok(Self {
            registry: Arc::new(registry),
            fetcher: Fetcher::new()?,
            timeout: GatewayConfig::default().timeout(),
        })
    }

    /// Creates a gateway from configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let mut gateway = Self::new()?;
        gateway.timeout = config.timeout();
        Ok(gateway)
    }

    /// Sets the per-engine fetch timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Returns the engine registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Searches a single engine, parsing whatever the markup yields.
    pub async fn search(&self, key: &str, query: &str) -> Result<EngineSearch> {
        Self::validate_query(query)?;
        let engine = self.registry.lookup(key)?;
        let outcome = self.fetcher.fetch(engine, query, self.timeout).await;
        let results = parse::parse(&outcome);
        Ok(EngineSearch { outcome, results })
    }

    /// Fans one query out to several engines concurrently.
    ///
    /// Every key is validated before any network activity; an unknown key
    /// fails the whole call naming all offending keys. Individual engine
    /// failures never abort the fan-out, and the returned slots preserve the
    /// caller-supplied key order regardless of completion order.
    pub async fn fan_out(&self, keys: &[String], query: &str) -> Result<Vec<EngineSearch>> {
        Self::validate_query(query)?;
        let engines = self.registry.resolve(keys)?;
        debug!("Fanning out \"{}\" to {} engines", query, engines.len());

        // join_all yields results in future order, so the input ordering
        // survives whatever order the fetches complete in.
        let fetches = engines
            .iter()
            .map(|engine| self.fetcher.fetch(engine, query, self.timeout));
        let outcomes = join_all(fetches).await;

        Ok(outcomes
            .into_iter()
            .map(|outcome| {
                let results = parse::parse(&outcome);
                EngineSearch { outcome, results }
            })
            .collect())
    }

    /// Fan-out wrapped into the aggregate response shape.
    pub async fn multi_search(&self, keys: &[String], query: &str) -> Result<AggregateResponse> {
        let results = self.fan_out(keys, query).await?;
        Ok(AggregateResponse {
            query: query.to_string(),
            engines: keys.to_vec(),
            results,
        })
    }

    /// Resolves a category to its engine list and fans out to all of them.
    pub async fn category_search(&self, category: &str, query: &str) -> Result<AggregateResponse> {
        let keys = self.registry.category_keys(category)?;
        self.multi_search(&keys, query).await
    }

    /// Builds the search URL for one engine without fetching it.
    ///
    /// Browser-redirect mode is forgiving: an unknown key falls back to the
    /// default engine instead of rejecting.
    pub fn search_url(&self, key: &str, query: &str) -> (String, String) {
        let engine = self
            .registry
            .get(key)
            .or_else(|| self.registry.get(DEFAULT_ENGINE))
            .or_else(|| self.registry.iter().next())
            .expect("registry must not be empty");
        (engine.key.clone(), build_url(&engine.url_template, query))
    }

    /// Resolves every engine's search URL, grouped by category in registry
    /// order. Pure URL construction, no network I/O.
    pub fn all_search_urls(&self, query: &str) -> Vec<(String, Vec<ResolvedUrl>)> {
        self.registry
            .categories()
            .into_iter()
            .map(|(category, keys)| {
                let urls = keys
                    .iter()
                    .filter_map(|key| self.registry.get(key))
                    .map(|engine| ResolvedUrl {
                        engine: engine.key.clone(),
                        name: engine.name.clone(),
                        url: build_url(&engine.url_template, query),
                    })
                    .collect();
                (category, urls)
            })
            .collect()
    }

    fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(GatewayError::InvalidQuery("Query cannot be empty".into()));
        }
        Ok(())
    }
}
