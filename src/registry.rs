//! Engine registry: shortcut -> URL template mapping with category groupings.
//!
//! The registry is built once at startup from a fixed literal table and is
//! read-only afterwards, so it can be shared freely across concurrent
//! requests without synchronization.

use serde::Serialize;

use crate::{GatewayError, Result};

/// Default engine used when browser-redirect mode receives an unknown key.
pub const DEFAULT_ENGINE: &str = "gg";

/// A single search engine entry.
#[derive(Debug, Clone, Serialize)]
pub struct EngineDescriptor {
    /// Short shortcut identifier (e.g., "gg" for Google).
    pub key: String,
    /// URL template with a single `{}` placeholder for the encoded query.
    pub url_template: String,
    /// Human-readable display name.
    pub name: String,
    /// Category this engine belongs to.
    pub category: String,
}

impl EngineDescriptor {
    /// Creates a new descriptor.
    pub fn new(
        key: impl Into<String>,
        url_template: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            url_template: url_template.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Read-only mapping from engine shortcut to descriptor.
///
/// Insertion order defines the default display order, both for the flat
/// engine list and for category groupings.
#[derive(Debug, Clone)]
pub struct Registry {
    engines: Vec<EngineDescriptor>,
    category_order: Vec<String>,
}

impl Registry {
    /// Builds a registry from an explicit engine list.
    ///
    /// Categories are ordered by first appearance in the list.
    pub fn new(engines: Vec<EngineDescriptor>) -> Self {
        let mut category_order: Vec<String> = Vec::new();
        for engine in &engines {
            if !category_order.contains(&engine.category) {
                category_order.push(engine.category.clone());
            }
        }
        Self {
            engines,
            category_order,
        }
    }

    /// Returns the descriptor for a shortcut, if registered.
    pub fn get(&self, key: &str) -> Option<&EngineDescriptor> {
        self.engines.iter().find(|e| e.key == key)
    }

    /// Returns the descriptor for a shortcut, or a typed error.
    pub fn lookup(&self, key: &str) -> Result<&EngineDescriptor> {
        self.get(key)
            .ok_or_else(|| GatewayError::unknown_engine(key))
    }

    /// Resolves every shortcut in `keys`, rejecting the whole call if any is
    /// unknown. The error names all offending keys.
    pub fn resolve(&self, keys: &[String]) -> Result<Vec<&EngineDescriptor>> {
        let invalid: Vec<String> = keys
            .iter()
            .filter(|k| self.get(k).is_none())
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(GatewayError::UnknownEngines(invalid));
        }
        Ok(keys.iter().filter_map(|k| self.get(k)).collect())
    }

    /// Returns all category names in registry order.
    pub fn category_names(&self) -> &[String] {
        &self.category_order
    }

    /// Returns (category, engine keys) pairs in registry order.
    pub fn categories(&self) -> Vec<(String, Vec<String>)> {
        self.category_order
            .iter()
            .map(|cat| {
                let keys = self
                    .engines
                    .iter()
                    .filter(|e| &e.category == cat)
                    .map(|e| e.key.clone())
                    .collect();
                (cat.clone(), keys)
            })
            .collect()
    }

    /// Returns the engine keys registered for a category, or a typed error
    /// listing the valid categories.
    pub fn category_keys(&self, category: &str) -> Result<Vec<String>> {
        if !self.category_order.iter().any(|c| c == category) {
            return Err(GatewayError::UnknownCategory {
                requested: category.to_string(),
                valid: self.category_order.clone(),
            });
        }
        Ok(self
            .engines
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.key.clone())
            .collect())
    }

    /// Human-readable name for a shortcut; unknown keys fall back to the
    /// uppercased shortcut.
    pub fn engine_name(&self, key: &str) -> String {
        self.get(key)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| key.to_uppercase())
    }

    /// Number of registered engines.
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns true if no engines are registered.
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Iterates over all descriptors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &EngineDescriptor> {
        self.engines.iter()
    }
}

impl Default for Registry {
    /// Builds the built-in engine table.
    fn default() -> Self {
        let ai = "AI Search";
        let dev = "Development";
        let social = "Social & Entertainment";
        let edu = "Education";
        Self::new(vec![
            EngineDescriptor::new("andi", "https://andisearch.com/search?q={}", "Andi Search", ai),
            EngineDescriptor::new("brave", "https://search.brave.com/search?q={}", "Brave Search", ai),
            EngineDescriptor::new("ds", "https://search.deepseek.com/search?q={}", "DeepSeek", ai),
            EngineDescriptor::new("felo", "https://felo.ai/search?q={}", "Felo AI", ai),
            EngineDescriptor::new("gg", "https://www.google.com/search?q={}", "Google", ai),
            EngineDescriptor::new("komo", "https://komo.ai/search?q={}", "Komo.ai", ai),
            EngineDescriptor::new("p", "https://www.perplexity.ai/search?q={}", "Perplexity AI", ai),
            EngineDescriptor::new("ph", "https://www.phind.com/search?q={}", "Phind", ai),
            EngineDescriptor::new("you", "https://you.com/search?q={}", "You.com", ai),
            EngineDescriptor::new("gh", "https://github.com/search?q={}", "GitHub", dev),
            EngineDescriptor::new("pht", "https://www.producthunt.com/search?q={}", "Product Hunt", dev),
            EngineDescriptor::new("tf", "https://taaft.com/search?q={}", "Taaft", dev),
            EngineDescriptor::new("gw", "https://godly.website/search?q={}", "Godly.website", dev),
            EngineDescriptor::new("mb", "https://mobbin.com/browse?q={}", "Mobbin", dev),
            EngineDescriptor::new("v0", "https://v0.dev/search?q={}", "v0.dev", dev),
            EngineDescriptor::new("sp", "https://community.spline.design/search?q={}", "Spline Community", dev),
            EngineDescriptor::new("x", "https://x.com/search?q={}", "X.com (Twitter)", social),
            EngineDescriptor::new(
                "ud",
                "https://www.udemy.com/courses/search/?q={}&price=price-free",
                "Free Udemy",
                edu,
            ),
        ])
    }
}
