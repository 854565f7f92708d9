//! # agg-search
//!
//! An aggregate meta search gateway with shortcut-addressable engines.
//!
//! Given a query and one or more engine shortcuts, the gateway builds target
//! URLs from templates, fetches them concurrently with per-engine timeout and
//! error isolation, and extracts a small set of (title, link, snippet)
//! results via best-effort HTML selectors. It ships with:
//!
//! - A built-in registry of 18 engines across 4 categories
//! - Concurrent scatter-gather fan-out preserving request order
//! - Per-engine selector dispatch with a generic fallback
//! - An axum HTTP API, OpenSearch browser integration and a CLI
//!
//! ## Example
//!
//! ```rust,no_run
//! use agg_search::Gateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = Gateway::new()?;
//!
//!     let keys = vec!["gh".to_string(), "gg".to_string()];
//!     let response = gateway.multi_search(&keys, "rust async runtime").await?;
//!
//!     for engine in &response.results {
//!         println!("{}: {} results", engine.outcome.engine, engine.results.len());
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod fetch;
mod gateway;
mod registry;
mod result;

pub mod parse;
pub mod server;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use fetch::{build_url, Fetcher};
pub use gateway::{Gateway, ResolvedUrl};
pub use registry::{EngineDescriptor, Registry, DEFAULT_ENGINE};
pub use result::{AggregateResponse, EngineSearch, FetchOutcome, ParsedResult};
