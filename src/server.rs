//! HTTP routing layer over the gateway core.
//!
//! Thin axum handlers: validate input, call into [`Gateway`], render JSON or
//! HTML. Validation failures map to 400 responses naming the offending
//! keys/categories; per-engine runtime failures are part of the normal
//! response payload.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::config::GatewayConfig;
use crate::gateway::Gateway;
use crate::result::{truncate_chars, EngineSearch, ParsedResult};
use crate::GatewayError;

/// Characters of raw body kept in a single-search preview.
const SINGLE_PREVIEW_CHARS: usize = 1000;
/// Characters of raw body kept per engine in a multi-search preview.
const MULTI_PREVIEW_CHARS: usize = 500;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
    config: GatewayConfig,
}

/// Builds the service router.
pub fn router(gateway: Arc<Gateway>, config: GatewayConfig) -> Router {
    let state = AppState { gateway, config };
    Router::new()
        .route("/", get(home))
        .route("/search", get(single_search))
        .route("/multi-search", get(multi_search))
        .route("/category-search", get(category_search))
        .route("/engines", get(list_engines))
        .route("/browser-search", get(browser_search))
        .route("/opensearch.xml", get(opensearch_descriptor))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds the listener and serves until shutdown.
pub async fn serve(gateway: Arc<Gateway>, config: GatewayConfig) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on {} with {} engines",
        addr,
        gateway.registry().len()
    );
    axum::serve(listener, router(gateway, config)).await?;
    Ok(())
}

struct ApiError(GatewayError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GatewayError::UnknownEngines(_)
            | GatewayError::UnknownCategory { .. }
            | GatewayError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            GatewayError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

#[derive(Deserialize)]
struct SingleSearchParams {
    q: String,
    engine: String,
    #[serde(default)]
    parse: bool,
}

#[derive(Serialize)]
struct SingleSearchResponse {
    query: String,
    engine: String,
    url: String,
    status_code: u16,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<ParsedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

async fn single_search(
    State(state): State<AppState>,
    Query(params): Query<SingleSearchParams>,
) -> Result<Json<SingleSearchResponse>, ApiError> {
    let search = state.gateway.search(&params.engine, &params.q).await?;
    let (results, content) = split_payload(&search, params.parse, SINGLE_PREVIEW_CHARS);
    Ok(Json(SingleSearchResponse {
        query: params.q,
        engine: search.outcome.engine,
        url: search.outcome.request_url,
        status_code: search.outcome.status_code,
        error: search.outcome.error,
        results,
        content,
    }))
}

#[derive(Deserialize)]
struct MultiSearchParams {
    q: String,
    engines: String,
    #[serde(default)]
    parse: bool,
}

#[derive(Serialize)]
struct MultiSearchResponse {
    query: String,
    engines: Vec<String>,
    results: Vec<MultiSearchEntry>,
}

#[derive(Serialize)]
struct MultiSearchEntry {
    engine: String,
    url: String,
    status_code: u16,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_preview: Option<String>,
}

async fn multi_search(
    State(state): State<AppState>,
    Query(params): Query<MultiSearchParams>,
) -> Result<Json<MultiSearchResponse>, ApiError> {
    let keys: Vec<String> = params
        .engines
        .split(',')
        .map(|k| k.trim().to_string())
        .collect();
    let searches = state.gateway.fan_out(&keys, &params.q).await?;
    Ok(Json(render_multi(params.q, keys, searches, params.parse)))
}

#[derive(Deserialize)]
struct CategorySearchParams {
    q: String,
    category: String,
    #[serde(default)]
    parse: bool,
}

async fn category_search(
    State(state): State<AppState>,
    Query(params): Query<CategorySearchParams>,
) -> Result<Json<MultiSearchResponse>, ApiError> {
    let response = state
        .gateway
        .category_search(&params.category, &params.q)
        .await?;
    Ok(Json(render_multi(
        response.query,
        response.engines,
        response.results,
        params.parse,
    )))
}

fn render_multi(
    query: String,
    engines: Vec<String>,
    searches: Vec<EngineSearch>,
    parse: bool,
) -> MultiSearchResponse {
    let results = searches
        .into_iter()
        .map(|search| {
            let (parsed_results, content_preview) =
                split_payload(&search, parse, MULTI_PREVIEW_CHARS);
            MultiSearchEntry {
                engine: search.outcome.engine,
                url: search.outcome.request_url,
                status_code: search.outcome.status_code,
                error: search.outcome.error,
                parsed_results,
                content_preview,
            }
        })
        .collect();
    MultiSearchResponse {
        query,
        engines,
        results,
    }
}

/// Chooses between parsed results and a raw-body preview.
///
/// `parse=true` surfaces parsed results when extraction yielded any;
/// `parse=false` always falls back to a truncated raw-body preview.
fn split_payload(
    search: &EngineSearch,
    parse: bool,
    preview_chars: usize,
) -> (Option<Vec<ParsedResult>>, Option<String>) {
    if parse {
        if search.results.is_empty() {
            (None, None)
        } else {
            (Some(search.results.clone()), None)
        }
    } else {
        (
            None,
            Some(truncate_chars(&search.outcome.raw_body, preview_chars)),
        )
    }
}

async fn list_engines(State(state): State<AppState>) -> Json<serde_json::Value> {
    let registry = state.gateway.registry();
    let engines: serde_json::Map<String, serde_json::Value> = registry
        .iter()
        .map(|e| (e.key.clone(), json!(e.url_template)))
        .collect();
    let categories: serde_json::Map<String, serde_json::Value> = registry
        .categories()
        .into_iter()
        .map(|(category, keys)| (category, json!(keys)))
        .collect();
    Json(json!({
        "engines": engines,
        "categories": categories,
        "total_engines": registry.len(),
    }))
}

#[derive(Deserialize)]
struct BrowserSearchParams {
    q: String,
    #[serde(default = "default_browser_engine")]
    engine: String,
    #[serde(default)]
    redirect: bool,
}

fn default_browser_engine() -> String {
    "all".to_string()
}

async fn browser_search(
    State(state): State<AppState>,
    Query(params): Query<BrowserSearchParams>,
) -> Response {
    if params.engine == "all" {
        return Html(render_all_urls_page(&state.gateway, &params.q)).into_response();
    }

    // Unknown keys fall back to the default engine here instead of rejecting.
    let (engine, url) = state.gateway.search_url(&params.engine, &params.q);
    if params.redirect {
        Redirect::temporary(&url).into_response()
    } else {
        Json(json!({
            "query": params.q,
            "engine": engine,
            "redirect_url": url,
        }))
        .into_response()
    }
}

async fn opensearch_descriptor(State(state): State<AppState>) -> Response {
    let base = state.config.public_base_url();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/">
    <ShortName>Aggregate Search</ShortName>
    <Description>Search multiple engines with shortcuts</Description>
    <Tags>search aggregate multi-engine</Tags>
    <Url type="text/html" template="{base}/browser-search?q={{searchTerms}}&amp;engine=gg&amp;redirect=true"/>
</OpenSearchDescription>
"#
    );
    (
        [(
            header::CONTENT_TYPE,
            "application/opensearchdescription+xml",
        )],
        xml,
    )
        .into_response()
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "engines_available": state.gateway.registry().len(),
    }))
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let registry = state.gateway.registry();
    let mut sections = String::new();
    for (category, keys) in registry.categories() {
        sections.push_str(&format!("<div class=\"category\"><h3>{}</h3><div class=\"engines\">", escape(&category)));
        for key in keys {
            sections.push_str(&format!(
                "<span class=\"engine\" title=\"{}\">{}</span>",
                escape(&registry.engine_name(&key)),
                escape(&key)
            ));
        }
        sections.push_str("</div></div>");
    }
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Aggregate Search</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link rel="search" type="application/opensearchdescription+xml" title="Aggregate Search" href="/opensearch.xml">
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', sans-serif; background: #0d1117; color: #e6edf3; max-width: 800px; margin: 0 auto; padding: 2rem; }}
        h1 {{ color: #58a6ff; }}
        .category h3 {{ color: #58a6ff; border-bottom: 1px solid #30363d; padding-bottom: 0.5rem; }}
        .engines {{ display: flex; flex-wrap: wrap; gap: 0.5rem; }}
        .engine {{ background: #21262d; border: 1px solid #30363d; border-radius: 6px; padding: 0.4rem 0.8rem; }}
        a {{ color: #58a6ff; }}
    </style>
</head>
<body>
    <h1>Aggregate Search</h1>
    <p>Multi-engine search gateway. {count} engines available.</p>
    <h2>Available Search Engines</h2>
    {sections}
    <p><a href="/engines">Engine listing (JSON)</a> &middot; <a href="/opensearch.xml">OpenSearch</a> &middot; <a href="/health">Health</a></p>
</body>
</html>
"#,
        count = registry.len(),
    ))
}

fn render_all_urls_page(gateway: &Gateway, query: &str) -> String {
    let mut sections = String::new();
    for (category, urls) in gateway.all_search_urls(query) {
        sections.push_str(&format!(
            "<div class=\"category\"><h3>{}</h3><div class=\"grid\">",
            escape(&category)
        ));
        for resolved in urls {
            sections.push_str(&format!(
                "<div class=\"card\"><div class=\"name\">{}</div><a href=\"{}\" target=\"_blank\" class=\"link\">{}</a></div>",
                escape(&resolved.name),
                escape(&resolved.url),
                escape(&resolved.url)
            ));
        }
        sections.push_str("</div></div>");
    }
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Search Results for "{query}"</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', sans-serif; background: #0d1117; color: #e6edf3; max-width: 1200px; margin: 0 auto; padding: 2rem; }}
        h1, .category h3 {{ color: #58a6ff; }}
        .grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 1rem; }}
        .card {{ background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 1rem; }}
        .name {{ font-weight: 600; margin-bottom: 0.5rem; }}
        .link {{ color: #58a6ff; word-break: break-all; }}
    </style>
</head>
<body>
    <h1>Search Results</h1>
    <p>Query: "{query}"</p>
    {sections}
    <p><a href="/" style="color: #58a6ff;">&larr; Back to Home</a></p>
</body>
</html>
"#,
        query = escape(query),
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
