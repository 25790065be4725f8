//! HTTP service around the crawler.
//!
//! `POST /crawl` runs one crawl per request. Requests must carry an
//! `X-API-Key` header from the configured allow-list; anything else is
//! rejected before any page is fetched.

use crate::config::{ConfigError, CrawlerConfig, ScoringConfig, ServerConfig, default_max_pages};
use crate::crawlers::{self, Fetcher};
use crate::results::CrawlResponse;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlRequest {
    pub url: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid or missing API key")]
    InvalidKey,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Body(#[from] JsonRejection),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(e) => {
                (StatusCode::FORBIDDEN, Json(json!({ "detail": e.to_string() }))).into_response()
            }
            ApiError::Body(rejection) => rejection.into_response(),
            ApiError::Config(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": e.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Everything a request handler needs, shared by all requests
pub struct AppState<F> {
    scoring: ScoringConfig,
    fetcher: F,
    api_keys: HashSet<String>,
    max_concurrency: usize,
}

impl<F: Fetcher> AppState<F> {
    pub fn new(scoring: ScoringConfig, fetcher: F, api_keys: HashSet<String>) -> Self {
        Self {
            scoring,
            fetcher,
            api_keys,
            max_concurrency: 1,
        }
    }

    /// Concurrent fetches per crawl request
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

/// Checks the request's API key against the allow-list
pub fn authorize(headers: &HeaderMap, api_keys: &HashSet<String>) -> Result<(), AuthError> {
    let key = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::InvalidKey)?;

    if api_keys.contains(key) {
        Ok(())
    } else {
        Err(AuthError::InvalidKey)
    }
}

pub fn router<F: Fetcher + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/crawl", post(crawl_site::<F>))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C
pub async fn serve<F: Fetcher + 'static>(
    config: &ServerConfig,
    state: AppState<F>,
) -> std::io::Result<()> {
    if state.api_keys.is_empty() {
        ::log::warn!("No API keys configured; every crawl request will be rejected");
    }

    let tcp_listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    ::log::info!("Starting persona crawl service on address: {}", config.bind_address);

    axum::serve(tcp_listener, router(Arc::new(state)))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                ::log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Persona Crawler API is running.",
        "endpoints": {
            "POST /crawl": "Run a persona-based crawl on a website."
        }
    }))
}

pub async fn crawl_site<F: Fetcher + 'static>(
    State(state): State<Arc<AppState<F>>>,
    headers: HeaderMap,
    payload: Result<Json<CrawlRequest>, JsonRejection>,
) -> Result<Json<CrawlResponse>, ApiError> {
    authorize(&headers, &state.api_keys)
        .inspect_err(|_| ::log::warn!("Rejected crawl request with invalid API key"))?;
    let Json(request) = payload?;

    let mut config = CrawlerConfig::new(&request.url);
    config.max_pages = request.max_pages;
    config.max_concurrency = state.max_concurrency;

    let pages = crawlers::web::start(&config, &state.scoring, &state.fetcher).await?;

    Ok(Json(CrawlResponse {
        start_url: request.url,
        max_pages: request.max_pages,
        pages,
    }))
}
