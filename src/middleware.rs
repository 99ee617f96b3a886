//! Pagination middleware
//!
//! [`PaginateLayer`] wraps a service in [`Paginate`]. For each request it:
//!
//! 1. Lets the request through untouched when the bypass predicate fires.
//! 2. Reads the page and limit query parameters as `i64`, falling back to the
//!    configured defaults when a key is missing or its value is not an integer.
//! 3. Stores the resulting [`PageInfo`] in the request extensions.
//! 4. Calls the inner service and returns its response unchanged.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::{Query, Request};
use axum::http::Uri;
use tower::{Layer, Service};

use crate::config::{PaginateConfig, PaginateOptions};
use crate::page_info::{self, PageInfo};

/// Layer that attaches [`PageInfo`] to every request.
///
/// ```ignore
/// let app = Router::new()
///     .route("/items", get(list_items))
///     .layer(PaginateLayer::with_options(
///         PaginateOptions::default().page_key("p").default_limit(25),
///     ));
/// ```
#[derive(Debug, Clone)]
pub struct PaginateLayer {
    config: Arc<PaginateConfig>,
}

impl PaginateLayer {
    /// Layer with the built-in defaults (`page`/`limit`, 1/10).
    pub fn new() -> Self {
        Self::from_config(PaginateConfig::default())
    }

    pub fn with_options(options: PaginateOptions) -> Self {
        Self::from_config(PaginateConfig::resolve(Some(options)))
    }

    pub fn from_config(config: PaginateConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PaginateConfig {
        &self.config
    }
}

impl Default for PaginateLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for PaginateLayer {
    type Service = Paginate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Paginate {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Service produced by [`PaginateLayer`].
#[derive(Debug, Clone)]
pub struct Paginate<S> {
    inner: S,
    config: Arc<PaginateConfig>,
}

impl<S> Service<Request> for Paginate<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        if self.config.skips(&request) {
            tracing::trace!(uri = %request.uri(), "pagination skipped");
            return self.inner.call(request);
        }

        let info = resolve_page_info(&self.config, request.uri());
        tracing::debug!(page = info.page, limit = info.limit, "pagination resolved");

        page_info::store(request.extensions_mut(), info);
        self.inner.call(request)
    }
}

/// Resolve the page info carried by `uri` under `config`, ignoring the
/// bypass predicate.
pub fn resolve_page_info(config: &PaginateConfig, uri: &Uri) -> PageInfo {
    let pairs = query_pairs(uri);

    PageInfo::new(
        query_int(&pairs, &config.page_key, config.default_page),
        query_int(&pairs, &config.limit_key, config.default_limit),
    )
}

fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::trace!(error = %e, "unreadable query string, using defaults");
            Vec::new()
        }
    }
}

/// First value for `key` parsed as `i64`, else `default`.
fn query_int(pairs: &[(String, String)], key: &str, default: i64) -> i64 {
    let Some(raw) = pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
    else {
        return default;
    };

    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            tracing::trace!(key, value = %raw, error = %e, "not an integer, using default");
            default
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
