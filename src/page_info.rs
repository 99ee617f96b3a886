//! Resolved pagination values and the ways to read them back.
//!
//! [`PaginateLayer`](crate::PaginateLayer) stores one [`PageInfo`] per
//! request in the request extensions. The slot is keyed by a private type,
//! so a `PageInfo` inserted by other code under its own type is never
//! mistaken for the middleware's value.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::http::{Extensions, Request};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::errors::PaginateError;

/// Page number and page size resolved for one request.
///
/// Values are stored exactly as parsed or configured; zero and negative
/// numbers are not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    /// Requested page number
    pub page: i64,
    /// Requested page size
    pub limit: i64,
}

impl PageInfo {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }
}

/// Built-in defaults (page 1, limit 10), independent of any middleware config.
impl Default for PageInfo {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Extensions key owned by this module.
#[derive(Clone, Copy)]
struct Slot(PageInfo);

pub(crate) fn store(extensions: &mut Extensions, info: PageInfo) {
    extensions.insert(Slot(info));
}

/// Strict lookup: the stored value, or `None` when the middleware did not run
/// or its bypass predicate fired.
pub fn from_extensions(extensions: &Extensions) -> Option<PageInfo> {
    extensions.get::<Slot>().map(|slot| slot.0)
}

/// Defaulting lookup: the stored value, else [`PageInfo::default`].
///
/// Accepts `None` for callers that have no request at hand.
pub fn from_extensions_or_default(extensions: Option<&Extensions>) -> PageInfo {
    extensions.and_then(from_extensions).unwrap_or_default()
}

/// Lookups on anything that carries request extensions.
pub trait RequestExt {
    /// See [`from_extensions`].
    fn page_info(&self) -> Option<PageInfo>;

    /// See [`from_extensions_or_default`].
    fn page_info_or_default(&self) -> PageInfo;
}

impl<B> RequestExt for Request<B> {
    fn page_info(&self) -> Option<PageInfo> {
        from_extensions(self.extensions())
    }

    fn page_info_or_default(&self) -> PageInfo {
        from_extensions_or_default(Some(self.extensions()))
    }
}

impl RequestExt for Parts {
    fn page_info(&self) -> Option<PageInfo> {
        from_extensions(&self.extensions)
    }

    fn page_info_or_default(&self) -> PageInfo {
        from_extensions_or_default(Some(&self.extensions))
    }
}

/// Rejects with `400 Bad Request` when nothing was stored.
impl<S> FromRequestParts<S> for PageInfo
where
    S: Send + Sync,
{
    type Rejection = PaginateError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.page_info().ok_or(PaginateError::Missing)
    }
}

impl<S> OptionalFromRequestParts<S> for PageInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.page_info())
    }
}

/// Extractor running the defaulting lookup. Never rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfoOrDefault(pub PageInfo);

impl<S> FromRequestParts<S> for PageInfoOrDefault
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PageInfoOrDefault(parts.page_info_or_default()))
    }
}

// ── Tests ──────────────────────────────────────────────────────
