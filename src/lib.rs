//! # axum-paginate
//!
//! Pagination middleware for Axum.
//!
//! [`PaginateLayer`] reads a page number and a page size from the query
//! string of every request, falls back to configured defaults when they are
//! missing or not integers, and stores the resulting [`PageInfo`] in the
//! request extensions. Handlers read it back with the [`PageInfo`] extractor
//! or the lookups in [`page_info`].
//!
//! ```ignore
//! use axum::{routing::get, Json, Router};
//! use axum_paginate::{PageInfo, PaginateLayer};
//!
//! async fn list(page: PageInfo) -> Json<PageInfo> {
//!     Json(page)
//! }
//!
//! let app: Router = Router::new()
//!     .route("/items", get(list))
//!     .layer(PaginateLayer::new());
//! ```
//!
//! ## Modules
//!
//! - **config**: option resolution and the demo server's TOML config
//! - **middleware**: the tower layer/service pair
//! - **page_info**: the stored value, lookups and extractors
//! - **errors**: rejection and config loading errors
//! - **server**: tracing setup and the demo router

pub mod config;
pub mod errors;
pub mod middleware;
pub mod page_info;
pub mod server;

pub use config::{
    default_config_path, AppConfig, PaginateConfig, PaginateOptions, Skipper, DEFAULT_LIMIT,
    DEFAULT_LIMIT_KEY, DEFAULT_PAGE, DEFAULT_PAGE_KEY,
};
pub use errors::{ApiResponse, ConfigError, PaginateError};
pub use middleware::{Paginate, PaginateLayer};
pub use page_info::{PageInfo, PageInfoOrDefault, RequestExt};
