//! Configuration module
//!
//! Two layers live here:
//!
//! - [`PaginateOptions`] / [`PaginateConfig`]: what the middleware reads.
//!   Options are partial and user-supplied; the config is the fully
//!   resolved, read-only result.
//! - [`AppConfig`]: the demo server's TOML file (`server`, `logging`,
//!   `pagination` tables).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::Request;
use serde::Deserialize;

use crate::errors::ConfigError;

/// Query parameter holding the page number.
pub const DEFAULT_PAGE_KEY: &str = "page";
/// Query parameter holding the page size.
pub const DEFAULT_LIMIT_KEY: &str = "limit";
/// Page used when the query does not carry a usable one.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the query does not carry a usable one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Bypass predicate. Returning `true` lets the request through untouched.
pub type Skipper = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// User-supplied pagination options. Unset fields take the built-in defaults.
///
/// Deserializes from the `[pagination]` table of the config file:
///
/// ```toml
/// [pagination]
/// page_key = "p"
/// limit_key = "per_page"
/// default_limit = 25
/// ```
///
/// The bypass predicate can only be set from code.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaginateOptions {
    pub page_key: Option<String>,
    pub limit_key: Option<String>,
    pub default_page: Option<i64>,
    pub default_limit: Option<i64>,
    #[serde(skip)]
    pub next: Option<Skipper>,
}

impl PaginateOptions {
    pub fn page_key(mut self, key: impl Into<String>) -> Self {
        self.page_key = Some(key.into());
        self
    }

    pub fn limit_key(mut self, key: impl Into<String>) -> Self {
        self.limit_key = Some(key.into());
        self
    }

    pub fn default_page(mut self, page: i64) -> Self {
        self.default_page = Some(page);
        self
    }

    pub fn default_limit(mut self, limit: i64) -> Self {
        self.default_limit = Some(limit);
        self
    }

    /// Skip pagination for every request the predicate accepts.
    pub fn next<F>(mut self, skip: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.next = Some(Arc::new(skip));
        self
    }
}

impl fmt::Debug for PaginateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginateOptions")
            .field("page_key", &self.page_key)
            .field("limit_key", &self.limit_key)
            .field("default_page", &self.default_page)
            .field("default_limit", &self.default_limit)
            .field("next", &self.next.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Resolved middleware configuration, shared read-only by every request.
#[derive(Clone)]
pub struct PaginateConfig {
    pub page_key: String,
    pub limit_key: String,
    pub default_page: i64,
    pub default_limit: i64,
    pub next: Option<Skipper>,
}

impl PaginateConfig {
    /// Merge `options` over the built-in defaults.
    ///
    /// Empty key strings count as unset. Integer defaults are taken as given,
    /// zero and negative values included.
    pub fn resolve(options: Option<PaginateOptions>) -> Self {
        let options = options.unwrap_or_default();

        Self {
            page_key: options
                .page_key
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| DEFAULT_PAGE_KEY.to_string()),
            limit_key: options
                .limit_key
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| DEFAULT_LIMIT_KEY.to_string()),
            default_page: options.default_page.unwrap_or(DEFAULT_PAGE),
            default_limit: options.default_limit.unwrap_or(DEFAULT_LIMIT),
            next: options.next,
        }
    }

    /// Whether the bypass predicate fires for this request.
    pub fn skips(&self, request: &Request) -> bool {
        self.next.as_ref().is_some_and(|next| next(request))
    }
}

impl Default for PaginateConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

impl From<PaginateOptions> for PaginateConfig {
    fn from(options: PaginateOptions) -> Self {
        Self::resolve(Some(options))
    }
}

impl fmt::Debug for PaginateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginateConfig")
            .field("page_key", &self.page_key)
            .field("limit_key", &self.limit_key)
            .field("default_page", &self.default_page)
            .field("default_limit", &self.default_limit)
            .field("next", &self.next.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

// ── Application config file ────────────────────────────────────────

/// Listen address of the demo server.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Top-level config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginateOptions,
}

impl AppConfig {
    /// Load the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// `~/.config/axum-paginate/config.toml` (or the platform equivalent).
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("axum-paginate")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn resolve_without_options_uses_builtins() {
        let cfg = PaginateConfig::resolve(None);
        assert_eq!(cfg.page_key, "page");
        assert_eq!(cfg.limit_key, "limit");
        assert_eq!(cfg.default_page, 1);
        assert_eq!(cfg.default_limit, 10);
        assert!(cfg.next.is_none());
    }

    #[test]
    fn resolve_takes_set_fields_only() {
        let cfg = PaginateConfig::from(PaginateOptions::default().limit_key("l").default_page(100));
        assert_eq!(cfg.page_key, "page");
        assert_eq!(cfg.limit_key, "l");
        assert_eq!(cfg.default_page, 100);
        assert_eq!(cfg.default_limit, 10);
    }

    #[test]
    fn empty_keys_count_as_unset() {
        let cfg = PaginateConfig::from(PaginateOptions::default().page_key("").limit_key(""));
        assert_eq!(cfg.page_key, "page");
        assert_eq!(cfg.limit_key, "limit");
    }

    #[test]
    fn negative_defaults_are_kept() {
        let cfg = PaginateConfig::from(
            PaginateOptions::default().default_page(-1).default_limit(0),
        );
        assert_eq!(cfg.default_page, -1);
        assert_eq!(cfg.default_limit, 0);
    }

    #[test]
    fn skips_follows_predicate() {
        let cfg = PaginateConfig::from(
            PaginateOptions::default().next(|req: &Request| req.uri().path() == "/health"),
        );
        let health = axum::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let items = axum::http::Request::builder()
            .uri("/items")
            .body(Body::empty())
            .unwrap();
        assert!(cfg.skips(&health));
        assert!(!cfg.skips(&items));
        assert!(!PaginateConfig::default().skips(&items));
    }

    #[test]
    fn app_config_from_toml() {
        let raw = r#"
            [server]
            port = 8080

            [logging]
            format = "json"

            [pagination]
            page_key = "p"
            default_limit = 25
        "#;
        let cfg = AppConfig::from_toml(raw).unwrap();
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "json");

        let resolved = PaginateConfig::from(cfg.pagination);
        assert_eq!(resolved.page_key, "p");
        assert_eq!(resolved.limit_key, "limit");
        assert_eq!(resolved.default_page, 1);
        assert_eq!(resolved.default_limit, 25);
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("axum-paginate-does-not-exist.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert!(cfg.pagination.page_key.is_none());
    }

    #[test]
    fn load_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!(
            "axum-paginate-malformed-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[pagination\ndefault_page = ").unwrap();
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
