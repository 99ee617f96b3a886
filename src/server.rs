//! Demo server runtime.
//!
//! Builds a small router around [`PaginateLayer`] so the middleware can be
//! exercised over HTTP, and owns tracing setup for the binary.

use axum::extract::Request;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::ApiResponse;
use crate::middleware::PaginateLayer;
use crate::page_info::PageInfo;

/// Path excluded from pagination by the demo router.
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    paginated: bool,
}

async fn echo(info: PageInfo) -> Json<ApiResponse<PageInfo>> {
    Json(ApiResponse::success(info))
}

async fn health(info: Option<PageInfo>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        paginated: info.is_some(),
    }))
}

/// Router used by `paginate-demo`.
///
/// - `GET /` echoes the resolved [`PageInfo`]
/// - `GET /health` bypasses pagination
pub fn create_router(config: &AppConfig) -> Router {
    let options = config
        .pagination
        .clone()
        .next(|request: &Request| request.uri().path() == HEALTH_PATH);

    Router::new()
        .route("/", get(echo))
        .route(HEALTH_PATH, get(health))
        .layer(PaginateLayer::with_options(options))
        .layer(TraceLayer::new_for_http())
}

/// Serve the demo router until Ctrl+C.
pub async fn run(config: &AppConfig) -> std::io::Result<()> {
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, create_router(config))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("🛑 Shutdown signal received");
            }
        })
        .await
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
