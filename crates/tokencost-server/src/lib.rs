pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tokencost_core::{Catalog, PricingClient};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Shared handler state. Holds only configuration: nothing is cached
/// between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub pricing: PricingClient,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> tokencost_core::error::Result<Self> {
        Ok(Self {
            catalog: Catalog::new(&cfg.catalog_root),
            pricing: PricingClient::new(&cfg.pricing_url, cfg.pricing_timeout())?,
        })
    }
}

/// The full HTTP surface, without CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(routes::calculate))
        .route("/pricing", get(routes::pricing))
        .route("/benchmarks/:model_name", get(routes::benchmarks))
        .route("/benchmark-table", get(routes::benchmark_table))
        .with_state(Arc::new(state))
}

pub fn app(state: AppState, cfg: &Config) -> Router {
    router(state)
        .layer(cors_layer(cfg))
        .layer(TraceLayer::new_for_http())
}

/// `*` allows any origin without credentials. An explicit origin list
/// allows credentials and mirrors the requested methods and headers, since
/// wildcards cannot be combined with credentials.
fn cors_layer(cfg: &Config) -> CorsLayer {
    if cfg.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
