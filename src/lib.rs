//! FreshStock API Library
//!
//! Back-office inventory service for fresh-goods warehousing.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod common;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware_helpers;
pub mod migrator;
pub mod reports;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{http::HeaderValue, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Every entity router, mounted under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/localities", handlers::localities::localities_routes())
        .nest("/sellers", handlers::sellers::sellers_routes())
        .nest("/warehouses", handlers::warehouses::warehouses_routes())
        .nest("/carries", handlers::carries::carries_routes())
        .nest("/employees", handlers::employees::employees_routes())
        .nest("/buyers", handlers::buyers::buyers_routes())
        .nest("/sections", handlers::sections::sections_routes())
        .nest("/products", handlers::products::products_routes())
        .nest(
            "/productBatches",
            handlers::product_batches::product_batches_routes(),
        )
        .nest(
            "/productRecords",
            handlers::product_records::product_records_routes(),
        )
        .nest(
            "/purchaseOrders",
            handlers::purchase_orders::purchase_orders_routes(),
        )
        .nest(
            "/inboundOrders",
            handlers::inbound_orders::inbound_orders_routes(),
        )
        .route(
            "/reportPurchaseOrder",
            get(handlers::buyers::report_purchase_orders),
        )
}

/// Full application router with the HTTP middleware stack applied.
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let routes = Router::new()
        .nest("/health", handlers::health::health_routes())
        .nest("/api/v1", api_v1_routes());

    middleware_helpers::with_request_timeout(routes, state.config.request_timeout())
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors)
        // Outermost, so the trace span and every event log entry see the id
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}

fn cors_layer(cfg: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        ::tracing::info!("No CORS origins configured; allowing any origin");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::errors::{ErrorResponse, ServiceError, ServiceResult};
    pub use crate::{app_router, AppState};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_origins_are_honoured() {
        let mut cfg = config::AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            "test".into(),
        );
        cfg.cors_allowed_origins = Some("https://a.example, ,https://b.example".into());
        assert_eq!(cfg.cors_origins().len(), 2);
        // Layer construction must not panic for either branch.
        let _ = cors_layer(&cfg);
        cfg.cors_allowed_origins = None;
        let _ = cors_layer(&cfg);
    }
}
