//! Movies catalog HTTP API
//!
//! Read-only JSON endpoints over the catalog:
//! - `GET /list` - paginated filmworks, optionally filtered by title
//! - `GET /detail/{id}` - one filmwork
//! - `GET /health`, `GET /ready` - probes

pub mod handlers;
pub mod middleware;

use axum::{
    http::{HeaderName, Method, StatusCode},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use movies_common::{config::AppConfig, db::DbPool, MovieCatalog};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    pub fn catalog(&self) -> MovieCatalog {
        MovieCatalog::new(self.db.clone())
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let request_id_header = HeaderName::from_static("x-request-id");

    // Catalog endpoints answer GET only; HEAD is rejected explicitly since
    // axum would otherwise serve it from the GET handler
    let catalog_routes = Router::new()
        .route(
            "/list",
            get(handlers::movies::list_movies)
                .head(handlers::movies::method_not_allowed)
                .fallback(handlers::movies::method_not_allowed),
        )
        .route(
            "/detail/{id}",
            get(handlers::movies::get_movie)
                .head(handlers::movies::method_not_allowed)
                .fallback(handlers::movies::method_not_allowed),
        );

    let probe_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready));

    Router::new()
        .merge(catalog_routes)
        .merge(probe_routes)
        .route_layer(axum_middleware::from_fn(middleware::metrics::track_requests))
        .layer(ConcurrencyLimitLayer::new(state.config.server.max_concurrent_requests))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}
