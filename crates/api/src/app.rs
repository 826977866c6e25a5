use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::Uri, middleware, routing::get, Router};
use domain::services::ProductEnsurer;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::{handle_middleware_error, ApiError};
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{health, products};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub products: Arc<dyn ProductEnsurer>,
}

pub fn create_app(config: Config, pool: PgPool, products: Arc<dyn ProductEnsurer>) -> Router {
    let config = Arc::new(config);
    let request_timeout = Duration::from_secs(config.server.request_timeout_secs);

    let state = AppState {
        pool,
        config,
        products,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api", get(health::root))
        .route("/api/", get(health::root))
        .route("/api/products", get(products::list_products));

    let public_routes = Router::new()
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(api_routes)
        .merge(public_routes)
        .fallback(not_found)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
