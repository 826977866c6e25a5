use std::sync::Arc;

use anyhow::{Context, Result};
use catalog_api::{app, config, middleware, shutdown};
use domain::services::ProductService;
use persistence::repositories::ProductRepository;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load().context("failed to load configuration")?;

    middleware::logging::init_logging(&config.logging)
        .context("failed to initialize logging")?;
    middleware::init_metrics().context("failed to install metrics recorder")?;

    info!("Starting Catalog API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&(&config.database).into())
        .await
        .context("failed to connect to database")?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("Migrations completed");

    if config.seed.enabled {
        let summary = persistence::seed::seed_database(&pool, &config.seed.path)
            .await
            .with_context(|| format!("failed to seed from {}", config.seed.path))?;
        info!(
            categories_created = summary.categories_created,
            products_created = summary.products_created,
            "Seeding completed"
        );
    }

    let discounts = config
        .discount_table()
        .context("invalid discount configuration")?;
    info!(rules = discounts.len(), "Discount table loaded");

    let products = ProductService::new(
        Arc::new(ProductRepository::new(pool.clone())),
        Arc::new(discounts),
    );

    let addr = config.socket_addr().context("invalid server address")?;
    let app = app::create_app(config, pool, Arc::new(products));

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
