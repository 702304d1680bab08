//! # Storefront Server
//!
//! Loads configuration, connects to PostgreSQL and Redis, warms the product
//! cache and serves the REST API until a shutdown signal arrives.

use std::sync::Arc;
use storefront_config::{AppConfig, ConfigLoader};
use storefront_core::{StorefrontError, StorefrontResult};
use storefront_repository::{create_pool, DatabasePoolInterface};
use storefront_rest::{create_router, AppState};
use storefront_security::TokenProvider;
use storefront_server::di::{build_module, create_redis_pool, StorefrontResolver};
use storefront_server::startup::{init_logging, print_banner, print_startup_info};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let config = config_loader.get().await;

    init_logging(&config.observability);
    print_banner();

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> StorefrontResult<()> {
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    let redis_pool = create_redis_pool(&config.redis)?;
    let module = build_module(&db_pool, redis_pool, &config.cache);
    let product_service = module.product_service();

    if config.cache.warm_on_startup {
        match product_service.warm_cache().await {
            Ok(count) => info!(products = count, "Product cache warm-up complete"),
            Err(e) => warn!("Product cache warm-up failed, continuing: {}", e),
        }
    }

    let token_provider = Arc::new(TokenProvider::new(Arc::new(config.security.clone())));
    let router = create_router(
        AppState::new(product_service),
        token_provider,
        &config.server,
    );

    let rest_addr = config.server.rest_addr();
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| StorefrontError::Internal(format!("Failed to bind REST: {}", e)))?;

    print_startup_info(&rest_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StorefrontError::Internal(format!("REST server error: {}", e)))?;

    module.database_pool().close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
