// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, store backend, and start HTTP server

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

use hbnb_places::config::{self, Config};
use hbnb_places::errors::json_error_handler;
use hbnb_places::handlers;
use hbnb_places::store::{MemoryStore, PgPlaceStore, PlaceStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting hbnb-places microservice...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize the store backend
    let store: Arc<dyn PlaceStore> = match config.store_backend.as_str() {
        "memory" => {
            log::warn!("Using in-memory store; data is not persisted");
            log::info!("Demo host user id: demo-host");
            Arc::new(MemoryStore::with_demo_data())
        }
        _ => {
            let pool = match config::init_db_pool(&config).await {
                Ok(pool) => pool,
                Err(e) => {
                    log::error!("Failed to connect to database: {}", e);
                    std::process::exit(1);
                }
            };
            Arc::new(PgPlaceStore::new(pool))
        }
    };

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (store and config)
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            // Middleware
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            // /places/ and /places resolve to the same collection route
            .wrap(middleware::NormalizePath::trim())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
