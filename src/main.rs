use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cargotariff::config::Config;
use cargotariff::core::AppState;
use cargotariff::middleware::{json_error_handler, RequestId};
use cargotariff::modules::audit::{AuditSink, HttpLogTransport};
use cargotariff::modules::tariffs::controllers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cargotariff=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting cargo insurance cost evaluation service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    tracing::info!(
        "Verifying connectivity to the database {}",
        config.database.redacted_url()
    );
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.max_connections
    );

    // Ensure the schema exists
    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Audit sink delivering to the external log collector
    let transport = Arc::new(HttpLogTransport::new(
        config.audit.base_url.clone(),
        config.audit.api_key.clone(),
        config.audit.batch_max_bytes,
    ));
    let audit = Arc::new(AuditSink::new(
        transport,
        config.audit.topic.clone(),
        config.audit.partition,
    ));
    tracing::info!(
        "Audit sink delivering to {} (topic {})",
        config.audit.base_url,
        config.audit.topic
    );

    let state = web::Data::new(AppState::new(
        db_pool,
        audit,
        config.audit.user.clone(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(RequestId)
            .configure(controllers::configure)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "cargotariff"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Cargo Insurance Cost Evaluation API",
        "version": "0.1.0",
        "status": "running"
    }))
}
