use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use venuebook::config::{Config, LogFormat};
use venuebook::middleware::{ApiKeyAuth, CredentialStore, MySqlCredentialStore, RateLimiter, RequestId};
use venuebook::reports::{MySqlReportRepository, PeriodBucketer, ReportRepository, ReportService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting Venuebook reporting service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Weekly buckets use {:?} week numbering", config.app.week_rule);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let repository: Arc<dyn ReportRepository> =
        Arc::new(MySqlReportRepository::new(db_pool.clone()));
    let report_service = Arc::new(ReportService::new(
        repository,
        PeriodBucketer::new(config.app.week_rule),
    ));
    let credentials: Arc<dyn CredentialStore> = Arc::new(MySqlCredentialStore::new(db_pool));

    // Shared across workers so the quota is global per client
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute);
    let cors_origins = config.security.cors_allowed_origins.clone();

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(report_service.clone()))
            .wrap(ApiKeyAuth::new(credentials.clone()))
            .wrap(rate_limiter.clone())
            .wrap(RequestId)
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(venuebook::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("venuebook={},actix_web=info", config.app.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET"])
        .allow_any_header()
        .expose_headers(vec!["x-request-id"])
        .max_age(3600)
}
