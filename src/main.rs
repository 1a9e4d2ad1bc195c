use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yatube::infrastructure::config::{Config, LogFormat};
use yatube::infrastructure::db::{check_connection, create_pool, run_migrations};
use yatube::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting Yatube on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    start_http_server(Arc::new(pool), Arc::new(config)).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "yatube=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
