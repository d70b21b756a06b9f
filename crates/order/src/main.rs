use anyhow::{Context, Result};
use order::{config::myconfig::Config, handler::AppRouter, state::AppState};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger, run_metrics_collector},
};
use tracing::{error, info};

const SERVICE_NAME: &str = "order-service";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = setup_telemetry(&config)?;

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("failed to migration database")?;
    }

    info!("Connected to database");

    let state = AppState::new(db_pool);

    tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down...");

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown().await {
            error!("Failed to shutdown telemetry: {}", e);
        }
    }

    info!("✅ Order Service shutdown complete.");

    Ok(())
}

fn setup_telemetry(config: &Config) -> Result<Option<Telemetry>> {
    let Some(endpoint) = config.otel_endpoint.clone() else {
        init_logger(None, SERVICE_NAME, config.is_dev, config.enable_file_log);
        return Ok(None);
    };

    let mut telemetry = Telemetry::new(SERVICE_NAME, endpoint);
    let logger_provider = telemetry.init_logger()?;
    telemetry.init_meter()?;
    telemetry.init_tracer()?;

    init_logger(
        Some(logger_provider),
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    );

    Ok(Some(telemetry))
}

pub async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}
