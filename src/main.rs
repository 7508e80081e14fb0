use clap::Parser;
use tokio::signal;
use unified_access::{
    config::AppConfig, db, error::CoreError, init_tracing, migrations, AppState,
};

#[derive(Parser)]
#[command(name = "unified-access")]
#[command(about = "Unified access identity/session service", long_about = None)]
struct Cli {
    /// Apply the schema and operation catalogs, then exit
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        environment = ?config.environment,
        "Starting unified-access"
    );

    if cli.migrate {
        // Bring-up mode: single writer, runs to completion before any
        // service traffic; a failure exits non-zero with nothing committed.
        let admin_pool = db::create_pool(&config.admin_database).await?;
        migrations::apply(
            &admin_pool,
            migrations::SCHEMA_CATALOG,
            migrations::OPERATION_CATALOG,
        )
        .await?;
        tracing::info!("Database migrated successfully");
        return Ok(());
    }

    let pool = db::create_pool(&config.database).await?;
    db::health_check(&pool).await?;

    let state = AppState::new(config, pool);
    tracing::info!(
        max_connections = state.config.database.max_connections,
        "Operation catalog online; awaiting transport layer traffic"
    );

    // The HTTP layer that maps requests onto the operation services is an
    // external collaborator mounted by the embedding deployment.
    shutdown_signal().await;

    tracing::info!("Service shutdown complete");
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
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
