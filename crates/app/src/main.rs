use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wallet_service={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server else {
        tracing::warn!("no server settings found, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let db = connect(&server.database).await.inspect_err(|err| {
        tracing::error!("failed to initialize database: {err}");
    })?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    server::run(engine, &addr, shutdown_signal())
        .await
        .inspect_err(|err| tracing::error!("server failed: {err}"))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn connect(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
