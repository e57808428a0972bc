use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budgetmate={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect(&settings.server.database).await.inspect_err(|err| {
        tracing::error!("failed to initialize database: {err}");
    })?;
    tracing::info!("Connected to the database");

    let engine = engine::Engine::builder()
        .database(db.clone())
        .hash_cost(settings.server.hash_cost)
        .build()
        .await
        .inspect_err(|err| tracing::error!("failed to build engine from database: {err}"))?;

    let listener = tokio::net::TcpListener::bind(settings.address())
        .await
        .inspect_err(|err| tracing::error!("failed to bind server listener: {err}"))?;

    let served = server::run_with_listener(engine, listener, shutdown_signal())
        .await
        .inspect_err(|err| tracing::error!("server failed: {err}"));

    shut_down(db, served).await
}

/// Close the pool, then report how serving went.
async fn shut_down(
    db: sea_orm::DatabaseConnection,
    served: std::io::Result<()>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    db.close().await?;
    tracing::info!("Database connection closed");
    served?;
    Ok(())
}

async fn connect(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()?).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory() -> sea_orm::DatabaseConnection {
        sea_orm::Database::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn clean_shutdown_succeeds() {
        assert!(shut_down(memory().await, Ok(())).await.is_ok());
    }

    #[tokio::test]
    async fn server_failure_is_returned_after_closing() {
        let failed = Err(std::io::Error::other("listener closed"));

        let err = shut_down(memory().await, failed).await.unwrap_err();

        assert_eq!(err.to_string(), "listener closed");
    }
}
