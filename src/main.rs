use hrdesk::migrator::Migrator;
use hrdesk::{AppState, Config, router, seed};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hrdesk=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = Config::from_env();
    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    tracing::info!(database = %config.database_url, "Database ready");

    if config.seed_sample_data && seed::seed_sample_data(&db).await? {
        tracing::info!("Inserted sample data");
    }

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, uploads = %config.uploads_dir.display(), "HR server listening");

    let app = router(AppState::new(db.clone(), config));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;

    db.close().await?;
    Ok(())
}
