use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use events_server::config::Config;
use events_server::repository::{EventRepository, InMemoryEventRepository, PgEventRepository};
use events_server::routes::create_routes;
use events_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    let repository: Arc<dyn EventRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Successfully connected to database");

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            tracing::info!("Migrations run successfully");

            Arc::new(PgEventRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, keeping events in memory");
            Arc::new(InMemoryEventRepository::new())
        }
    };

    let state = AppState::new(repository, config.public_base_url.clone());
    let app: Router = create_routes(state, &config);

    let addr = config.bind_addr();
    tracing::info!("Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind address {}", addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
