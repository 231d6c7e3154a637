use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskhub_api::{config, routes, state::ApiState};
use taskhub_db::Database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskhub_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    config::load_env();

    let config = config::Config::from_env()?;

    // Connect to the database and make sure the task table exists
    let db = Database::connect(&config.database).await;
    db.init_schema().await?;

    // Create app state
    let state = ApiState {
        repo: Arc::new(db),
    };

    // Build router
    let app = routes::create_router(state, routes::cors_layer(&config.cors_origins));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🚀 TaskHub API Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
