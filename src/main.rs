use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_catalog::config::AppConfig;
use course_catalog::db::{self, SqliteCourseStore};
use course_catalog::routes::router;
use course_catalog::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::new_from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::connect(&config).await?;

    let state = AppState::with_store(Arc::new(SqliteCourseStore::new(pool)));

    let app = router(state, config.graphql_playground);

    info!("listening on http://{}", config.bind_addr);
    if config.graphql_playground {
        info!("GraphiQL available at http://{}/graphql", config.bind_addr);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", err);
    }
    info!("shutting down");
}
