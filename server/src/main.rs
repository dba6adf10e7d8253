mod config;
mod routes;
mod state;

use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        debug!(error = %e, "no .env loaded");
    }

    let config = config::ServerConfig::from_env()?;
    let state = state::AppState::from_config(&config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    info!(port = config.port, store = ?config.store, "report server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
