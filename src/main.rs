use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::{Config, HealthStatus};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // Startup probe is informational only; an offline backend does not block serving
    let health = state.client.check_health().await;
    match health.status {
        HealthStatus::Online => tracing::info!(
            url = %health.backend_url,
            platform = ?health.platform,
            "Analysis backend online"
        ),
        status => tracing::warn!(url = %health.backend_url, status = ?status, "Analysis backend not ready"),
    }

    let client = state.client.clone();
    let sessions = state.sessions.clone();

    tracing::info!("Starting Credibility Console on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(client.clone())
            .app_data(sessions.clone())
            .configure(api::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
