//! Adam Assistant backend
//!
//! - GET /auth sends the user to Google's consent screen
//! - GET /oauth2callback exchanges the code and stores the token file
//! - GET /emails lists the latest Gmail messages with the stored token

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use adam_assistant_backend::auth::{FileCredentialStore, OAuth2Config, OAuthGateway};
use adam_assistant_backend::config::Settings;
use adam_assistant_backend::utils::logging::*;
use adam_assistant_backend::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; hosted deployments inject real variables
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv_loaded {
        tracing::info!("✅ .env file loaded");
    } else {
        tracing::debug!(".env not found - using process environment");
    }

    let settings = Settings::new().context("Failed to load settings")?;
    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    let oauth_config =
        OAuth2Config::from_settings(&settings).context("OAuth2 configuration incomplete")?;

    let store = FileCredentialStore::new(&settings.storage.token_file);
    log_info(&format!("💾 Token file: {}", store.path().display()));

    let gateway = OAuthGateway::new(oauth_config, Arc::new(store));
    let app = build_router(Arc::new(AppState::new(gateway)));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    log_server_startup(settings.server.port);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log_server_ready(&addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error(&format!("Failed to install Ctrl+C handler: {}", e));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log_error(&format!("Failed to install SIGTERM handler: {}", e));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
