//! Paddock server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use paddock_core::config::AppConfig;
use paddock_server::bootstrap::ensure_login_session;
use paddock_server::{AppState, SessionVerifier, create_router};
use paddock_store::RecordStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Paddock - a motorsport driver and team registry
#[derive(Parser, Debug)]
#[command(name = "paddockd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "PADDOCK_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("Paddock v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // Check for PADDOCK_ environment variables (excluding PADDOCK_CONFIG which is just the path)
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("PADDOCK_") && key != "PADDOCK_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: paddockd --config /path/to/config.toml\n  \
             2. Environment variables: PADDOCK_SERVER__BIND=0.0.0.0:8080 \
             PADDOCK_AUTH__TOKEN_HASH=sha256:YOUR_TOKEN_HASH_HERE paddockd\n\n\
             See config/server.example.toml for example configuration.\n\
             Set PADDOCK_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("PADDOCK_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Initialize record store
    let store = paddock_store::from_config(&config.store)
        .await
        .context("failed to initialize record store")?;
    tracing::info!("Record store initialized");

    // Verify store connectivity before accepting requests.
    store
        .health_check()
        .await
        .context("record store health check failed")?;

    // Initialize the login session backing the configured token
    ensure_login_session(store.as_ref(), &config.auth).await?;

    // Create application state
    let verifier = Arc::new(SessionVerifier::new(store.clone()));
    let state = AppState::new(config.clone(), store, verifier);

    // Create router
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
