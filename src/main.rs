//! Feedback Intake Service
//!
//! HTTP API for collecting user feedback and feature suggestions:
//! - Validated submissions with coded, per-field error reports
//! - Filtered listing, lookup and partial triage updates
//! - Atomic community voting on suggestions
//! - Category statistics and an admin dashboard computed on demand

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info, warn};

use api::{router, AppState};
use store::{DocumentStore, StoreBackend, StoreConfig};
use telemetry::{init_tracing_from_env, metrics};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Interval between logged metrics snapshots in seconds
    #[serde(default = "default_metrics_interval_secs")]
    metrics_interval_secs: u64,

    #[serde(default)]
    store: StoreConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_metrics_interval_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            metrics_interval_secs: default_metrics_interval_secs(),
            store: StoreConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Feedback Service v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        backend = ?config.store.backend,
        database = %config.store.database,
        "Loaded store config"
    );

    let store = store::connect(&config.store)
        .await
        .context("Failed to open document store")?;

    if !store::health::check_connection(store.as_ref()).await {
        warn!("Store not reachable at startup; serving with readiness down");
    }

    let _health_handle = store::health::start_health_monitor(
        store.clone(),
        Duration::from_secs(config.store.health_interval_secs.max(1)),
    );
    let _metrics_handle =
        start_metrics_reporter(Duration::from_secs(config.metrics_interval_secs.max(1)));

    let app = router(AppState::new(store.clone()));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");
    log_final_metrics(store.as_ref());
    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("FEEDBACK")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat names for the nested store settings, plus the names older
    // deployments already export.
    if let Ok(backend) = std::env::var("FEEDBACK_STORE_BACKEND") {
        config.store.backend = backend
            .parse::<StoreBackend>()
            .map_err(anyhow::Error::msg)
            .context("Invalid FEEDBACK_STORE_BACKEND")?;
    }
    if let Some(url) = env_first(&["FEEDBACK_MONGO_URL", "MONGO_URL"]) {
        config.store.mongo_url = url;
        // A connection string without an explicit backend means Mongo.
        if std::env::var("FEEDBACK_STORE_BACKEND").is_err() {
            config.store.backend = StoreBackend::Mongo;
        }
    }
    if let Some(database) = env_first(&["FEEDBACK_MONGO_DATABASE", "DB_NAME"]) {
        config.store.database = database;
    }

    Ok(config)
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Logs a metrics snapshot on a fixed interval.
fn start_metrics_reporter(every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let snapshot = metrics().snapshot();
            info!(
                feedback_submitted = snapshot.feedback_submitted,
                suggestions_submitted = snapshot.suggestions_submitted,
                votes_recorded = snapshot.votes_recorded,
                analytics_events = snapshot.analytics_events_recorded,
                validation_failures = snapshot.validation_failures,
                not_found = snapshot.not_found,
                store_errors = snapshot.store_errors,
                store_latency_mean_ms = snapshot.store_latency_mean_ms,
                "Metrics snapshot"
            );
            if snapshot.store_errors > 0 {
                warn!(store_errors = snapshot.store_errors, "Store errors since startup");
            }
        }
    })
}

fn log_final_metrics(store: &dyn DocumentStore) {
    match serde_json::to_string(&metrics().snapshot()) {
        Ok(json) => info!(backend = store.backend(), metrics = %json, "Final metrics"),
        Err(e) => error!("Failed to serialize metrics: {}", e),
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
