//! AI Translator Web - Web front-end for translating text with hosted LLMs.

mod helpers;
mod routes;
mod state;
mod templates;

use ai_translator_core::{AppConfig, ProviderCredentials};
use anyhow::{Context, Result};
use axum::http::{HeaderValue, header};
use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use state::AppState;

/// Simulated latency for demo-mode answers when nothing else is configured.
const DEFAULT_WEB_MOCK_LATENCY_MS: u64 = 800;

#[derive(Parser, Debug)]
#[command(name = "ai-translator-web")]
#[command(author, version, about = "AI Translator Web Server", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Demo-mode latency in milliseconds (overrides config)
    #[arg(long, env = "MOCK_LATENCY_MS")]
    mock_latency_ms: Option<u64>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Build the application router.
fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        // API endpoints - HTML fragments (HTMX)
        .route("/api/translate", post(routes::translate_text))
        // API endpoints - JSON
        .route("/api/providers", get(routes::list_providers))
        .route("/api/status", get(routes::status))
        // Middleware
        // Cache-Control for HTML fragments - prevents bfcache issues with HTMX
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, max-age=0"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},hyper=warn,reqwest=warn")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    // A zero latency in config means "unset" for the web front-end
    config.dispatch.mock_latency_ms = match args.mock_latency_ms {
        Some(ms) => ms,
        None if config.dispatch.mock_latency_ms == 0 => DEFAULT_WEB_MOCK_LATENCY_MS,
        None => config.dispatch.mock_latency_ms,
    };

    let credentials = ProviderCredentials::from_env();
    let state = Arc::new(
        AppState::new(config, &credentials).context("Failed to initialize application state")?,
    );

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
