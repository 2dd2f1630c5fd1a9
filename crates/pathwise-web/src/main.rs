//! Pathwise Web - learning path API server.

use anyhow::{Context, Result};
use clap::Parser;
use pathwise::{build_engine, Config};
use pathwise_web::{create_router, AppState};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pathwise-web")]
#[command(about = "Pathwise learning path API server")]
struct Cli {
    /// Path to pathwise.toml (default: search current and parent directories)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Resources recommended per topic
    #[arg(long)]
    top_k: Option<usize>,

    /// Default number of results for /api/search
    #[arg(long, default_value = "20")]
    search_top_k: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(top_k) = cli.top_k {
        config.ranking.top_k = top_k;
    }

    let engine = build_engine(&config).context("Failed to initialize the learning path engine")?;
    info!(engine = ?engine, "Engine ready");

    let state = AppState::new(engine).with_search_top_k(cli.search_top_k);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
