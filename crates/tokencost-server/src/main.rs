use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokencost_server::config::Config;
use tokencost_server::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "tokencost",
    about = "Token cost calculator and ranked LLM benchmark table with live provider pricing",
    version,
    after_help = "examples:\n  \
        tokencost                                 (serve ./models on 127.0.0.1:8000)\n  \
        tokencost --catalog /srv/llm-stats        (catalog lives elsewhere)\n  \
        tokencost --config tokencost.toml --bind 0.0.0.0:8000\n  \
        RUST_LOG=debug tokencost                  (log catalog and pricing details)"
)]
struct Cli {
    /// TOML config file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file.
    #[arg(long)]
    bind: Option<String>,

    /// Catalog root (the directory containing `models/`), overrides the config file.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        cfg.bind = bind;
    }
    if let Some(root) = cli.catalog {
        cfg.catalog_root = root;
    }

    let state = AppState::from_config(&cfg).context("building pricing client")?;
    let listener = tokio::net::TcpListener::bind(&cfg.bind)
        .await
        .with_context(|| format!("binding {}", cfg.bind))?;

    tracing::info!(
        addr = %cfg.bind,
        catalog = %cfg.catalog_root.display(),
        pricing = %cfg.pricing_url,
        "tokencost listening"
    );
    axum::serve(listener, app(state, &cfg)).await?;
    Ok(())
}
