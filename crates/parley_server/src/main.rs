use anyhow::Result;
use clap::Parser;
use parley_server::{
    AppState, InMemoryConversationStore, ParleyConfig, TrustedHeaderIdentity, create_router,
    init_logging,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parley chat backend provider router", long_about = None)]
struct Args {
    /// Extra configuration file, applied over ./parley.toml
    #[arg(short, long, env = "PARLEY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides server.bind
    #[arg(short, long)]
    bind: Option<String>,

    /// JSON file of conversations to serve from memory
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ParleyConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    init_logging(&config.server)?;

    for source in ParleyConfig::file_sources(args.config.as_deref()) {
        info!(
            path = %source.path.display(),
            present = source.exists(),
            "Configuration file"
        );
    }
    info!(env_overrides = ?ParleyConfig::env_overrides(), "Configuration loaded");

    let store = match &args.seed {
        Some(path) => InMemoryConversationStore::from_seed_file(path)?,
        None => InMemoryConversationStore::default(),
    };

    let state = AppState::from_config(&config, Arc::new(store), Arc::new(TrustedHeaderIdentity))?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(
        bind = %config.server.bind,
        upstream = %config.upstream.endpoint(),
        namespace = %config.mode.default_namespace,
        max_concurrency = config.fetch.max_concurrency,
        "Starting parley server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
