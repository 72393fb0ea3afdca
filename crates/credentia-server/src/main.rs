//! # Credentia server entry point
//!
//! Binds the API router to a TCP listener. Document records live in
//! memory; certificate files are written to a filesystem blob store so
//! they survive a restart even though the records do not.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use credentia_api::AppState;
use credentia_store::{DocumentStore, FsBlobStore};

/// Credentia — certificate issuance and verification service.
#[derive(Parser, Debug)]
#[command(name = "credentia-server", version, about, long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Directory for stored certificate files.
    #[arg(long, default_value = "./blobs")]
    blob_root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    std::fs::create_dir_all(&cli.blob_root)?;
    let state = AppState::new(
        Arc::new(DocumentStore::new()),
        Arc::new(FsBlobStore::new(cli.blob_root)),
    );
    let app = credentia_api::app(state);

    tracing::info!("credentia-server listening on {}", cli.bind);
    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
