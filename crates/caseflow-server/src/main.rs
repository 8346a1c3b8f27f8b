use anyhow::Result;
use caseflow_server::config;
use caseflow_server::{app, state::AppState};
use caseflow_storage::CaseStore;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  caseflow-server [config.toml]    Start the server");
}

#[tokio::main]
async fn main() -> Result<()> {
    caseflow_common::id::init(1, 1);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("caseflow=info".parse()?))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        print_usage();
        anyhow::bail!("unexpected arguments");
    }

    let config = config::load(args.get(1).map(String::as_str))?;
    std::fs::create_dir_all(&config.data_dir)?;

    let store = CaseStore::new(&config.database_url).await?;
    let state = AppState::new(store, config.clone());
    let app = app::build_http_app(state);

    let addr: SocketAddr = ([0, 0, 0, 0], config.http_port).into();
    tracing::info!(%addr, "caseflow server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
