use std::path::Path;

use tracing_subscriber::EnvFilter;

use triton::config::Config;
use triton::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = match std::env::args_os().nth(1) {
        Some(path) => Config::from_file(Path::new(&path))?.with_env_overrides(),
        None => Config::load()?,
    };

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
