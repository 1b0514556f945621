use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::static_files::StaticFiles;

/// Pause after a failed accept before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!(
        "Listening on {}, serving {}",
        listener.local_addr()?,
        cfg.static_files.doc_root.display()
    );

    serve(
        listener,
        StaticFiles::from_config(&cfg.static_files),
        cfg.server.read_timeout(),
    )
    .await
}

/// Accepts connections forever, one task per connection.
pub async fn serve(
    listener: TcpListener,
    files: StaticFiles,
    read_timeout: Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let files = files.clone();
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                let conn = Connection::new(socket, files).with_read_timeout(read_timeout);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}
