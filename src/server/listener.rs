use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{Instrument, info};

use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;
use crate::static_files::fs::{FileSystem, LocalFs};
use crate::static_files::resolver::Resolver;

/// Pause after a failed accept, so running out of file descriptors does not
/// spin the loop.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Binds the configured address and serves the configured root forever.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let root = cfg.validate()?;

    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.listen_addr))?;
    info!("Listening on {}", cfg.server.listen_addr);
    info!(root = %root, "Serving directory");

    let resolver = Resolver::new(root, LocalFs);
    serve(listener, resolver, cfg.server.clone()).await
}

/// Accept loop over an already bound listener.
///
/// At most `max_connections` connections are in flight; once the cap is
/// reached the loop stops accepting until one of them finishes.
pub async fn serve<F: FileSystem>(
    listener: TcpListener,
    resolver: Resolver<F>,
    settings: ServerConfig,
) -> anyhow::Result<()> {
    let resolver = Arc::new(resolver);
    let limit = Arc::new(Semaphore::new(settings.max_connections));
    let settings = Arc::new(settings);

    loop {
        let permit = limit
            .clone()
            .acquire_owned()
            .await
            .context("Connection limiter closed")?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                drop(permit);
                back_off_after_accept_error(&e).await;
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let conn = Connection::new(socket, resolver.clone(), settings.clone());
        tokio::spawn(
            async move {
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
                drop(permit);
            }
            .instrument(tracing::info_span!("conn", %peer)),
        );
    }
}

async fn back_off_after_accept_error(e: &std::io::Error) {
    tracing::error!(error = %e, "Failed to accept connection");
    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
}
