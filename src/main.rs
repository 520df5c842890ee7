use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::Level;
use yo_httpd::config::Config;
use yo_httpd::server::{ConnectionAcceptor, HandlerPool, TcpListenerFactory, TlsListenerFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cfg.log { Level::DEBUG } else { Level::INFO })
        .init();

    tracing::info!(
        port = cfg.port,
        log = cfg.log,
        index = %cfg.index,
        root = %cfg.root.display(),
        tls = cfg.tls.enabled,
        "configuration loaded"
    );

    let addr = cfg.listen_addr()?;
    let acceptor = ConnectionAcceptor::new(
        Arc::new(HandlerPool::new()),
        cfg.serve_options(),
        cfg.max_connections,
    );

    tokio::select! {
        res = run(&cfg, &acceptor, addr) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn run(cfg: &Config, acceptor: &ConnectionAcceptor, addr: SocketAddr) -> anyhow::Result<()> {
    if !cfg.tls.enabled {
        return acceptor.run(&TcpListenerFactory, addr).await;
    }

    let (Some(cert), Some(key)) = (&cfg.tls.cert_path, &cfg.tls.key_path) else {
        anyhow::bail!("TLS is enabled but cert_path and key_path are not both set");
    };
    let factory = TlsListenerFactory::from_pem_files(cert, key).context("failed to set up TLS")?;
    acceptor.run(&factory, addr).await
}
