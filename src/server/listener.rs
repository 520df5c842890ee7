use std::future::{Future, Ready, ready};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tracing::info;

use crate::server::handler::ServeOptions;
use crate::server::pool::HandlerPool;

/// A bound, listening socket.
///
/// Accepting yields a handshake future alongside the peer address. The
/// acceptor awaits it inside the connection's own task, so a slow TLS
/// handshake never stalls the accept loop.
pub trait Listener: Send + 'static {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;
    type Handshake: Future<Output = io::Result<Self::Stream>> + Send + 'static;

    fn accept_connection(
        &mut self,
    ) -> impl Future<Output = io::Result<(Self::Handshake, SocketAddr)>> + Send;

    fn local_addr(&self) -> io::Result<SocketAddr>;
}

/// Produces listeners. The acceptor only ever sees this seam.
pub trait ListenerFactory {
    type Listener: Listener;

    fn bind(&self, addr: SocketAddr) -> impl Future<Output = io::Result<Self::Listener>> + Send;
}

/// Plain TCP listeners.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpListenerFactory;

impl ListenerFactory for TcpListenerFactory {
    type Listener = TcpListener;

    async fn bind(&self, addr: SocketAddr) -> io::Result<TcpListener> {
        TcpListener::bind(addr).await
    }
}

impl Listener for TcpListener {
    type Stream = TcpStream;
    type Handshake = Ready<io::Result<TcpStream>>;

    async fn accept_connection(&mut self) -> io::Result<(Self::Handshake, SocketAddr)> {
        let (stream, peer) = TcpListener::accept(self).await?;
        Ok((ready(Ok(stream)), peer))
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        TcpListener::local_addr(self)
    }
}

/// Accept loop: one task per connection, each running a pooled handler.
pub struct ConnectionAcceptor {
    pool: Arc<HandlerPool>,
    options: Arc<ServeOptions>,
    limit: Option<Arc<Semaphore>>,
}

impl ConnectionAcceptor {
    /// `max_connections` caps concurrently served connections. When the cap
    /// is reached the acceptor stops accepting until a connection finishes.
    pub fn new(pool: Arc<HandlerPool>, options: ServeOptions, max_connections: Option<usize>) -> Self {
        Self {
            pool,
            options: Arc::new(options),
            limit: max_connections.map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    pub fn pool(&self) -> &Arc<HandlerPool> {
        &self.pool
    }

    /// Binds through `factory` and serves until accepting fails.
    pub async fn run<F>(&self, factory: &F, addr: SocketAddr) -> anyhow::Result<()>
    where
        F: ListenerFactory,
    {
        let listener = factory
            .bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!("Listening on {}", listener.local_addr()?);

        self.serve(listener).await
    }

    /// Accepts connections from `listener` until it fails.
    pub async fn serve<L>(&self, mut listener: L) -> anyhow::Result<()>
    where
        L: Listener,
    {
        loop {
            let permit = match &self.limit {
                Some(limit) => Some(Arc::clone(limit).acquire_owned().await?),
                None => None,
            };

            let (handshake, peer) = listener
                .accept_connection()
                .await
                .context("accept failed")?;
            tracing::debug!(%peer, "accepted connection");

            let handler = self.pool.acquire();
            let pool = Arc::clone(&self.pool);
            let options = Arc::clone(&self.options);

            tokio::spawn(async move {
                let _permit = permit;
                let handler = match handshake.await {
                    Ok(stream) => handler.bind(stream, peer).run(&options).await,
                    Err(e) => {
                        tracing::warn!(%peer, error = %e, "connection setup failed");
                        handler
                    }
                };
                pool.release(handler);
            });
        }
    }
}
