//! TLS listeners backed by rustls.
//!
//! Certificates and keys are read from PEM. The handshake runs as the
//! listener's handshake future, inside the connection task.

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use rustls::ServerConfig;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tokio_rustls::server::TlsStream;

use crate::server::listener::{Listener, ListenerFactory};

/// Factory for TLS-wrapped TCP listeners.
#[derive(Clone)]
pub struct TlsListenerFactory {
    acceptor: TlsAcceptor,
}

impl TlsListenerFactory {
    /// Loads a PEM certificate chain and a PEM private key from disk.
    pub fn from_pem_files(cert_path: &Path, key_path: &Path) -> Result<Self> {
        let cert_pem = std::fs::read(cert_path)
            .with_context(|| format!("failed to read certificate {}", cert_path.display()))?;
        let key_pem = std::fs::read(key_path)
            .with_context(|| format!("failed to read private key {}", key_path.display()))?;

        Self::from_pem(&cert_pem, &key_pem)
    }

    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> Result<Self> {
        let certs = rustls_pemfile::certs(&mut &cert_pem[..])
            .collect::<Result<Vec<_>, _>>()
            .context("invalid certificate PEM")?;
        if certs.is_empty() {
            bail!("no certificate found in PEM input");
        }

        let key = rustls_pemfile::private_key(&mut &key_pem[..])
            .context("invalid private key PEM")?
            .context("no private key found in PEM input")?;

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let config = ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .context("unsupported TLS protocol versions")?
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .context("certificate and key do not form a valid identity")?;

        Ok(Self {
            acceptor: TlsAcceptor::from(Arc::new(config)),
        })
    }
}

impl ListenerFactory for TlsListenerFactory {
    type Listener = TlsListener;

    async fn bind(&self, addr: SocketAddr) -> io::Result<TlsListener> {
        Ok(TlsListener {
            inner: TcpListener::bind(addr).await?,
            acceptor: self.acceptor.clone(),
        })
    }
}

pub struct TlsListener {
    inner: TcpListener,
    acceptor: TlsAcceptor,
}

impl Listener for TlsListener {
    type Stream = TlsStream<TcpStream>;
    type Handshake = tokio_rustls::Accept<TcpStream>;

    async fn accept_connection(&mut self) -> io::Result<(Self::Handshake, SocketAddr)> {
        let (stream, peer) = self.inner.accept().await?;
        Ok((self.acceptor.accept(stream), peer))
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}
