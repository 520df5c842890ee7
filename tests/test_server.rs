//! End-to-end tests over real TCP connections.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use yo_httpd::server::{ConnectionAcceptor, HandlerPool, ListenerFactory, ServeOptions, TcpListenerFactory};

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("10k.dat"), vec![0u8; 10240]).unwrap();
    std::fs::write(dir.path().join("index.html"), "<p>root</p>").unwrap();
    dir
}

async fn start(root: &Path, max_connections: Option<usize>) -> (SocketAddr, Arc<HandlerPool>) {
    let pool = Arc::new(HandlerPool::new());
    let options = ServeOptions {
        root: root.to_path_buf(),
        ..ServeOptions::default()
    };
    let acceptor = ConnectionAcceptor::new(Arc::clone(&pool), options, max_connections);

    let listener = TcpListenerFactory
        .bind("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { acceptor.serve(listener).await });

    (addr, pool)
}

async fn fetch(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

async fn wait_idle(pool: &HandlerPool, idle: usize) {
    for _ in 0..200 {
        if pool.idle() == idle {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("pool never reached {idle} idle handlers (idle={})", pool.idle());
}

fn body_of(response: &[u8]) -> &[u8] {
    let end = response.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    &response[end + 4..]
}

#[tokio::test]
async fn test_serves_10k_file_over_tcp() {
    let dir = site();
    let (addr, _pool) = start(dir.path(), None).await;

    let response = fetch(addr, b"GET /10k.dat HTTP/1.0\r\n\r\n").await;
    let text = String::from_utf8_lossy(&response);

    assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(text.contains("Content-Length: 10240\r\n"));
    assert_eq!(body_of(&response), vec![0u8; 10240]);
}

#[tokio::test]
async fn test_root_directory_request() {
    let dir = site();
    let (addr, _pool) = start(dir.path(), None).await;

    let response = fetch(addr, b"GET / HTTP/1.0\r\n\r\n").await;
    let text = String::from_utf8_lossy(&response);

    assert!(text.starts_with("HTTP/1.0 302 Found\r\nLocation: /index.html\r\n"));
    assert_eq!(body_of(&response), b"<p>root</p>");
}

#[tokio::test]
async fn test_sequential_connections_reuse_one_handler() {
    let dir = site();
    let (addr, pool) = start(dir.path(), None).await;

    for _ in 0..5 {
        let response = fetch(addr, b"GET /10k.dat HTTP/1.0\r\n\r\n").await;
        assert!(response.starts_with(b"HTTP/1.0 200 OK\r\n"));
        wait_idle(&pool, 1).await;
    }

    assert_eq!(pool.created(), 1);
}

#[tokio::test]
async fn test_concurrent_connections_bound_handler_count() {
    const CLIENTS: usize = 16;
    let dir = site();
    let (addr, pool) = start(dir.path(), None).await;

    let clients: Vec<_> = (0..CLIENTS)
        .map(|_| tokio::spawn(async move { fetch(addr, b"GET /10k.dat HTTP/1.0\r\n\r\n").await }))
        .collect();
    for client in clients {
        let response = client.await.unwrap();
        assert_eq!(body_of(&response).len(), 10240);
    }

    let created = pool.created();
    assert!((1..=CLIENTS).contains(&created));
    wait_idle(&pool, created).await;
}

#[tokio::test]
async fn test_connection_cap_applies_backpressure() {
    let dir = site();
    let (addr, _pool) = start(dir.path(), Some(1)).await;

    // Holds the only slot: the request head is never finished.
    let mut first = TcpStream::connect(addr).await.unwrap();
    first.write_all(b"GET /10k.dat HTTP/1.0\r\n").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let second = tokio::spawn(async move { fetch(addr, b"GET /index.html HTTP/1.0\r\n\r\n").await });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!second.is_finished());

    first.write_all(b"\r\n").await.unwrap();
    let mut response = Vec::new();
    first.read_to_end(&mut response).await.unwrap();
    assert!(response.starts_with(b"HTTP/1.0 200 OK\r\n"));

    let response = tokio::time::timeout(Duration::from_secs(5), second)
        .await
        .expect("second connection was never served")
        .unwrap();
    assert_eq!(body_of(&response), b"<p>root</p>");
}

#[tokio::test]
async fn test_run_reports_bind_failure() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap();

    let acceptor = ConnectionAcceptor::new(Arc::new(HandlerPool::new()), ServeOptions::default(), None);
    let err = acceptor.run(&TcpListenerFactory, addr).await.unwrap_err();

    assert!(err.to_string().contains("failed to bind"));
}
