use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tempfile::TempDir;
use tokio::io::AsyncWrite;
use yo_httpd::http::transfer::{FileSource, send_file};

/// Accepts at most `limit` bytes per write call.
struct Trickle {
    limit: usize,
    calls: usize,
    data: Vec<u8>,
}

impl Trickle {
    fn new(limit: usize) -> Self {
        Self { limit, calls: 0, data: Vec::new() }
    }
}

impl AsyncWrite for Trickle {
    fn poll_write(mut self: Pin<&mut Self>, _: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        let n = buf.len().min(self.limit);
        self.calls += 1;
        self.data.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn fixture(contents: &[u8]) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.dat");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

#[tokio::test]
async fn test_send_file_copies_every_byte() {
    let contents = pattern(10 * 1024);
    let (_dir, path) = fixture(&contents);

    let mut source = FileSource::open(&path).await.unwrap();
    let len = source.len();
    assert_eq!(len, 10240);

    let mut buf = [0u8; 1024];
    let mut out = Vec::new();
    let sent = send_file(&mut source, len, &mut buf, &mut out).await.unwrap();

    assert_eq!(sent, 10240);
    assert_eq!(out, contents);
}

#[tokio::test]
async fn test_short_writes_resume_from_offset() {
    let contents = pattern(5000);
    let (_dir, path) = fixture(&contents);

    let mut source = FileSource::open(&path).await.unwrap();
    let mut buf = [0u8; 512];
    let mut out = Trickle::new(7);
    let sent = send_file(&mut source, 5000, &mut buf, &mut out).await.unwrap();

    assert_eq!(sent, 5000);
    assert_eq!(out.data, contents);
    assert_eq!(out.calls, 5000usize.div_ceil(7));
}

#[tokio::test]
async fn test_transfer_to_reports_partial_count() {
    let contents = pattern(100);
    let (_dir, path) = fixture(&contents);

    let mut source = FileSource::open(&path).await.unwrap();
    let mut buf = [0u8; 64];
    let mut out = Trickle::new(10);

    let n = source.transfer_to(40, 60, &mut buf, &mut out).await.unwrap();
    assert_eq!(n, 10);
    assert_eq!(out.data, &contents[40..50]);

    let n = source.transfer_to(50, 50, &mut buf, &mut out).await.unwrap();
    assert_eq!(n, 10);
    assert_eq!(out.data, &contents[40..60]);
}

#[tokio::test]
async fn test_transfer_to_zero_count_is_noop() {
    let (_dir, path) = fixture(b"abc");
    let mut source = FileSource::open(&path).await.unwrap();
    let mut buf = [0u8; 16];
    let mut out = Vec::new();

    assert_eq!(source.transfer_to(0, 0, &mut buf, &mut out).await.unwrap(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_empty_file_sends_nothing() {
    let (_dir, path) = fixture(b"");
    let mut source = FileSource::open(&path).await.unwrap();
    assert!(source.is_empty());

    let mut buf = [0u8; 16];
    let mut out = Vec::new();
    assert_eq!(send_file(&mut source, 0, &mut buf, &mut out).await.unwrap(), 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_file_shrinking_mid_transfer_is_an_error() {
    let (_dir, path) = fixture(&pattern(100));
    let mut source = FileSource::open(&path).await.unwrap();

    let mut buf = [0u8; 16];
    let mut out = Vec::new();
    let err = send_file(&mut source, 200, &mut buf, &mut out).await.unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(out.len(), 100);
}

#[tokio::test]
async fn test_open_rejects_directories_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();

    assert!(FileSource::open(dir.path()).await.is_err());
    assert!(FileSource::open(&dir.path().join("nope")).await.is_err());
}
