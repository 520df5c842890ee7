use std::fmt::Write;

use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::date::DateFormatter;
use crate::http::response::{ResponseHead, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.0";

/// Serializes the status line and header block of `head` into `buf`,
/// replacing whatever `buf` held before.
pub fn serialize_head(buf: &mut BytesMut, head: &ResponseHead<'_>, server: &str, date: &str) {
    buf.clear();

    // Status line
    let _ = write!(
        buf,
        "{} {} {}\r\n",
        HTTP_VERSION,
        head.status.as_u16(),
        head.status.reason_phrase()
    );
    if head.status == StatusCode::Found {
        let _ = write!(buf, "Location: {}\r\n", head.path);
    }

    if let Some(len) = head.content_length {
        let _ = write!(buf, "Content-Length: {len}\r\n");
    }
    if let Some(mime) = head.mime {
        let _ = write!(buf, "Content-Type: {mime}\r\n");
    }
    buf.extend_from_slice(b"Cache-Control: private, max-age=0\r\n");
    buf.extend_from_slice(b"Expires: -1\r\n");
    let _ = write!(buf, "Server: {server}\r\nDate: {date}\r\n");

    // Header/body separator
    buf.extend_from_slice(b"\r\n");
}

/// Writes response header blocks for one handler.
///
/// Owns the header buffer and date formatter so both survive across the
/// requests a pooled handler serves.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: BytesMut,
    dates: DateFormatter,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(512),
            dates: DateFormatter::new(),
        }
    }

    /// Builds the header block for `head` and writes it to `out` in one piece.
    ///
    /// With `log_responses` set every response is logged at info, otherwise
    /// at debug.
    pub async fn write_head<W>(
        &mut self,
        out: &mut W,
        head: &ResponseHead<'_>,
        server: &str,
        log_responses: bool,
    ) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let date = self.dates.now();
        serialize_head(&mut self.buffer, head, server, date);

        out.write_all(&self.buffer).await?;
        out.flush().await?;

        let status = head.status.as_u16();
        let text = String::from_utf8_lossy(&self.buffer);
        if log_responses {
            tracing::info!(date, status, path = head.path, "response\n{}", text);
        } else {
            tracing::debug!(date, status, path = head.path, "response\n{}", text);
        }

        Ok(())
    }

    /// The last header block written, for diagnostics and tests.
    pub fn last_head(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}
