use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::error::ServeError;
use crate::http::parser::{ParseError, parse_request, read_request_head};
use crate::http::response::ResponseHead;
use crate::http::target::resolve;
use crate::http::transfer::{self, FileSource};
use crate::http::writer::ResponseWriter;

/// Size of the scratch buffer each handler stages file bytes through.
pub const TRANSFER_BUFFER_SIZE: usize = 8192;

/// Settings every handler serves with.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Directory request paths are resolved against
    pub root: PathBuf,
    /// Document served for paths ending in `/`
    pub index: String,
    /// Value of the `Server` header
    pub server_name: String,
    /// Log every response at info instead of debug
    pub log_responses: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: "index.html".to_string(),
            server_name: "yo".to_string(),
            log_responses: false,
        }
    }
}

/// Reusable per-connection worker.
///
/// An idle handler owns its transfer buffer and response writer and nothing
/// else. [`Handler::bind`] attaches it to one connection; running the bound
/// handler answers a single request, closes the connection and hands the
/// idle handler back.
pub struct Handler {
    buf: Box<[u8]>,
    writer: ResponseWriter,
    served: u64,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; TRANSFER_BUFFER_SIZE].into_boxed_slice(),
            writer: ResponseWriter::new(),
            served: 0,
        }
    }

    /// Number of connections this handler has completed.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Attaches the handler to `stream`.
    pub fn bind<S>(self, stream: S, peer: SocketAddr) -> BoundHandler<S>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        BoundHandler {
            handler: self,
            conn: BufReader::new(stream),
            peer,
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

/// A handler holding a connection it has not served yet.
pub struct BoundHandler<S> {
    handler: Handler,
    conn: BufReader<S>,
    peer: SocketAddr,
}

impl<S> BoundHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Serves one request and closes the connection.
    ///
    /// Never fails: errors are answered where possible and logged. The
    /// returned handler is unbound and ready for the pool.
    pub async fn run(mut self, options: &ServeOptions) -> Handler {
        if let Err(err) = self.serve(options).await {
            self.fail(err, options).await;
        }
        self.unbind().await
    }

    async fn serve(&mut self, options: &ServeOptions) -> Result<(), ServeError> {
        let head = read_request_head(&mut self.conn)
            .await
            .map_err(ServeError::from_read)?;
        tracing::debug!(peer = %self.peer, request = %head.request_line, headers = head.header_lines.len(), "got request");

        let request = match parse_request(&head) {
            Ok(request) => request,
            Err(ParseError::Unsupported(method)) => {
                tracing::debug!(peer = %self.peer, ?method, "ignoring request");
                return Ok(());
            }
            Err(ParseError::Malformed) => {
                tracing::warn!(peer = %self.peer, request = %head.request_line, "malformed request line");
                return Err(ServeError::ClientRequest);
            }
        };

        self.send_file(&request.path, options).await
    }

    async fn send_file(&mut self, raw: &str, options: &ServeOptions) -> Result<(), ServeError> {
        let target = resolve(raw, &options.root, &options.index).await?;
        tracing::debug!(
            peer = %self.peer,
            path = %target.served_path,
            mime = target.mime,
            "sending file"
        );

        let mut source = FileSource::open(&target.fs_path)
            .await
            .map_err(|source| ServeError::ServerIo {
                path: target.served_path.clone(),
                mime: Some(target.mime),
                source,
            })?;
        let len = source.len();

        let head = ResponseHead::new(target.status, &target.served_path)
            .mime(target.mime)
            .content_length(len);
        self.handler
            .writer
            .write_head(&mut self.conn, &head, &options.server_name, options.log_responses)
            .await
            .map_err(ServeError::Transport)?;

        let sent = transfer::send_file(&mut source, len, &mut self.handler.buf, &mut self.conn)
            .await
            .map_err(ServeError::Transport)?;
        tracing::debug!(peer = %self.peer, path = %target.served_path, bytes = sent, "file sent");

        Ok(())
    }

    async fn fail(&mut self, err: ServeError, options: &ServeOptions) {
        let Some(head) = err.response_head() else {
            tracing::warn!(peer = %self.peer, error = %err, "connection dropped mid-response");
            return;
        };

        let server_side = matches!(err, ServeError::ServerIo { .. });
        if server_side {
            tracing::warn!(peer = %self.peer, error = %err, "connection service failed");
        }

        let sent = self
            .handler
            .writer
            .write_head(&mut self.conn, &head, &options.server_name, options.log_responses)
            .await;
        if let Err(e) = sent {
            if server_side {
                tracing::error!(peer = %self.peer, error = %e, "response 500 to client failed");
            } else {
                tracing::warn!(peer = %self.peer, status = head.status.as_u16(), error = %e, "error response failed");
            }
        }
    }

    async fn unbind(self) -> Handler {
        let BoundHandler {
            mut handler,
            mut conn,
            peer,
        } = self;

        if let Err(e) = conn.shutdown().await {
            tracing::debug!(%peer, error = %e, "connection close failed");
        }
        drop(conn);

        handler.served += 1;
        handler
    }
}
