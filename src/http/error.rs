//! Failure taxonomy of a single request.

use std::fmt;
use std::io;

use crate::http::response::{ResponseHead, StatusCode};

/// Why a request did not end in a served file.
///
/// Every variant except `Transport` is answered with its status code,
/// provided no byte of a response has been written yet.
#[derive(Debug)]
pub enum ServeError {
    /// Malformed request line, or a request head over the size limit.
    ClientRequest,
    /// Directory request without an index document.
    Forbidden { path: String },
    /// The resolved file does not exist.
    NotFound { path: String, mime: &'static str },
    /// The file could not be opened, or the request could not be read.
    ServerIo {
        path: String,
        mime: Option<&'static str>,
        source: io::Error,
    },
    /// The connection failed while a response was going out.
    Transport(io::Error),
}

impl ServeError {
    /// Classifies a failure to read the request head.
    pub fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::InvalidData {
            ServeError::ClientRequest
        } else {
            ServeError::ServerIo {
                path: "-".to_string(),
                mime: None,
                source: err,
            }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServeError::ClientRequest => Some(StatusCode::BadRequest),
            ServeError::Forbidden { .. } => Some(StatusCode::Forbidden),
            ServeError::NotFound { .. } => Some(StatusCode::NotFound),
            ServeError::ServerIo { .. } => Some(StatusCode::ServerError),
            ServeError::Transport(_) => None,
        }
    }

    /// The header block answering this error, if it gets one.
    pub fn response_head(&self) -> Option<ResponseHead<'_>> {
        let head = match self {
            ServeError::ClientRequest => ResponseHead::new(StatusCode::BadRequest, "-"),
            ServeError::Forbidden { path } => ResponseHead::new(StatusCode::Forbidden, path),
            ServeError::NotFound { path, mime } => {
                ResponseHead::new(StatusCode::NotFound, path)
                    .mime(*mime)
                    .content_length(0)
            }
            ServeError::ServerIo { path, mime, .. } => {
                let head = ResponseHead::new(StatusCode::ServerError, path).content_length(0);
                match mime {
                    Some(mime) => head.mime(*mime),
                    None => head,
                }
            }
            ServeError::Transport(_) => return None,
        };
        Some(head)
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::ClientRequest => write!(f, "malformed request"),
            ServeError::Forbidden { path } => write!(f, "no index document for {path}"),
            ServeError::NotFound { path, .. } => write!(f, "{path} not found"),
            ServeError::ServerIo { path, source, .. } => {
                write!(f, "failed to serve {path}: {source}")
            }
            ServeError::Transport(e) => write!(f, "connection failed: {e}"),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServeError::ServerIo { source, .. } => Some(source),
            ServeError::Transport(e) => Some(e),
            _ => None,
        }
    }
}
