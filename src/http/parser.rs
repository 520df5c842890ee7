use std::collections::HashMap;
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::request::{Method, ParsedRequest};

/// Upper bound on the request line plus headers.
pub const MAX_HEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The request line does not start with `GET` (this includes an empty
    /// request). Such requests get no response at all.
    Unsupported(Option<Method>),
    /// A `GET` request line with fewer than three space-separated tokens.
    Malformed,
}

/// Raw lines of a request head, before interpretation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub request_line: String,
    pub header_lines: Vec<String>,
}

/// Reads lines up to the first blank line or end of stream.
///
/// The first line is the request line; the rest are header lines. Line
/// terminators are removed and invalid UTF-8 is replaced. A head larger than
/// [`MAX_HEAD_BYTES`] fails with [`io::ErrorKind::InvalidData`].
pub async fn read_request_head<R>(reader: &mut R) -> io::Result<RequestHead>
where
    R: AsyncBufRead + Unpin,
{
    let mut head = RequestHead::default();
    let mut first = true;
    let mut line = Vec::with_capacity(256);
    let mut total = 0;

    loop {
        line.clear();
        let remaining = (MAX_HEAD_BYTES - total) as u64;
        let n = (&mut *reader).take(remaining).read_until(b'\n', &mut line).await?;
        total += n;

        if !line.ends_with(b"\n") && total >= MAX_HEAD_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "request head too large",
            ));
        }
        if n == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end_matches(['\r', '\n']);
        if text.trim().is_empty() {
            break;
        }

        if first {
            head.request_line = text.to_string();
            first = false;
        } else {
            head.header_lines.push(text.to_string());
        }
    }

    Ok(head)
}

/// Interprets a request head.
///
/// The request line is split on single spaces. Only a `GET` line with at
/// least method, path and version is accepted.
pub fn parse_request(head: &RequestHead) -> Result<ParsedRequest, ParseError> {
    let parts: Vec<&str> = head.request_line.split(' ').collect();

    let method = Method::from_str(parts[0]);
    if method != Some(Method::GET) {
        return Err(ParseError::Unsupported(method));
    }
    if parts.len() < 3 {
        return Err(ParseError::Malformed);
    }

    Ok(ParsedRequest {
        method: Method::GET,
        path: parts[1].to_string(),
        version: parts[2].to_string(),
        headers: parse_headers(&head.header_lines),
    })
}

fn parse_headers(lines: &[String]) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in lines {
        let (key, value) = line.split_once(':').unwrap_or((line.as_str(), ""));
        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    headers
}
