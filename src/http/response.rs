/// HTTP status codes the server produces.
///
/// - `Ok` (200): file served
/// - `Found` (302): directory request served through its index document
/// - `BadRequest` (400): malformed request line
/// - `Forbidden` (403): directory request without an index document
/// - `NotFound` (404): resolved file does not exist
/// - `ServerError` (500): file could not be opened, or the request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 Found
    Found,
    /// 400 Client error
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 File not found
    NotFound,
    /// 500 Server error
    ServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use yo_httpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::ServerError => 500,
        }
    }

    /// Maps a numeric code back onto the fixed table. Anything unrecognized
    /// becomes `ServerError`.
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            302 => StatusCode::Found,
            400 => StatusCode::BadRequest,
            403 => StatusCode::Forbidden,
            404 => StatusCode::NotFound,
            _ => StatusCode::ServerError,
        }
    }

    /// Returns the reason phrase written on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use yo_httpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "File not found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Client error",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "File not found",
            StatusCode::ServerError => "Server error",
        }
    }
}

/// Everything needed to emit one response header block.
///
/// `path` is the serving path: it becomes the `Location` header for 302
/// responses and is otherwise only used for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead<'a> {
    pub status: StatusCode,
    pub path: &'a str,
    pub mime: Option<&'a str>,
    pub content_length: Option<u64>,
}

impl<'a> ResponseHead<'a> {
    /// Starts a header block with no `Content-Type` and no `Content-Length`.
    pub fn new(status: StatusCode, path: &'a str) -> Self {
        Self {
            status,
            path,
            mime: None,
            content_length: None,
        }
    }

    pub fn mime(mut self, mime: &'a str) -> Self {
        self.mime = Some(mime);
        self
    }

    pub fn content_length(mut self, len: u64) -> Self {
        self.content_length = Some(len);
        self
    }
}
