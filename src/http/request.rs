use std::collections::HashMap;

/// HTTP request methods.
///
/// Only `GET` is served. The others are recognized so that ignored requests
/// can be logged by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// # Example
    ///
    /// ```
    /// # use yo_httpd::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// A request the server will act on.
///
/// Headers are kept for diagnostics only; serving never looks at them.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    /// Always `GET` for a parsed request
    pub method: Method,
    /// The raw path token, e.g. `/sub/` or `/../../etc/passwd`
    pub path: String,
    /// Protocol version token, e.g. `HTTP/1.0`
    pub version: String,
    /// Header lines split on the first `:`
    pub headers: HashMap<String, String>,
}

impl ParsedRequest {
    /// Looks up a header value by exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
