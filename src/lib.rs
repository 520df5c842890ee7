//! yo-httpd - minimal HTTP/1.0 file server
//!
//! Serves `GET` requests for files below a root directory, one pooled
//! handler per connection.

pub mod config;
pub mod http;
pub mod server;
