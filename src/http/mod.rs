//! HTTP/1.0 protocol pieces.
//!
//! This module holds everything a handler needs to answer one `GET`
//! request. None of it knows about sockets or pools.
//!
//! # Architecture
//!
//! - **`parser`**: reads the request head and interprets the request line
//! - **`request`**: the parsed request and method tokens
//! - **`path`**: translation of a raw request path to a root-relative path
//! - **`mime`**: content type detection from file extensions
//! - **`target`**: resolution of a request path to a file, status and type
//! - **`response`**: status codes and the header block description
//! - **`writer`**: serializes and writes header blocks
//! - **`date`**: reusable `Date` header formatter
//! - **`transfer`**: streams file bytes to the connection
//! - **`error`**: per-request failure taxonomy
//!
//! # Request flow
//!
//! ```text
//!        ┌──────────────────┐
//!        │  read head       │ ← request line + headers, up to blank line
//!        └──────┬───────────┘
//!               │ GET <path> <version>
//!               ▼
//!        ┌──────────────────┐
//!        │  resolve target  │ ← translate, index document, mime
//!        └──────┬───────────┘
//!               │ file exists
//!               ▼
//!        ┌──────────────────┐
//!        │  write head      │ ← status line + headers in one write
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │  transfer body   │ ← loop until Content-Length bytes sent
//!        └──────────────────┘
//! ```
//!
//! Non-`GET` requests stop after the first step and get no response.
//! Failures before the head is written are answered with 400, 403, 404 or 500.

pub mod date;
pub mod error;
pub mod mime;
pub mod parser;
pub mod path;
pub mod request;
pub mod response;
pub mod target;
pub mod transfer;
pub mod writer;
