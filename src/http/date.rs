//! `Date` header rendering.

use std::fmt::Write;

use chrono::{DateTime, Utc};

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Reusable RFC 1123 date formatter.
///
/// Each handler owns one. The rendered string is kept and only rebuilt when
/// the second changes, so back-to-back responses reuse the same allocation.
#[derive(Debug)]
pub struct DateFormatter {
    second: i64,
    rendered: String,
}

impl DateFormatter {
    pub fn new() -> Self {
        Self {
            second: i64::MIN,
            rendered: String::with_capacity(29),
        }
    }

    /// Formats the current time.
    pub fn now(&mut self) -> &str {
        self.format(Utc::now())
    }

    /// Formats `at` as e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
    pub fn format(&mut self, at: DateTime<Utc>) -> &str {
        let second = at.timestamp();
        if second != self.second {
            self.rendered.clear();
            let _ = write!(self.rendered, "{}", at.format(HTTP_DATE_FORMAT));
            self.second = second;
        }
        &self.rendered
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new()
    }
}
