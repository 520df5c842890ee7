//! Request path translation.
//!
//! Turns the raw path token of a request line into a path relative to the
//! server root.

use std::path::{Component, Path};

/// Strips one leading `/` and then every leading `../` from `raw`.
///
/// Only a leading run of parent segments is removed; see [`escapes_root`]
/// for the check applied to what is left.
///
/// ```
/// # use yo_httpd::http::path::translate;
/// assert_eq!(translate("/index.html"), "index.html");
/// assert_eq!(translate("../../etc/passwd"), "etc/passwd");
/// ```
pub fn translate(raw: &str) -> &str {
    let mut path = raw.strip_prefix('/').unwrap_or(raw);
    while let Some(rest) = path.strip_prefix("../") {
        path = rest;
    }
    path
}

/// True if joining `relative` onto a root could leave that root.
///
/// Catches what [`translate`] leaves behind: parent segments after the first
/// component (`a/../../etc`), absolute paths (`//etc`) and a bare `..`.
pub fn escapes_root(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}
