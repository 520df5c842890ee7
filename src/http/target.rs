//! Resolution of a request path to a file under the server root.

use std::path::{Path, PathBuf};

use crate::http::error::ServeError;
use crate::http::mime;
use crate::http::path::{escapes_root, translate};
use crate::http::response::StatusCode;

/// A file the request maps onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Where the file lives on disk.
    pub fs_path: PathBuf,
    /// The serving path: the `Location` for 302 responses, and what gets logged.
    pub served_path: String,
    /// 200 for direct serves, 302 for directory index serves.
    pub status: StatusCode,
    pub mime: &'static str,
}

/// Resolves the raw path token of a request against `root`.
///
/// A path ending in `/` is a directory request and is served through
/// `index`. Missing index documents are `Forbidden`, missing files are
/// `NotFound`. Paths that would leave `root` are treated as missing.
pub async fn resolve(raw: &str, root: &Path, index: &str) -> Result<ResolvedTarget, ServeError> {
    if raw.ends_with('/') {
        let served_path = format!("{raw}{index}");
        let relative = translate(&served_path);
        let fs_path = root.join(relative);

        if escapes_root(relative) || !exists(&fs_path).await {
            tracing::debug!(path = %fs_path.display(), "index document missing");
            return Err(ServeError::Forbidden { path: raw.to_string() });
        }

        let mime = mime::content_type(&served_path);
        return Ok(ResolvedTarget {
            fs_path,
            served_path,
            status: StatusCode::Found,
            mime,
        });
    }

    let relative = translate(raw);
    let mime = mime::content_type(relative);
    let fs_path = root.join(relative);

    if escapes_root(relative) || !exists(&fs_path).await {
        return Err(ServeError::NotFound {
            path: relative.to_string(),
            mime,
        });
    }

    Ok(ResolvedTarget {
        fs_path,
        served_path: relative.to_string(),
        status: StatusCode::Ok,
        mime,
    })
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
