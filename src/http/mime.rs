//! MIME type detection
//!
//! Maps the final extension of a served filename to the `Content-Type`
//! value sent with it.

/// Content type used when the extension is unknown or missing.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet";

/// Returns the content type for `filename`, based on the text after its last `.`.
///
/// Matching is exact and case-sensitive against the whole extension.
///
/// # Example
///
/// ```
/// # use yo_httpd::http::mime::content_type;
/// assert_eq!(content_type("index.html"), "text/html; charset=UTF-8");
/// assert_eq!(content_type("logo.png"), "image/png");
/// assert_eq!(content_type("README"), "application/octet");
/// ```
pub fn content_type(filename: &str) -> &'static str {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return DEFAULT_CONTENT_TYPE;
    };

    match extension {
        // Images
        "png" => "image/png",
        "jpg" => "image/jpg",
        "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/ico",

        // Text
        "html" => "text/html; charset=UTF-8",
        "xml" => "text/xml; charset=UTF-8",
        "txt" => "text/txt; charset=UTF-8",
        "css" => "text/css; charset=UTF-8",

        // Scripts
        "js" | "mjs" => "text/javascript; charset=UTF-8",
        "json" => "application/json; charset=UTF-8",
        "wasm" => "application/wasm",

        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_types() {
        assert_eq!(content_type("a.png"), "image/png");
        assert_eq!(content_type("a.jpg"), "image/jpg");
        assert_eq!(content_type("a.jpeg"), "image/jpeg");
        assert_eq!(content_type("a.gif"), "image/gif");
        assert_eq!(content_type("favicon.ico"), "image/ico");
    }

    #[test]
    fn test_text_types_carry_charset() {
        assert_eq!(content_type("a.html"), "text/html; charset=UTF-8");
        assert_eq!(content_type("a.xml"), "text/xml; charset=UTF-8");
        assert_eq!(content_type("notes.txt"), "text/txt; charset=UTF-8");
        assert_eq!(content_type("site.css"), "text/css; charset=UTF-8");
    }

    #[test]
    fn test_script_types() {
        assert_eq!(content_type("app.js"), "text/javascript; charset=UTF-8");
        assert_eq!(content_type("mod.mjs"), "text/javascript; charset=UTF-8");
        assert_eq!(content_type("data.json"), "application/json; charset=UTF-8");
        assert_eq!(content_type("main.wasm"), "application/wasm");
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(content_type("archive.tar.gz"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type("page.html.bak"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type("sub/page.min.js"), "text/javascript; charset=UTF-8");
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(content_type("10k.dat"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type("Makefile"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type("trailing."), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type("dir.d/file"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(content_type("LOGO.PNG"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type("Index.Html"), DEFAULT_CONTENT_TYPE);
    }
}
