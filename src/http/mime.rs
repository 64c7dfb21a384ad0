//! MIME type detection based on file extensions.

/// Type used when an extension is missing or not in the table.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Literal type carried by the plain-text error bodies (404, 405).
pub const TEXT_MIME_TYPE: &str = "Text";

const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain"),
    ("xml", "application/xml"),
];

/// Looks up the MIME type for a lowercase or mixed-case extension (no dot).
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// Resolves the MIME type of a file path.
///
/// The extension is whatever follows the last `.` in the whole path. A path
/// with no `.` has no extension and gets [`UNKNOWN_MIME_TYPE`].
///
/// ```
/// # use plainserve::http::mime::mime_type_for;
/// assert_eq!(mime_type_for("/srv/www/index.HTML"), "text/html");
/// assert_eq!(mime_type_for("/srv/www/archive.tar.gz"), "application/octet-stream");
/// assert_eq!(mime_type_for("/srv/www/README"), "application/octet-stream");
/// ```
pub fn mime_type_for(path: &str) -> &'static str {
    path.rsplit_once('.')
        .and_then(|(_, ext)| mime_type_for_extension(ext))
        .unwrap_or(UNKNOWN_MIME_TYPE)
}
