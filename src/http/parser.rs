use crate::http::error::HttpError;
use crate::http::headers::Headers;
use crate::http::request::{Method, Request};

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Parses one request out of the bytes read from a connection.
///
/// The input is split on `\n`. The first line must hold `METHOD TARGET
/// VERSION` separated by single spaces; header lines follow until a line
/// that is exactly `\r` (or empty, for bare-LF input), and everything after
/// that is the body.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, HttpError> {
    let data = String::from_utf8_lossy(buf);
    let mut lines = data.split('\n');

    // Request line
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split(' ');

    let method = parts
        .next()
        .and_then(Method::from_str)
        .ok_or(HttpError::InvalidMethod)?;
    let path = parts.next();
    let version = parts.next().ok_or(HttpError::InvalidVersion)?;
    let version = version.strip_suffix('\r').unwrap_or(version);

    if version != HTTP_VERSION {
        return Err(HttpError::InvalidVersion);
    }

    // A version token implies a target token before it
    let path = path.ok_or(HttpError::InvalidVersion)?;

    // Headers
    let mut headers = Headers::new();

    for line in lines.by_ref() {
        // "\r" ends a CRLF head, "" a bare-LF one
        if line == "\r" || line.is_empty() {
            break;
        }

        let line = line.strip_suffix('\r').unwrap_or(line);
        match line.split_once(": ") {
            Some((key, value)) => headers.set(key, value),
            None => {
                tracing::debug!(line = %line, "Skipping malformed header line");
            }
        }
    }

    // Body
    let body = lines.collect::<Vec<_>>().join("\n");

    Ok(Request {
        method,
        path: path.to_string(),
        headers,
        body,
    })
}

/// Position of the blank line separating the head from the body.
///
/// Accepts `\r\n\r\n` and the bare-LF form `\n\n`, whichever comes first.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n");
    let lf = buf.windows(2).position(|w| w == b"\n\n");

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn headers_end_position() {
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(14));
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\r\n"), None);
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\nHost: x\n\n"), Some(22));
        assert_eq!(find_headers_end(b"GET / HTTP/1.1\n\r\n"), None);
    }
}
