use bytes::Bytes;

use crate::http::error::HttpError;
use crate::http::headers::Headers;
use crate::http::mime::TEXT_MIME_TYPE;

/// HTTP status codes emitted by the server.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed request line, version or oversized head
/// - `NotFound` (404): Resolved path does not exist
/// - `MethodNotAllowed` (405): Anything other than GET
/// - `InternalServerError` (500): Unclassified failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use plainserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard reason phrase. Only logged; the status line on
    /// the wire carries the bare code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A response body together with its declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub mime_type: String,
    pub content: Bytes,
}

impl Body {
    pub fn new(mime_type: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Whenever `body` is present, `headers` carries `Content-Type` and
/// `Content-Length` derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Headers in insertion order
    pub headers: Headers,
    /// Optional typed body
    pub body: Option<Body>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use plainserve::http::response::{Body, ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Cache-Control", "no-cache")
///     .body(Body::new("application/json", &b"{}"[..]))
///     .build();
/// assert_eq!(response.headers.get("Content-Length"), Some("2"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    body: Option<Body>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: None,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }

    /// Copies every header of `headers`, in order.
    pub fn headers(mut self, headers: &Headers) -> Self {
        for (k, v) in headers.iter() {
            self.headers.set(k, v);
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the final Response.
    ///
    /// With a body, `Content-Type` and `Content-Length` are always written
    /// from the body and override any caller-supplied value, whatever its
    /// letter case.
    pub fn build(mut self) -> Response {
        if let Some(body) = &self.body {
            self.headers
                .set_ignore_case("Content-Type", body.mime_type.clone());
            self.headers
                .set_ignore_case("Content-Length", body.len().to_string());
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Functional form of [`ResponseBuilder`]: status, optional extra headers,
/// optional body.
pub fn build_response(status: StatusCode, headers: Option<&Headers>, body: Option<Body>) -> Response {
    let mut builder = ResponseBuilder::new(status);
    if let Some(headers) = headers {
        builder = builder.headers(headers);
    }
    if let Some(body) = body {
        builder = builder.body(body);
    }
    builder.build()
}

impl Response {
    /// Creates a 200 OK response carrying a file's bytes.
    pub fn ok(mime_type: impl Into<String>, content: impl Into<Bytes>) -> Self {
        build_response(StatusCode::Ok, None, Some(Body::new(mime_type, content)))
    }

    /// Creates a 400 Bad Request response with no body.
    pub fn bad_request() -> Self {
        build_response(StatusCode::BadRequest, None, None)
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        build_response(
            StatusCode::NotFound,
            None,
            Some(Body::new(TEXT_MIME_TYPE, &b"404 NOT FOUND"[..])),
        )
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        build_response(
            StatusCode::MethodNotAllowed,
            None,
            Some(Body::new(TEXT_MIME_TYPE, &b"405 Method Not Allowed"[..])),
        )
    }

    /// Creates a 500 Internal Server Error response with no body.
    pub fn internal_error() -> Self {
        build_response(StatusCode::InternalServerError, None, None)
    }

    /// Maps a pipeline failure to the single response sent for it.
    pub fn from_error(err: &HttpError) -> Self {
        match err.status() {
            StatusCode::BadRequest => Response::bad_request(),
            StatusCode::NotFound => Response::not_found(),
            StatusCode::MethodNotAllowed => Response::method_not_allowed(),
            _ => Response::internal_error(),
        }
    }
}
