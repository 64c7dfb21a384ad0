use thiserror::Error;

use crate::http::response::StatusCode;

/// Failures raised while reading, parsing or resolving a request.
///
/// Every variant is turned into exactly one HTTP response at the connection
/// boundary; see [`crate::http::response::Response::from_error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("invalid HTTP method")]
    InvalidMethod,

    #[error("invalid HTTP version")]
    InvalidVersion,

    #[error("request header section too large")]
    RequestTooLarge,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("not found")]
    NotFound,

    /// Anything unclassified. The message is for logs only and never sent
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::InvalidMethod | HttpError::InvalidVersion | HttpError::RequestTooLarge => {
                StatusCode::BadRequest
            }
            HttpError::NotFound => StatusCode::NotFound,
            HttpError::MethodNotAllowed => StatusCode::MethodNotAllowed,
            HttpError::Internal(_) => StatusCode::InternalServerError,
        }
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::Internal(err.to_string())
    }
}
