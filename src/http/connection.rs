use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::config::ServerConfig;
use crate::http::error::HttpError;
use crate::http::parser::{find_headers_end, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::static_files::fs::FileSystem;
use crate::static_files::resolver::Resolver;

/// Handles exactly one request on one client stream.
///
/// The stream is owned by the connection and shut down before [`run`]
/// returns, whatever happened before.
///
/// [`run`]: Connection::run
pub struct Connection<S, F> {
    stream: S,
    resolver: Arc<Resolver<F>>,
    settings: Arc<ServerConfig>,
    state: ConnectionState,
    request_line: Option<(Method, String)>,
}

pub enum ConnectionState {
    Reading,
    Parsing(Vec<u8>),
    Resolving(Request),
    Responding(Response),
    Closed,
}

impl<S, F> Connection<S, F>
where
    S: AsyncRead + AsyncWrite + Unpin,
    F: FileSystem,
{
    pub fn new(stream: S, resolver: Arc<Resolver<F>>, settings: Arc<ServerConfig>) -> Self {
        Self {
            stream,
            resolver,
            settings,
            state: ConnectionState::Reading,
            request_line: None,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(buf)) => ConnectionState::Parsing(buf),
                    Ok(None) => ConnectionState::Closed,
                    Err(e) => self.fail(e),
                },

                ConnectionState::Parsing(buf) => match parse_http_request(&buf) {
                    Ok(req) => {
                        self.request_line = Some((req.method, req.path.clone()));
                        ConnectionState::Resolving(req)
                    }
                    Err(e) => self.fail(e),
                },

                ConnectionState::Resolving(req) => match self.resolver.load(&req).await {
                    Ok((file, content)) => {
                        tracing::debug!(file = %file.path, mime = file.mime_type, "Resolved file");
                        ConnectionState::Responding(Response::ok(file.mime_type, content))
                    }
                    Err(e) => self.fail(e),
                },

                ConnectionState::Responding(response) => {
                    self.write_response(&response).await?;
                    self.log_response(&response);
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Reads until the head terminator, EOF, or the size limit.
    ///
    /// `Ok(None)` means there is nothing to answer: the peer sent no bytes
    /// or stalled past the read deadline.
    async fn read_request(&mut self) -> Result<Option<Vec<u8>>, HttpError> {
        let max = self.settings.max_request_size;
        let mut buffer = vec![0u8; max];
        let mut filled = 0;

        loop {
            let read = timeout(
                self.settings.read_timeout(),
                self.stream.read(&mut buffer[filled..]),
            )
            .await;

            let n = match read {
                Ok(n) => n?,
                Err(_) => {
                    tracing::warn!(received = filled, "Read deadline expired, closing");
                    return Ok(None);
                }
            };

            if n == 0 {
                if filled == 0 {
                    // Client closed connection
                    return Ok(None);
                }
                break;
            }

            filled += n;

            if find_headers_end(&buffer[..filled]).is_some() {
                break;
            }
            if filled == max {
                return Err(HttpError::RequestTooLarge);
            }
        }

        buffer.truncate(filled);
        Ok(Some(buffer))
    }

    fn fail(&self, err: HttpError) -> ConnectionState {
        match &err {
            HttpError::Internal(msg) => {
                tracing::warn!(error = %msg, "Request failed");
            }
            other => {
                tracing::debug!(error = %other, "Request rejected");
            }
        }

        ConnectionState::Responding(Response::from_error(&err))
    }

    async fn write_response(&mut self, response: &Response) -> anyhow::Result<()> {
        let writer = ResponseWriter::new(response, &self.settings.server_name);

        timeout(
            self.settings.write_timeout(),
            writer.write_to_stream(&mut self.stream),
        )
        .await
        .context("Write deadline expired")?
        .context("Failed to write response")
    }

    fn log_response(&self, response: &Response) {
        let status = response.status.as_u16();
        let reason = response.status.reason_phrase();
        match &self.request_line {
            Some((method, path)) => {
                tracing::info!(%method, path = %path, status, reason, "Served request");
            }
            None => {
                tracing::info!(status, reason, "Rejected unparsable request");
            }
        }
    }
}
