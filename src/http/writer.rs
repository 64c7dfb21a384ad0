use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::parser::HTTP_VERSION;
use crate::http::response::Response;

/// Identifier sent in the `Server` header when none is configured.
pub const DEFAULT_SERVER_NAME: &str = "PLAINSERVE";

/// Serializes the status line and header section, blank line included.
///
/// The status line carries no reason phrase. User headers come first in
/// insertion order, followed by exactly one `Server` header.
pub fn serialize_head(resp: &Response, server_name: &str) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!("{} {}\r\n", HTTP_VERSION, resp.status.as_u16());
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in resp.headers.iter() {
        if k.eq_ignore_ascii_case("Server") {
            continue;
        }
        write_header(&mut buf, k, v);
    }
    write_header(&mut buf, "Server", server_name);

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

fn write_header(buf: &mut Vec<u8>, key: &str, value: &str) {
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

/// Full wire form of a response: head followed by the raw body bytes.
pub fn serialize_response(resp: &Response, server_name: &str) -> Vec<u8> {
    let mut buf = serialize_head(resp, server_name);
    if let Some(body) = &resp.body {
        buf.extend_from_slice(&body.content);
    }
    buf
}

/// Writes one response, tolerating short writes.
pub struct ResponseWriter<'a> {
    head: Vec<u8>,
    response: &'a Response,
}

impl<'a> ResponseWriter<'a> {
    pub fn new(response: &'a Response, server_name: &str) -> Self {
        Self {
            head: serialize_head(response, server_name),
            response,
        }
    }

    pub async fn write_to_stream<W>(&self, stream: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        write_fully(stream, &self.head).await?;

        if let Some(body) = &self.response.body {
            write_fully(stream, &body.content).await?;
        }

        stream.flush().await
    }
}

/// Keeps writing the unsent remainder until every byte is accepted.
pub async fn write_fully<W>(stream: &mut W, buf: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;

    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "connection closed while writing",
            ));
        }

        written += n;
    }

    Ok(())
}
