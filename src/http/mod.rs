//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 server engine that answers one
//! request per connection.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Parses the raw request bytes into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation, builder and error mapping
//! - **`headers`**: Ordered header table
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`error`**: Failures that end up as 4xx/5xx responses
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request head
//!        └──────┬──────┘
//!               │ Bytes received (none → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │    Parsing       │
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   Resolving      │ ← Map the target to a file
//!        └──────┬───────────┘
//!               │ File, or an error mapped to 400/404/405/500
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Send exactly one response
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use plainserve::config::ServerConfig;
//! use plainserve::http::connection::Connection;
//! use plainserve::static_files::{LocalFs, Resolver};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8000").await?;
//!     let resolver = Arc::new(Resolver::new("./www", LocalFs));
//!     let settings = Arc::new(ServerConfig::default());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let conn = Connection::new(socket, resolver.clone(), settings.clone());
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod error;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
