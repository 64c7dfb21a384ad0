//! Plainserve - Minimal static file server
//!
//! Core library for the HTTP/1.1 engine and static file resolution.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
