//! Transport layer for the MCP server.
//!
//! Each transport is behind a cargo feature:
//! - `stdio` (default): standard input/output, one client per process
//! - `tcp`: line-delimited JSON-RPC over raw TCP, one session per connection
//! - `http`: JSON-RPC over HTTP POST via axum, with optional CORS
//!
//! The transport owns the connection lifecycle and hands every message to
//! the shared [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::{DEFAULT_TCP_PORT, TcpConfig};

#[cfg(feature = "http")]
pub use config::{DEFAULT_HTTP_PORT, HttpConfig};
