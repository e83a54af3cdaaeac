//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the dispatch
//! server: configuration, error handling, the protocol envelope, the
//! dispatcher, the server instance, and the transport layer.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use config::Config;
pub use dispatch::{DispatchError, Dispatcher};
pub use error::{Error, Result};
pub use protocol::{ContentItem, Outcome, Request, RequestId, RequestKind, Response};
pub use server::McpServer;
pub use transport::TransportService;
