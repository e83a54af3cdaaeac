//! Agent MCP Server Library
//!
//! This crate provides a tool/resource dispatch server: named,
//! schema-validated callable operations ("tools") and URI-templated data
//! sources ("resources") exposed to a single client over a message-oriented
//! transport.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Infrastructure - configuration, errors, the protocol
//!   envelope, the dispatcher, and the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: parameter contracts, validation, tool registry, and the
//!     built-in tools (add, getDiceRoll, askMastra)
//!   - **resources**: URI templates, resource registry, and the greeting
//!     resource
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     TransportService::new(server).run_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Request, Response, Result};
