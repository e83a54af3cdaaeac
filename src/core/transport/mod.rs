//! Transport layer for the dispatch server.
//!
//! The transport delivers decoded requests to the dispatcher and carries
//! its responses back; responses may be sent in any order relative to
//! receipt. Framing is line-delimited JSON over an arbitrary duplex
//! channel - stdin/stdout in production, in-memory pipes in tests.

mod error;
mod service;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use service::TransportService;
pub use stdio::{LineReader, LineTransport, LineWriter};
