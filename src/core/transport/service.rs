//! The serve loop: couples a line transport to the dispatcher.
//!
//! The loop never blocks on a handler: each decoded request is dispatched
//! in its own task and the resulting responses are funneled back through a
//! channel, so completions may be written in any order relative to receipt.
//! Reading continues while earlier requests are still executing.
//!
//! Undecodable input is answered with a failure envelope when a correlation
//! id can still be recovered from the raw line; otherwise it is logged and
//! skipped. A transport read or write failure ends the loop.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::error::{TransportError, TransportResult};
use super::stdio::{LineTransport, stdio};
use crate::core::protocol::{Request, RequestId, Response};
use crate::core::server::McpServer;

/// Serves a single client connection over a duplex channel.
pub struct TransportService {
    server: McpServer,
}

impl TransportService {
    /// Create a service for the given server.
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }

    /// Serve over the process's stdin and stdout.
    pub async fn run_stdio(self) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");
        self.run(stdio()).await
    }

    /// Serve over an arbitrary duplex channel until EOF.
    ///
    /// Returns once the inbound side is exhausted and every in-flight
    /// request has been answered.
    pub async fn run<R, W>(self, transport: LineTransport<R, W>) -> TransportResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let (mut reader, mut writer) = transport.into_split();
        let (tx, mut rx) = mpsc::channel::<Response>(64);

        let read_loop = async {
            let tx = tx;
            while let Some(raw) = reader.read_line().await? {
                match serde_json::from_str::<Request>(&raw) {
                    Ok(request) => {
                        let dispatcher = self.server.dispatcher();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let response = dispatcher.dispatch(request).await;
                            // Fails only if the serve loop is gone.
                            let _ = tx.send(response).await;
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "Discarding undecodable request line");
                        if let Some(id) = recover_id(&raw) {
                            let response =
                                Response::failure(id, format!("Malformed request: {}", e));
                            // Fails only if the serve loop is gone.
                            let _ = tx.send(response).await;
                        }
                    }
                }
            }

            info!("Inbound channel closed, draining in-flight requests");
            // The loop's sender drops here; the outbound side finishes
            // once every spawned dispatch has delivered its response.
            Ok::<(), TransportError>(())
        };

        let write_loop = async {
            while let Some(response) = rx.recv().await {
                writer.write_line(&serde_json::to_string(&response)?).await?;
            }
            Ok::<(), TransportError>(())
        };

        let (read_result, write_result) = tokio::join!(read_loop, write_loop);
        read_result?;
        write_result
    }
}

/// Try to salvage a correlation id from a line that failed to decode.
fn recover_id(raw: &str) -> Option<RequestId> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    serde_json::from_value(value.get("id")?.clone()).ok()
}
