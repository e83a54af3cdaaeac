//! The request/response state machine at the heart of the server.
//!
//! Each request moves through lookup, validation, and handler execution
//! before completing with exactly one response carrying its correlation id.
//! Lookup and validation failures are detected before any handler runs, so
//! handlers never see invalid input. A request is attempted exactly once;
//! retry policy belongs to the calling client.
//!
//! Multiple dispatches may be in flight concurrently. The only mutable
//! state is the pending-id table, which enforces the at-most-one-response
//! invariant: a request reusing an id that is still in flight is rejected,
//! and the id becomes reusable once its response has been produced.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::protocol::{ContentItem, Request, RequestId, RequestKind, Response};
use crate::domains::resources::{ResourceError, ResourceRegistry};
use crate::domains::tools::{ErrorPolicy, SchemaError, ToolError, ToolRegistry, validate};

/// A protocol-level rejection: the call did not execute (or, for
/// [`DispatchError::ToolFailed`], failed in a way its registration chose to
/// propagate).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No tool registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// No resource template matched this URI.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// The argument bag violated the tool's parameter contract.
    #[error("Invalid arguments for tool '{tool}': {source}")]
    InvalidArguments {
        /// The tool whose contract was violated.
        tool: String,
        /// The first violation found.
        #[source]
        source: SchemaError,
    },

    /// A handler failure registered with `ErrorPolicy::Propagate`.
    #[error("Tool '{tool}' failed: {source}")]
    ToolFailed {
        /// The failing tool.
        tool: String,
        /// The handler-level error.
        #[source]
        source: ToolError,
    },

    /// A resource handler failed after its template matched.
    #[error("Resource read failed for '{uri}': {source}")]
    ResourceFailed {
        /// The resolved URI.
        uri: String,
        /// The handler-level error.
        #[source]
        source: ResourceError,
    },

    /// The request id is already in flight.
    #[error("Duplicate request id: {0}")]
    DuplicateRequest(RequestId),
}

/// Resolves requests against the registries and produces correlated
/// responses.
#[derive(Debug)]
pub struct Dispatcher {
    tools: Arc<ToolRegistry>,
    resources: Arc<ResourceRegistry>,
    strict_arguments: bool,
    in_flight: Mutex<HashSet<RequestId>>,
}

impl Dispatcher {
    /// Create a dispatcher over read-only shared registries.
    pub fn new(
        tools: Arc<ToolRegistry>,
        resources: Arc<ResourceRegistry>,
        strict_arguments: bool,
    ) -> Self {
        Self {
            tools,
            resources,
            strict_arguments,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Dispatch one request to completion.
    ///
    /// Always returns a response carrying the request's id; protocol-level
    /// rejections become failure outcomes rather than errors.
    pub async fn dispatch(&self, request: Request) -> Response {
        let id = request.id.clone();

        if !self.begin(&id) {
            warn!(%id, "Rejecting request with in-flight id");
            return Response::failure(id.clone(), DispatchError::DuplicateRequest(id));
        }

        let outcome = self.run(&request).await;
        self.finish(&id);

        match outcome {
            Ok(content) => Response::success(id, content),
            Err(e) => {
                warn!(%id, error = %e, "Request rejected");
                Response::failure(id, e)
            }
        }
    }

    async fn run(&self, request: &Request) -> Result<Vec<ContentItem>, DispatchError> {
        match request.kind {
            RequestKind::ToolCall => self.call_tool(&request.target, &request.arguments).await,
            RequestKind::ResourceRead => self.read_resource(&request.target).await,
        }
    }

    /// Tool-call path: lookup, validate, execute, resolve error policy.
    async fn call_tool(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Result<Vec<ContentItem>, DispatchError> {
        let tool = self
            .tools
            .lookup(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let args = validate(&tool.contract, arguments, self.strict_arguments).map_err(
            |source| DispatchError::InvalidArguments {
                tool: name.to_string(),
                source,
            },
        )?;

        debug!(tool = name, "Executing tool");

        match tool.handler.call(&args).await {
            Ok(content) => Ok(content),
            Err(e) => match tool.on_error {
                ErrorPolicy::ReportAsContent => {
                    warn!(tool = name, error = %e, "Handler failure reported as content");
                    Ok(vec![ContentItem::text(e.to_string())])
                }
                ErrorPolicy::Propagate => Err(DispatchError::ToolFailed {
                    tool: name.to_string(),
                    source: e,
                }),
            },
        }
    }

    /// Resource-read path: resolve the template, invoke the handler.
    async fn read_resource(&self, uri: &str) -> Result<Vec<ContentItem>, DispatchError> {
        let (resource, bindings) = self
            .resources
            .resolve(uri)
            .ok_or_else(|| DispatchError::UnknownResource(uri.to_string()))?;

        debug!(uri, template = resource.template.as_str(), "Reading resource");

        let contents = resource
            .handler
            .read(uri, &bindings)
            .await
            .map_err(|source| DispatchError::ResourceFailed {
                uri: uri.to_string(),
                source,
            })?;

        Ok(contents.into_iter().map(ContentItem::from).collect())
    }

    /// Mark an id as in flight. Returns false if it already is.
    fn begin(&self, id: &RequestId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.clone())
    }

    /// Release a completed id.
    fn finish(&self, id: &RequestId) {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MastraConfig;
    use crate::core::protocol::Outcome;
    use crate::domains::resources;
    use crate::domains::tools;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        dispatcher_with(MastraConfig::default(), false)
    }

    fn dispatcher_with(mastra: MastraConfig, strict: bool) -> Dispatcher {
        let mut tool_registry = ToolRegistry::new();
        tools::register_defaults(&mut tool_registry, &mastra).unwrap();
        let mut resource_registry = ResourceRegistry::new();
        resources::register_defaults(&mut resource_registry).unwrap();
        Dispatcher::new(
            Arc::new(tool_registry),
            Arc::new(resource_registry),
            strict,
        )
    }

    fn tool_call(id: i64, target: &str, arguments: serde_json::Value) -> Request {
        Request::tool_call(id, target, arguments.as_object().cloned().unwrap())
    }

    fn failure_text(response: &Response) -> &str {
        match &response.outcome {
            Outcome::Failure { error } => error,
            Outcome::Success { .. } => panic!("expected failure, got success"),
        }
    }

    fn success_content(response: &Response) -> &[ContentItem] {
        match &response.outcome {
            Outcome::Success { content } => content,
            Outcome::Failure { error } => panic!("expected success, got failure: {}", error),
        }
    }

    #[tokio::test]
    async fn test_valid_tool_call_succeeds_with_content() {
        let dispatcher = dispatcher();
        let response = dispatcher
            .dispatch(tool_call(1, "add", json!({"a": 2, "b": 2})))
            .await;

        assert_eq!(response.id, RequestId::Number(1));
        let content = success_content(&response);
        assert!(!content.is_empty());
        assert_eq!(content[0].as_text(), "4");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected_by_name() {
        let dispatcher = dispatcher();
        let response = dispatcher.dispatch(tool_call(2, "nope", json!({}))).await;

        assert!(!response.is_success());
        assert!(failure_text(&response).contains("Unknown tool: nope"));
    }

    #[tokio::test]
    async fn test_constraint_violation_is_rejected_before_execution() {
        let dispatcher = dispatcher();
        let response = dispatcher
            .dispatch(tool_call(3, "getDiceRoll", json!({"sides": 0})))
            .await;

        assert!(!response.is_success());
        assert!(failure_text(&response).contains("Invalid arguments"));
    }

    #[tokio::test]
    async fn test_type_mismatch_is_rejected_before_execution() {
        let dispatcher = dispatcher();
        let response = dispatcher
            .dispatch(tool_call(4, "getDiceRoll", json!({"sides": "x"})))
            .await;

        assert!(!response.is_success());
        assert!(failure_text(&response).contains("expects number"));
    }

    #[tokio::test]
    async fn test_unknown_keys_tolerated_by_default() {
        let dispatcher = dispatcher();
        let response = dispatcher
            .dispatch(tool_call(5, "add", json!({"a": 1, "b": 2, "c": 3})))
            .await;

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_strict_mode_rejects_unknown_keys() {
        let dispatcher = dispatcher_with(MastraConfig::default(), true);
        let response = dispatcher
            .dispatch(tool_call(6, "add", json!({"a": 1, "b": 2, "c": 3})))
            .await;

        assert!(!response.is_success());
        assert!(failure_text(&response).contains("Unknown parameter: c"));
    }

    #[tokio::test]
    async fn test_resource_read_keys_content_by_uri() {
        let dispatcher = dispatcher();
        let response = dispatcher
            .dispatch(Request::resource_read(7, "greeting://Alice"))
            .await;

        let content = success_content(&response);
        assert_eq!(
            content,
            &[ContentItem::Resource {
                uri: "greeting://Alice".to_string(),
                text: "Hello, Alice!".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_resource_is_rejected() {
        let dispatcher = dispatcher();
        let response = dispatcher
            .dispatch(Request::resource_read(8, "farewell://Alice"))
            .await;

        assert!(!response.is_success());
        assert!(failure_text(&response).contains("Unknown resource"));
    }

    #[tokio::test]
    async fn test_remote_outage_reports_success_with_error_text() {
        // A dropped listener guarantees connection refusal.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dispatcher = dispatcher_with(
            MastraConfig {
                base_url: format!("http://{}", addr),
                default_agent: "weatherAgent".to_string(),
            },
            false,
        );

        let response = dispatcher
            .dispatch(tool_call(9, "askMastra", json!({"question": "hi"})))
            .await;

        // Handler-level failure, not a protocol rejection.
        let content = success_content(&response);
        assert!(
            content[0]
                .as_text()
                .starts_with("Error communicating with Mastra server:"),
            "unexpected content: {}",
            content[0].as_text()
        );
    }

    #[tokio::test]
    async fn test_in_flight_id_is_rejected_and_released() {
        let dispatcher = dispatcher();
        let id = RequestId::Number(10);

        assert!(dispatcher.begin(&id));

        // Same id while the first is still pending.
        let response = dispatcher
            .dispatch(tool_call(10, "add", json!({"a": 1, "b": 1})))
            .await;
        assert!(!response.is_success());
        assert!(failure_text(&response).contains("Duplicate request id"));

        // The pending entry must survive the duplicate's rejection.
        dispatcher.finish(&id);
        let response = dispatcher
            .dispatch(tool_call(10, "add", json!({"a": 1, "b": 1})))
            .await;
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_completed_id_is_reusable() {
        let dispatcher = dispatcher();
        for _ in 0..3 {
            let response = dispatcher
                .dispatch(tool_call(11, "add", json!({"a": 1, "b": 1})))
                .await;
            assert!(response.is_success());
        }
    }

    #[tokio::test]
    async fn test_concurrent_dice_rolls_stay_in_range_and_vary() {
        let dispatcher = Arc::new(dispatcher());

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    dispatcher
                        .dispatch(tool_call(i, "getDiceRoll", json!({"sides": 6})))
                        .await
                })
            })
            .collect();

        let mut values = std::collections::HashSet::new();
        for handle in handles {
            let response = handle.await.unwrap();
            let roll: u32 = success_content(&response)[0].as_text().parse().unwrap();
            assert!((1..=6).contains(&roll));
            values.insert(roll);
        }
        assert!(values.len() >= 2, "expected variation, got {:?}", values);
    }
}
