//! Request/response envelope types for the dispatch protocol.
//!
//! The transport layer delivers already-decoded [`Request`] values and sends
//! back [`Response`] values; byte-level framing lives in `core::transport`.
//! Every response carries the correlation id of the request that produced it,
//! so a client may issue several requests before the first one completes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque correlation token chosen by the client.
///
/// Strings and integers are both accepted on the wire; the server never
/// interprets the value beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id, e.g. `{"id": 7}`.
    Number(i64),

    /// String id, e.g. `{"id": "req-7"}`.
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// The two request families the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Invoke a named tool with an argument bag.
    ToolCall,

    /// Read a resource addressed by URI.
    ResourceRead,
}

/// A single decoded inbound message.
///
/// `target` is a tool name for [`RequestKind::ToolCall`] and a URI for
/// [`RequestKind::ResourceRead`]. Requests are not retained after their
/// response has been sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Correlation token echoed back in the response.
    pub id: RequestId,

    /// Which request family this is.
    pub kind: RequestKind,

    /// Tool name or resource URI.
    pub target: String,

    /// Raw argument bag; validated against the tool's contract before any
    /// handler sees it. Resource reads carry no arguments.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl Request {
    /// Build a tool-call request.
    pub fn tool_call(
        id: impl Into<RequestId>,
        target: impl Into<String>,
        arguments: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: RequestKind::ToolCall,
            target: target.into(),
            arguments,
        }
    }

    /// Build a resource-read request.
    pub fn resource_read(id: impl Into<RequestId>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: RequestKind::ResourceRead,
            target: uri.into(),
            arguments: Map::new(),
        }
    }
}

/// One unit of a successful response's payload.
///
/// The `type` tag keeps the model open to new kinds without breaking
/// existing consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ContentItem {
    /// Plain text payload.
    Text {
        /// The text content.
        text: String,
    },

    /// Resource payload keyed by the URI it was resolved from.
    Resource {
        /// The resolved resource URI.
        uri: String,

        /// The text content of the resource.
        text: String,
    },
}

impl ContentItem {
    /// Create a text content item.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The textual payload of this item, whatever its kind.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Resource { text, .. } => text,
        }
    }
}

/// Content produced by a resource handler, keyed by the resolved URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceContent {
    /// The URI the read resolved to.
    pub uri: String,

    /// The text content.
    pub text: String,
}

impl From<ResourceContent> for ContentItem {
    fn from(content: ResourceContent) -> Self {
        Self::Resource {
            uri: content.uri,
            text: content.text,
        }
    }
}

/// The terminal result of a dispatched request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The call executed; `content` is an ordered, non-empty sequence.
    Success {
        /// Ordered content items produced by the handler.
        content: Vec<ContentItem>,
    },

    /// Protocol-level rejection: the call did not execute.
    Failure {
        /// Human-readable description of the rejection.
        error: String,
    },
}

/// The response envelope correlated to exactly one pending request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Correlation token copied from the originating request.
    pub id: RequestId,

    /// Success or failure outcome.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    /// Build a success response.
    pub fn success(id: RequestId, content: Vec<ContentItem>) -> Self {
        Self {
            id,
            outcome: Outcome::Success { content },
        }
    }

    /// Build a failure response from any displayable error.
    pub fn failure(id: RequestId, error: impl fmt::Display) -> Self {
        Self {
            id,
            outcome: Outcome::Failure {
                error: error.to_string(),
            },
        }
    }

    /// Whether this response reports success.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_decodes_with_defaulted_arguments() {
        let raw = r#"{"id": 1, "kind": "resource_read", "target": "greeting://Alice"}"#;
        let request: Request = serde_json::from_str(raw).unwrap();
        assert_eq!(request.id, RequestId::Number(1));
        assert_eq!(request.kind, RequestKind::ResourceRead);
        assert!(request.arguments.is_empty());
    }

    #[test]
    fn test_request_accepts_string_ids() {
        let raw = r#"{"id": "abc", "kind": "tool_call", "target": "add", "arguments": {"a": 1, "b": 2}}"#;
        let request: Request = serde_json::from_str(raw).unwrap();
        assert_eq!(request.id, RequestId::String("abc".to_string()));
        assert_eq!(request.arguments.len(), 2);
    }

    #[test]
    fn test_success_response_wire_shape() {
        let response = Response::success(RequestId::Number(7), vec![ContentItem::text("4")]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "outcome": "success",
                "content": [{"type": "text", "text": "4"}]
            })
        );
    }

    #[test]
    fn test_failure_response_wire_shape() {
        let response = Response::failure(RequestId::from("r1"), "Unknown tool: nope");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "r1",
                "outcome": "failure",
                "error": "Unknown tool: nope"
            })
        );
    }

    #[test]
    fn test_resource_content_converts_to_item() {
        let content = ResourceContent {
            uri: "greeting://Alice".to_string(),
            text: "Hello, Alice!".to_string(),
        };
        let item = ContentItem::from(content);
        assert_eq!(item.as_text(), "Hello, Alice!");
    }
}
