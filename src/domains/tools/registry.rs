//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry binds a unique tool name to its description, parameter
//! contract, handler, and error policy. Registration happens once at server
//! startup; afterwards the registry is shared read-only by all dispatches.

use std::collections::HashMap;

use tracing::info;

use super::definitions::ToolHandler;
use super::error::ToolError;
use super::schema::ParameterContract;

/// How a handler-level failure is surfaced, chosen explicitly at
/// registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The failure propagates as a protocol-level rejection. Used when a
    /// post-validation failure indicates a programming error.
    Propagate,

    /// The failure is converted into a descriptive text content item and the
    /// call reports success. Used for expected, recoverable failures such as
    /// a downstream service being unavailable.
    ReportAsContent,
}

/// A registered tool: name, discovery metadata, contract, and handler.
#[derive(Debug)]
pub struct Tool {
    /// Unique tool name, the dispatch key.
    pub name: String,

    /// Human-readable description advertised to clients.
    pub description: String,

    /// Declared parameter contract; arguments are validated against it
    /// before the handler runs.
    pub contract: ParameterContract,

    /// The handler executed once validation passes.
    pub handler: ToolHandler,

    /// How handler-level failures are surfaced.
    pub on_error: ErrorPolicy,
}

/// Registry of all available tools, keyed by name.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if the name is already taken.
    pub fn register(&mut self, tool: Tool) -> Result<(), ToolError> {
        if self.tools.contains_key(&tool.name) {
            return Err(ToolError::duplicate_name(&tool.name));
        }
        info!(tool = %tool.name, "Registering tool");
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Remove a tool, returning it if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<Tool> {
        self.tools.remove(name)
    }

    /// Iterate over all registered tools.
    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::schema::{ParamKind, ParamSpec};
    use super::*;

    fn echo_tool(name: &str) -> Tool {
        Tool {
            name: name.to_string(),
            description: "test tool".to_string(),
            contract: ParameterContract::new()
                .param("a", ParamSpec::required(ParamKind::Number)),
            handler: ToolHandler::Add,
            on_error: ErrorPolicy::Propagate,
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("add")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("add").is_some());
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("add")).unwrap();

        let err = registry.register(echo_tool("add")).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateName(name) if name == "add"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_frees_the_name() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_tool("add")).unwrap();

        assert!(registry.unregister("add").is_some());
        assert!(registry.unregister("add").is_none());
        assert!(registry.is_empty());

        registry.register(echo_tool("add")).unwrap();
    }
}
