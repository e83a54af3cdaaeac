//! Server instance and lifecycle management.
//!
//! [`McpServer`] owns both registries, populated once from the definitions
//! modules at construction and shared read-only with the dispatcher
//! afterwards. There is no module-level registry state; the server's
//! lifetime is the process lifetime.

use std::sync::Arc;

use tracing::info;

use super::config::Config;
use super::dispatch::Dispatcher;
use super::error::Result;
use super::protocol::{Request, Response};
use crate::domains::{resources, tools};
use crate::domains::resources::ResourceRegistry;
use crate::domains::tools::ToolRegistry;

/// The dispatch server: registries plus the dispatcher over them.
#[derive(Debug, Clone)]
pub struct McpServer {
    config: Arc<Config>,
    tools: Arc<ToolRegistry>,
    resources: Arc<ResourceRegistry>,
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a server with the default tool and resource set.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let mut tools = ToolRegistry::new();
        tools::register_defaults(&mut tools, &config.mastra)?;

        let mut resources = ResourceRegistry::new();
        resources::register_defaults(&mut resources)?;

        info!(
            tools = tools.len(),
            resources = resources.len(),
            "Registries initialized"
        );

        let tools = Arc::new(tools);
        let resources = Arc::new(resources);
        let dispatcher = Arc::new(Dispatcher::new(
            tools.clone(),
            resources.clone(),
            config.validation.strict_arguments,
        ));

        Ok(Self {
            config,
            tools,
            resources,
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The dispatcher shared with transport tasks.
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        self.dispatcher.clone()
    }

    /// Dispatch a single request to completion.
    pub async fn dispatch(&self, request: Request) -> Response {
        self.dispatcher.dispatch(request).await
    }

    /// List all tools as discovery metadata.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.contract.to_json_schema(),
                })
            })
            .collect()
    }

    /// List all resource templates as discovery metadata.
    pub fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        self.resources
            .iter()
            .map(|resource| {
                serde_json::json!({
                    "uriTemplate": resource.template.as_str(),
                    "description": resource.description,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_server_advertises_all_tools() {
        let server = test_server();
        let listed = server.list_tools();
        assert_eq!(listed.len(), 3);

        let names: Vec<_> = listed
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"add"));
        assert!(names.contains(&"getDiceRoll"));
        assert!(names.contains(&"askMastra"));

        for tool in &listed {
            assert_eq!(tool["inputSchema"]["type"], "object");
            assert!(!tool["description"].as_str().unwrap().is_empty());
        }
    }

    #[test]
    fn test_server_advertises_resource_templates() {
        let server = test_server();
        let listed = server.list_resource_templates();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["uriTemplate"], "greeting://{name}");
    }

    #[tokio::test]
    async fn test_server_dispatch_round_trip() {
        let server = test_server();
        let raw = serde_json::json!({"a": 20, "b": 22});
        let request = Request::tool_call(1, "add", raw.as_object().cloned().unwrap());

        let response = server.dispatch(request).await;
        assert!(response.is_success());
    }
}
