//! Remote agent proxy tool.
//!
//! Forwards a question to a Mastra agent server over HTTP and returns the
//! agent's answer. Remote failures are expected operational events (the
//! server may simply be down), so this tool registers with
//! `ErrorPolicy::ReportAsContent`: a transient outage becomes a descriptive
//! text item instead of aborting the client session.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::core::config::MastraConfig;
use crate::core::protocol::ContentItem;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ErrorPolicy, Tool};
use crate::domains::tools::schema::{ParamKind, ParamSpec, ParameterContract, ValidatedArguments};

use super::ToolHandler;

/// Fixed prefix identifying a handler-level remote failure in content text.
pub const MASTRA_ERROR_PREFIX: &str = "Error communicating with Mastra server: ";

/// Response body returned by the Mastra generate endpoint.
#[derive(Debug, Deserialize)]
struct MastraResponse {
    text: String,
}

/// HTTP client for a Mastra agent server.
#[derive(Debug, Clone)]
pub struct MastraClient {
    http: reqwest::Client,
    base_url: String,
}

impl MastraClient {
    /// Create a client for the configured Mastra server.
    pub fn new(config: &MastraConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the given agent a question and return its answer text.
    pub async fn generate(&self, agent_id: &str, question: &str) -> Result<String, ToolError> {
        let url = format!("{}/api/agents/{}/generate", self.base_url, agent_id);
        debug!(%url, "Sending question to Mastra server");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "messages": [question] }))
            .send()
            .await
            .map_err(|e| ToolError::upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Mastra server returned an error response");
            return Err(ToolError::upstream(format!(
                "Mastra server responded with status: {}, body: {}",
                status, body
            )));
        }

        let payload: MastraResponse = response
            .json()
            .await
            .map_err(|e| ToolError::upstream(e.to_string()))?;

        Ok(payload.text)
    }
}

/// Sends a question to the Mastra server and returns the agent's answer.
#[derive(Debug, Clone)]
pub struct AskMastraTool;

impl AskMastraTool {
    /// Tool name as advertised to clients.
    pub const NAME: &'static str = "askMastra";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Send a question to the Mastra server and get a response";

    /// Parameter contract: a required question and an optional agent id
    /// defaulting to the configured agent.
    pub fn contract(default_agent: &str) -> ParameterContract {
        ParameterContract::new()
            .param(
                "question",
                ParamSpec::required(ParamKind::String)
                    .describe("The question to ask the Mastra server"),
            )
            .param(
                "agentId",
                ParamSpec::optional(ParamKind::String)
                    .default_value(json!(default_agent))
                    .describe("The ID of the agent to use"),
            )
    }

    /// Build the registration entry for this tool.
    pub fn definition(config: &MastraConfig) -> Tool {
        Tool {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            contract: Self::contract(&config.default_agent),
            handler: ToolHandler::AskMastra(MastraClient::new(config)),
            on_error: ErrorPolicy::ReportAsContent,
        }
    }

    /// Execute the tool with validated arguments.
    ///
    /// Any remote failure is wrapped with [`MASTRA_ERROR_PREFIX`] so that
    /// the dispatcher's content conversion produces a self-describing
    /// message.
    pub async fn execute(
        client: &MastraClient,
        args: &ValidatedArguments,
    ) -> Result<Vec<ContentItem>, ToolError> {
        let question = args.string("question")?;
        let agent_id = args.string("agentId")?;

        match client.generate(agent_id, question).await {
            Ok(text) => Ok(vec![ContentItem::text(text)]),
            Err(e) => Err(ToolError::upstream(format!("{}{}", MASTRA_ERROR_PREFIX, e))),
        }
    }
}
