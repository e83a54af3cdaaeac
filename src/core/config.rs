//! Configuration management for the dispatch server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Argument validation policy.
    pub validation: ValidationConfig,

    /// Remote Mastra agent server configuration.
    pub mastra: MastraConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Argument validation policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject argument keys not declared by a tool's contract.
    /// The default is permissive: unknown keys are ignored.
    pub strict_arguments: bool,
}

/// Configuration for the remote Mastra agent server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MastraConfig {
    /// Base URL of the Mastra server.
    pub base_url: String,

    /// Agent used when a call does not name one.
    pub default_agent: String,
}

impl Default for MastraConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4111".to_string(),
            default_agent: "weatherAgent".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "agent-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            validation: ValidationConfig::default(),
            mastra: MastraConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `MCP_`, e.g.
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_MASTRA_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(strict) = std::env::var("MCP_STRICT_ARGUMENTS") {
            config.validation.strict_arguments = strict.parse().unwrap_or(false);
            info!(
                "Strict argument validation: {}",
                config.validation.strict_arguments
            );
        }

        if let Ok(base_url) = std::env::var("MCP_MASTRA_BASE_URL") {
            config.mastra.base_url = base_url;
        } else {
            warn!(
                "MCP_MASTRA_BASE_URL not set - using default {}",
                config.mastra.base_url
            );
        }

        if let Ok(agent) = std::env::var("MCP_MASTRA_DEFAULT_AGENT") {
            config.mastra.default_agent = agent;
        }

        config
    }
}
