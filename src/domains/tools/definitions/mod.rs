//! Tool definitions module.
//!
//! Each tool lives in its own file and provides its name, description,
//! parameter contract, and execution logic. The [`ToolHandler`] union below
//! is the closed set of handler variants the dispatcher can invoke;
//! registration resolves a tool name to one of these variants exactly once
//! per request.

pub mod add;
pub mod ask_mastra;
pub mod dice_roll;

pub use add::AddTool;
pub use ask_mastra::{AskMastraTool, MASTRA_ERROR_PREFIX, MastraClient};
pub use dice_roll::DiceRollTool;

use crate::core::config::MastraConfig;
use crate::core::protocol::ContentItem;

use super::error::ToolError;
use super::registry::ToolRegistry;
use super::schema::ValidatedArguments;

/// The closed set of tool handlers.
///
/// Handlers receive only validated arguments and may suspend (e.g. for
/// network I/O) before producing their content sequence.
#[derive(Debug)]
pub enum ToolHandler {
    /// Local addition.
    Add,

    /// Local dice roll.
    DiceRoll,

    /// Remote agent proxy with its HTTP client.
    AskMastra(MastraClient),
}

impl ToolHandler {
    /// Invoke the handler with validated arguments.
    pub async fn call(&self, args: &ValidatedArguments) -> Result<Vec<ContentItem>, ToolError> {
        match self {
            Self::Add => AddTool::execute(args),
            Self::DiceRoll => DiceRollTool::execute(args),
            Self::AskMastra(client) => AskMastraTool::execute(client, args).await,
        }
    }
}

/// Register the default tool set into `registry`.
pub fn register_defaults(
    registry: &mut ToolRegistry,
    mastra: &MastraConfig,
) -> Result<(), ToolError> {
    registry.register(AddTool::definition())?;
    registry.register(DiceRollTool::definition())?;
    registry.register(AskMastraTool::definition(mastra))?;
    Ok(())
}
