//! Dice roll tool.

use rand::Rng;

use crate::core::protocol::ContentItem;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ErrorPolicy, Tool};
use crate::domains::tools::schema::{ParamKind, ParamSpec, ParameterContract, ValidatedArguments};

use super::ToolHandler;

/// Rolls a die with a configurable number of sides.
#[derive(Debug, Clone)]
pub struct DiceRollTool;

impl DiceRollTool {
    /// Tool name as advertised to clients.
    pub const NAME: &'static str = "getDiceRoll";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Roll a dice with a specified number of sides and return the result.";

    /// Parameter contract: a required side count of at least 1.
    pub fn contract() -> ParameterContract {
        ParameterContract::new().param(
            "sides",
            ParamSpec::required(ParamKind::Number)
                .minimum(1.0)
                .describe("Number of sides on the die"),
        )
    }

    /// Build the registration entry for this tool.
    pub fn definition() -> Tool {
        Tool {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            contract: Self::contract(),
            handler: ToolHandler::DiceRoll,
            on_error: ErrorPolicy::Propagate,
        }
    }

    /// Execute the tool with validated arguments.
    ///
    /// The contract guarantees `sides >= 1`, so the roll range is never
    /// empty.
    pub fn execute(args: &ValidatedArguments) -> Result<Vec<ContentItem>, ToolError> {
        let sides = args.number("sides")? as u64;
        let roll = rand::thread_rng().gen_range(1..=sides.max(1));
        Ok(vec![ContentItem::text(roll.to_string())])
    }
}
