//! Addition tool.

use crate::core::protocol::ContentItem;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::registry::{ErrorPolicy, Tool};
use crate::domains::tools::schema::{ParamKind, ParamSpec, ParameterContract, ValidatedArguments};

use super::ToolHandler;

/// Adds two numbers and returns the sum as text.
#[derive(Debug, Clone)]
pub struct AddTool;

impl AddTool {
    /// Tool name as advertised to clients.
    pub const NAME: &'static str = "add";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add two numbers and return the result.";

    /// Parameter contract: two required numbers.
    pub fn contract() -> ParameterContract {
        ParameterContract::new()
            .param("a", ParamSpec::required(ParamKind::Number).describe("First addend"))
            .param("b", ParamSpec::required(ParamKind::Number).describe("Second addend"))
    }

    /// Build the registration entry for this tool.
    ///
    /// Pure local computation: once validation passes there is no
    /// recoverable failure path, so failures propagate.
    pub fn definition() -> Tool {
        Tool {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            contract: Self::contract(),
            handler: ToolHandler::Add,
            on_error: ErrorPolicy::Propagate,
        }
    }

    /// Execute the tool with validated arguments.
    pub fn execute(args: &ValidatedArguments) -> Result<Vec<ContentItem>, ToolError> {
        let a = args.number("a")?;
        let b = args.number("b")?;
        Ok(vec![ContentItem::text(format_number(a + b))])
    }
}

/// Render a number the way clients expect: integral values print without a
/// decimal point.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::validate;
    use serde_json::json;

    fn run(raw: serde_json::Value) -> Vec<ContentItem> {
        let args = validate(&AddTool::contract(), raw.as_object().unwrap(), false).unwrap();
        AddTool::execute(&args).unwrap()
    }

    #[test]
    fn test_adds_integers() {
        let content = run(json!({"a": 2, "b": 3}));
        assert_eq!(content, vec![ContentItem::text("5")]);
    }

    #[test]
    fn test_adds_fractional_numbers() {
        let content = run(json!({"a": 1.5, "b": 1}));
        assert_eq!(content, vec![ContentItem::text("2.5")]);
    }

    #[test]
    fn test_negative_sum_formats_without_decimal_point() {
        let content = run(json!({"a": -4, "b": 1}));
        assert_eq!(content, vec![ContentItem::text("-3")]);
    }

    #[test]
    fn test_missing_addend_fails_validation() {
        let raw = json!({"a": 2});
        let result = validate(&AddTool::contract(), raw.as_object().unwrap(), false);
        assert!(result.is_err());
    }
}
