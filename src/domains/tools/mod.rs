//! Tools domain module.
//!
//! Tools are named, schema-validated callable operations exposed to the
//! client.
//!
//! ## Architecture
//!
//! - `schema.rs` - parameter contracts and the argument validator
//! - `registry.rs` - name to tool bindings and error policy
//! - `definitions/` - individual tool implementations (one file per tool)
//! - `error.rs` - tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with contract and execute()
//! 2. Add a variant to `ToolHandler` in `definitions/mod.rs`
//! 3. Register it in `register_defaults()`

pub mod definitions;
mod error;
mod registry;
pub mod schema;

pub use definitions::{AddTool, AskMastraTool, DiceRollTool, ToolHandler, register_defaults};
pub use error::ToolError;
pub use registry::{ErrorPolicy, Tool, ToolRegistry};
pub use schema::{
    ParamKind, ParamSpec, ParameterContract, SchemaError, ValidatedArguments, validate,
};
