//! Parameter contracts and the schema validator.
//!
//! Inbound arguments arrive as an untyped key/value bag. Before a handler
//! runs, the bag is checked against the tool's declared [`ParameterContract`]:
//! required parameters must be present, present values must match their
//! declared primitive kind, numeric minimums are enforced, and optional
//! parameters pick up their declared default when absent.
//!
//! Validation is a pure function and reports the first violation found.
//! Unknown keys are ignored by default; strict mode rejects them.

use serde_json::{Map, Value, json};
use thiserror::Error;

use super::error::ToolError;

/// Primitive type tag for a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any JSON number.
    Number,

    /// A JSON string.
    String,

    /// A JSON boolean.
    Boolean,
}

impl ParamKind {
    /// The JSON-schema type name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }

    /// Whether `value` carries this kind.
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// The JSON type name of an arbitrary value, for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Declared shape of a single parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Primitive kind the value must carry.
    pub kind: ParamKind,

    /// Whether the parameter must be present.
    pub required: bool,

    /// Lower bound for numeric parameters.
    pub minimum: Option<f64>,

    /// Value substituted when an optional parameter is absent.
    pub default: Option<Value>,

    /// Human-readable description, advertised for discovery.
    pub description: Option<String>,
}

impl ParamSpec {
    /// A required parameter of the given kind.
    pub fn required(kind: ParamKind) -> Self {
        Self {
            kind,
            required: true,
            minimum: None,
            default: None,
            description: None,
        }
    }

    /// An optional parameter of the given kind.
    pub fn optional(kind: ParamKind) -> Self {
        Self {
            required: false,
            ..Self::required(kind)
        }
    }

    /// Set a numeric lower bound.
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the default substituted when the parameter is absent.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the discovery description.
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Ordered mapping from parameter name to its declared shape.
#[derive(Debug, Clone, Default)]
pub struct ParameterContract {
    params: Vec<(String, ParamSpec)>,
}

impl ParameterContract {
    /// An empty contract (accepts any bag; all keys are ignored).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter declaration.
    pub fn param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.params.push((name.into(), spec));
        self
    }

    /// Look up a declared parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, spec)| spec)
    }

    /// Render the contract as the JSON schema object advertised to clients.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for (name, spec) in &self.params {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(spec.kind.name()));
            if let Some(description) = &spec.description {
                property.insert("description".to_string(), json!(description));
            }
            if let Some(minimum) = spec.minimum {
                property.insert("minimum".to_string(), json!(minimum));
            }
            if let Some(default) = &spec.default {
                property.insert("default".to_string(), default.clone());
            }
            properties.insert(name.clone(), Value::Object(property));

            if spec.required {
                required.push(json!(name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A violation detected while validating an argument bag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A required parameter was absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A present value carried the wrong primitive kind.
    #[error("Parameter '{name}' expects {expected}, got {actual}")]
    TypeMismatch {
        /// The offending parameter.
        name: String,
        /// The declared kind.
        expected: &'static str,
        /// The kind actually received.
        actual: &'static str,
    },

    /// A numeric value fell below its declared minimum.
    #[error("Parameter '{name}' violates constraint: {constraint}")]
    ConstraintViolation {
        /// The offending parameter.
        name: String,
        /// Description of the violated constraint.
        constraint: String,
    },

    /// Strict mode only: a key not declared by the contract.
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}

/// Argument bag that has passed contract validation.
///
/// Values are guaranteed to match their declared kinds and constraints, with
/// defaults substituted for absent optional parameters. The typed getters
/// return [`ToolError::Internal`] on a missing or mistyped value; validation
/// makes those paths unreachable for declared parameters.
#[derive(Debug, Clone)]
pub struct ValidatedArguments {
    values: Map<String, Value>,
}

impl ValidatedArguments {
    /// Raw access to a validated value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// A validated numeric parameter.
    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        self.values
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                ToolError::internal(format!("validated parameter '{}' is not a number", name))
            })
    }

    /// A validated string parameter.
    pub fn string(&self, name: &str) -> Result<&str, ToolError> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ToolError::internal(format!("validated parameter '{}' is not a string", name))
            })
    }

    /// A validated boolean parameter.
    pub fn boolean(&self, name: &str) -> Result<bool, ToolError> {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                ToolError::internal(format!("validated parameter '{}' is not a boolean", name))
            })
    }
}

/// Validate a raw argument bag against a contract.
///
/// Returns the first violation found. With `strict` set, keys not declared
/// by the contract are rejected instead of ignored.
pub fn validate(
    contract: &ParameterContract,
    raw: &Map<String, Value>,
    strict: bool,
) -> Result<ValidatedArguments, SchemaError> {
    if strict {
        for key in raw.keys() {
            if contract.get(key).is_none() {
                return Err(SchemaError::UnknownParameter(key.clone()));
            }
        }
    }

    let mut values = Map::new();

    for (name, spec) in &contract.params {
        match raw.get(name) {
            None => {
                if spec.required {
                    return Err(SchemaError::MissingParameter(name.clone()));
                }
                if let Some(default) = &spec.default {
                    values.insert(name.clone(), default.clone());
                }
            }
            Some(value) => {
                if !spec.kind.matches(value) {
                    return Err(SchemaError::TypeMismatch {
                        name: name.clone(),
                        expected: spec.kind.name(),
                        actual: kind_of(value),
                    });
                }
                if let (Some(minimum), Some(actual)) = (spec.minimum, value.as_f64()) {
                    if actual < minimum {
                        return Err(SchemaError::ConstraintViolation {
                            name: name.clone(),
                            constraint: format!("minimum {}", minimum),
                        });
                    }
                }
                values.insert(name.clone(), value.clone());
            }
        }
    }

    Ok(ValidatedArguments { values })
}
