use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A function the model may request the caller to execute.
///
/// The declaration is advertised on every chat completion request; the
/// `parameters` field carries a JSON schema describing the arguments the
/// model must supply when it invokes the function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDeclaration {
    /// The name the model uses to invoke the function.
    pub name: String,

    /// A description of what the function does, used by the model to
    /// decide when to invoke it.
    pub description: String,

    /// JSON schema for the function's arguments.
    pub parameters: Value,
}

impl FunctionDeclaration {
    /// Create a new `FunctionDeclaration`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}
