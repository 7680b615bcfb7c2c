use serde::{Deserialize, Serialize};

/// Configuration for the model's function-call behavior.
///
/// This can be one of the following:
/// - "auto": Let the model decide whether to answer in text or invoke a function
/// - "none": Do not invoke any function
/// - `{"name": ...}`: Force the model to invoke a specific named function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FunctionCallMode {
    /// A keyword mode ("auto" or "none").
    Keyword(FunctionCallKeyword),

    /// Force a specific named function.
    Function(NamedFunction),
}

/// Keyword modes for function calling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionCallKeyword {
    /// Automatic function choice
    Auto,

    /// No function calls
    None,
}

/// Wire form of a forced function choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFunction {
    /// The name of the function to invoke.
    pub name: String,
}

impl FunctionCallMode {
    /// Create a new `FunctionCallMode` with auto mode.
    pub fn auto() -> Self {
        Self::Keyword(FunctionCallKeyword::Auto)
    }

    /// Create a new `FunctionCallMode` that disables function calls.
    pub fn none() -> Self {
        Self::Keyword(FunctionCallKeyword::None)
    }

    /// Create a new `FunctionCallMode` forcing a specific named function.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(NamedFunction { name: name.into() })
    }
}

impl Default for FunctionCallMode {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn function_call_mode_auto() {
        let mode = FunctionCallMode::auto();
        let json = to_value(&mode).unwrap();

        assert_eq!(json, json!("auto"));
    }

    #[test]
    fn function_call_mode_none() {
        let mode = FunctionCallMode::none();
        let json = to_value(&mode).unwrap();

        assert_eq!(json, json!("none"));
    }

    #[test]
    fn function_call_mode_named() {
        let mode = FunctionCallMode::function("generate_image");
        let json = to_value(&mode).unwrap();

        assert_eq!(
            json,
            json!({
                "name": "generate_image"
            })
        );
    }

    #[test]
    fn function_call_mode_deserialization() {
        let mode: FunctionCallMode = serde_json::from_value(json!("auto")).unwrap();
        assert_eq!(mode, FunctionCallMode::auto());

        let mode: FunctionCallMode =
            serde_json::from_value(json!({ "name": "generate_image" })).unwrap();
        assert_eq!(mode, FunctionCallMode::function("generate_image"));
    }

    #[test]
    fn function_call_mode_default_is_auto() {
        assert_eq!(FunctionCallMode::default(), FunctionCallMode::auto());
    }
}
