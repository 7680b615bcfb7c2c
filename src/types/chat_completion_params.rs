use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, FunctionCallMode, FunctionDeclaration, Model};

/// Default maximum tokens per completion.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Parameters for a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionParams {
    /// The model that will complete the prompt.
    pub model: Model,

    /// The ordered prompt context, system message first.
    pub messages: Vec<ChatMessage>,

    /// Functions the model may request the caller to execute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionDeclaration>>,

    /// How the model chooses between text and function invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCallMode>,

    /// Maximum tokens in the completion.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

impl ChatCompletionParams {
    /// Create a new `ChatCompletionParams` with default sampling settings
    /// and no functions declared.
    pub fn new(model: Model, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            functions: None,
            function_call: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the declared functions.
    pub fn with_functions(mut self, functions: Vec<FunctionDeclaration>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Sets the function-call mode.
    pub fn with_function_call(mut self, mode: FunctionCallMode) -> Self {
        self.function_call = Some(mode);
        self
    }

    /// Sets the maximum tokens per completion.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}
