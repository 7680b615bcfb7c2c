use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The reason a completion stopped generating.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model reached a natural stopping point.
    Stop,

    /// The completion hit the max_tokens limit.
    Length,

    /// The model requested a function invocation.
    FunctionCall,

    /// Content was omitted by the content filter.
    ContentFilter,

    /// A finish reason this library does not recognize. The API may add
    /// values at any time; an unknown reason must not fail the decode.
    #[serde(other)]
    Other,
}

/// A function invocation requested by the model.
///
/// The arguments are JSON-encoded text matching the schema of the
/// declared function; they are not decoded at the wire layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    /// The name of the function the model wants invoked.
    pub name: String,

    /// JSON-encoded arguments for the function.
    pub arguments: String,
}

/// The assistant message inside a completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionMessage {
    /// The text content, absent when the model invokes a function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// The function invocation, absent when the model answers in text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

/// One completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionChoice {
    /// The index of this choice.
    #[serde(default)]
    pub index: u32,

    /// The generated assistant message.
    pub message: CompletionMessage,

    /// Why generation stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// The response envelope from the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// Unique identifier of the completion.
    #[serde(default)]
    pub id: String,

    /// The model that produced the completion.
    #[serde(default)]
    pub model: String,

    /// The generated choices; the first is the reply.
    pub choices: Vec<CompletionChoice>,
}

/// The decoded outcome of a chat completion.
///
/// A completion either answers in text or asks the caller to execute a
/// declared function; the two are mutually exclusive on the wire, so the
/// result is a tagged variant rather than a pair of optional fields.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionReply {
    /// A plain text reply, trimmed.
    Text(String),

    /// A request to invoke a named function with JSON-encoded arguments.
    FunctionCall {
        /// The name of the requested function.
        name: String,
        /// JSON-encoded arguments.
        arguments: String,
    },
}

impl ChatCompletion {
    /// Decode the first choice into a [`CompletionReply`].
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the response has no choices or the
    /// first choice carries neither text content nor a function invocation.
    pub fn into_reply(self) -> Result<CompletionReply> {
        let Some(choice) = self.choices.into_iter().next() else {
            return Err(Error::serialization(
                "completion response contained no choices",
                None,
            ));
        };
        if let Some(call) = choice.message.function_call {
            return Ok(CompletionReply::FunctionCall {
                name: call.name,
                arguments: call.arguments,
            });
        }
        match choice.message.content {
            Some(content) => Ok(CompletionReply::Text(content.trim().to_string())),
            None => Err(Error::serialization(
                "completion choice carried neither content nor a function call",
                None,
            )),
        }
    }
}
