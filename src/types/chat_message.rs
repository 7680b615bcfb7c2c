use serde::{Deserialize, Serialize};

/// A single message in the prompt sent to the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The role of the message.
    pub role: ChatRole,

    /// The text content of the message.
    pub content: String,
}

/// Role type for a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System role.
    System,

    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

impl ChatMessage {
    /// Create a new `ChatMessage` with the given role and content.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new system `ChatMessage`.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Create a new user `ChatMessage`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create a new assistant `ChatMessage`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

impl From<&str> for ChatMessage {
    fn from(content: &str) -> Self {
        Self::user(content)
    }
}

impl From<String> for ChatMessage {
    fn from(content: String) -> Self {
        Self::user(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn chat_message_serialization() {
        let message = ChatMessage::user("How do volcanoes work?");
        let json = to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({
                "role": "user",
                "content": "How do volcanoes work?"
            })
        );
    }

    #[test]
    fn system_message_serialization() {
        let message = ChatMessage::system("You are a friendly tutor.");
        let json = to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({
                "role": "system",
                "content": "You are a friendly tutor."
            })
        );
    }

    #[test]
    fn chat_message_from_str() {
        let message: ChatMessage = "Hello!".into();
        assert_eq!(message.role, ChatRole::User);

        let message = ChatMessage::from("Hello from string".to_string());
        assert_eq!(message.role, ChatRole::User);
    }

    #[test]
    fn chat_message_deserialization() {
        let json = json!({
            "role": "assistant",
            "content": "Volcanoes are mountains that can erupt! 🌋"
        });

        let message: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(message.role, ChatRole::Assistant);
        assert_eq!(message.content, "Volcanoes are mountains that can erupt! 🌋");
    }
}
