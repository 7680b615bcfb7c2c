//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use arrrg_derive::CommandLine;

use crate::types::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, KnownModel, Model};

/// Command-line arguments for the maestro-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Chat model to use (default: gpt-4o-2024-08-06)", "MODEL")]
    pub model: Option<String>,

    /// Model to use for image generation.
    #[arrrg(optional, "Image model to use (default: dall-e-3)", "MODEL")]
    pub image_model: Option<String>,

    /// Maximum tokens per response.
    #[arrrg(optional, "Max tokens per response (default: 150)", "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model used for completions.
    pub model: Model,

    /// The model used for image generation.
    pub image_model: Model,

    /// Maximum tokens per completion.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-4o-2024-08-06
    /// - Image model: dall-e-3
    /// - Max tokens: 150
    /// - Temperature: 0.7
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::Known(KnownModel::Gpt4o20240806),
            image_model: Model::Known(KnownModel::DallE3),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            use_color: true,
        }
    }

    /// Sets the completion model.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the image generation model.
    pub fn with_image_model(mut self, model: Model) -> Self {
        self.image_model = model;
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

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let model = args
            .model
            .map(|s| s.parse::<Model>().unwrap_or(Model::Custom(s)))
            .unwrap_or(Model::Known(KnownModel::Gpt4o20240806));
        let image_model = args
            .image_model
            .map(|s| s.parse::<Model>().unwrap_or(Model::Custom(s)))
            .unwrap_or(Model::Known(KnownModel::DallE3));

        ChatConfig {
            model,
            image_model,
            max_tokens: args.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            use_color: !args.no_color,
            ..ChatConfig::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4o20240806));
        assert_eq!(config.image_model, Model::Known(KnownModel::DallE3));
        assert_eq!(config.max_tokens, 150);
        assert_eq!(config.temperature, 0.7);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4o20240806));
        assert_eq!(config.image_model, Model::Known(KnownModel::DallE3));
        assert_eq!(config.max_tokens, 150);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gpt-4o-mini".to_string()),
            image_model: Some("dall-e-2".to_string()),
            max_tokens: Some(300),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4oMini));
        assert_eq!(config.image_model, Model::Known(KnownModel::DallE2));
        assert_eq!(config.max_tokens, 300);
        assert!(!config.use_color);
    }

    #[test]
    fn unknown_model_name_becomes_custom() {
        let args = ChatArgs {
            model: Some("my-finetune".to_string()),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Custom("my-finetune".to_string()));
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Known(KnownModel::Gpt4oMini))
            .with_image_model(Model::Known(KnownModel::DallE2))
            .with_max_tokens(200)
            .with_temperature(0.3)
            .without_color();

        assert_eq!(config.model, Model::Known(KnownModel::Gpt4oMini));
        assert_eq!(config.image_model, Model::Known(KnownModel::DallE2));
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.temperature, 0.3);
        assert!(!config.use_color);
    }
}
