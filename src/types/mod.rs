// Public modules
pub mod chat_completion;
pub mod chat_completion_params;
pub mod chat_message;
pub mod function_call_mode;
pub mod function_declaration;
pub mod image_generation;
pub mod image_generation_params;
pub mod model;

// Re-exports
pub use chat_completion::{
    ChatCompletion, CompletionChoice, CompletionMessage, CompletionReply, FinishReason,
    FunctionCall,
};
pub use chat_completion_params::{ChatCompletionParams, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use chat_message::{ChatMessage, ChatRole};
pub use function_call_mode::{FunctionCallKeyword, FunctionCallMode, NamedFunction};
pub use function_declaration::FunctionDeclaration;
pub use image_generation::{GeneratedImage, ImageGeneration};
pub use image_generation_params::{ImageGenerationParams, ImageSize};
pub use model::{KnownModel, Model};
