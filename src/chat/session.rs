//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which holds the in-memory
//! conversation state (profile, points, history) and processes chat turns,
//! including dispatch of the model's image-generation function calls.

use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::chat::config::ChatConfig;
use crate::chat::profile::{MAX_AGE, MIN_AGE, Profile, Topic};
use crate::client::{ChatService, ImageService, OpenAi};
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_FUNCTION_DISPATCHES, SESSION_POINTS_AWARDED, SESSION_TURN_FAILURES, SESSION_TURNS,
};
use crate::types::{
    ChatCompletionParams, ChatMessage, CompletionReply, FunctionCallMode, FunctionDeclaration,
    ImageGenerationParams, Model,
};

/// Points awarded for each successfully generated image.
pub const IMAGE_REWARD_POINTS: u32 = 10;

/// The name of the single function declared to the completion service.
pub const GENERATE_IMAGE_FUNCTION: &str = "generate_image";

/// Reply shown when the completion service fails.
pub const COMPLETION_APOLOGY: &str = "Sorry, I had trouble processing your message. 😕";

/// Reply shown when image generation fails.
pub const IMAGE_APOLOGY: &str = "Sorry, I couldn't make that picture. 😔";

/// Who produced a transcript message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Speaker {
    /// The child.
    User,

    /// The chatbot.
    Assistant,
}

/// One message in the conversation transcript.
///
/// Messages are immutable once appended; the history is append-only and
/// its order is the literal prompt context sent upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Who produced the message.
    pub speaker: Speaker,

    /// The message text.
    pub text: String,

    /// A generated image attached to the message, if any.
    pub image: Option<Url>,
}

impl Message {
    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            image: None,
        }
    }

    /// Create a new assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            image: None,
        }
    }

    /// Create a new assistant message carrying a generated image.
    pub fn assistant_with_image(text: impl Into<String>, image: Url) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            image: Some(image),
        }
    }
}

/// Arguments schema for the generate_image function.
#[derive(Deserialize)]
struct GenerateImageArgs {
    description: String,
}

/// A chat session that manages conversation state and API interactions.
///
/// The session is generic over the two service seams so the turn processor
/// can be exercised with scripted fakes.
pub struct ChatSession<C: ChatService, I: ImageService> {
    chat: C,
    images: I,
    config: ChatConfig,
    profile: Option<Profile>,
    points: u32,
    history: Vec<Message>,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    /// The child's name, once intake completed.
    pub name: Option<String>,

    /// The child's age, once intake completed.
    pub age: Option<u8>,

    /// The child's favorite topic, once intake completed.
    pub topic: Option<Topic>,

    /// The reward point total.
    pub points: u32,

    /// The number of messages in the conversation.
    pub message_count: usize,

    /// The completion model.
    pub model: Model,

    /// The image generation model.
    pub image_model: Model,

    /// The maximum tokens per completion.
    pub max_tokens: u32,

    /// The sampling temperature.
    pub temperature: f32,
}

impl ChatSession<OpenAi, OpenAi> {
    /// Creates a new chat session backed by the OpenAI API.
    pub fn new(client: OpenAi, config: ChatConfig) -> Self {
        Self::with_services(client.clone(), client, config)
    }
}

impl<C: ChatService, I: ImageService> ChatSession<C, I> {
    /// Creates a new chat session with explicit service implementations.
    pub fn with_services(chat: C, images: I, config: ChatConfig) -> Self {
        Self {
            chat,
            images,
            config,
            profile: None,
            points: 0,
            history: Vec::new(),
        }
    }

    /// Completes intake with the given profile, unlocking chat.
    pub fn set_profile(&mut self, profile: Profile) {
        tracing::info!(
            name = profile.name(),
            age = profile.age(),
            topic = %profile.topic(),
            "profile captured"
        );
        self.profile = Some(profile);
    }

    /// Returns the captured profile, if intake has completed.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Returns the reward point total.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Returns the conversation transcript in order.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    /// Clears the conversation history. Profile and points survive.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Changes the completion model.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the current completion model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Changes the image generation model.
    pub fn set_image_model(&mut self, model: Model) {
        self.config.image_model = model;
    }

    /// Returns the current image generation model.
    pub fn image_model(&self) -> &Model {
        &self.config.image_model
    }

    /// Processes one chat turn.
    ///
    /// Appends the user message to history, asks the completion service for
    /// a reply, dispatches an image generation if the model requests one,
    /// and appends exactly one assistant message. Upstream failures degrade
    /// to a fixed apology; this method never fails a turn.
    ///
    /// Returns the appended assistant message, or `None` when the input is
    /// whitespace-only or intake has not completed (no-op, nothing sent).
    pub async fn send_message(&mut self, input: &str) -> Option<&Message> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let Some(profile) = self.profile.clone() else {
            tracing::warn!("message received before intake completed");
            return None;
        };

        tracing::info!("user message: {input}");
        self.history.push(Message::user(input));
        SESSION_TURNS.click();

        let reply = self.generate_reply(&profile).await;
        tracing::info!("assistant message: {}", reply.text);
        self.history.push(reply);
        self.history.last()
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            name: self.profile.as_ref().map(|p| p.name().to_string()),
            age: self.profile.as_ref().map(|p| p.age()),
            topic: self.profile.as_ref().map(|p| p.topic()),
            points: self.points,
            message_count: self.message_count(),
            model: self.config.model.clone(),
            image_model: self.config.image_model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    async fn generate_reply(&mut self, profile: &Profile) -> Message {
        let params =
            ChatCompletionParams::new(self.config.model.clone(), self.build_prompt(profile))
                .with_functions(vec![generate_image_declaration()])
                .with_function_call(FunctionCallMode::auto())
                .with_max_tokens(self.config.max_tokens)
                .with_temperature(self.config.temperature);

        let completion = match self.chat.create_chat_completion(params).await {
            Ok(completion) => completion,
            Err(err) => {
                tracing::error!("completion request failed: {err}");
                SESSION_TURN_FAILURES.click();
                return Message::assistant(COMPLETION_APOLOGY);
            }
        };

        match completion.into_reply() {
            Ok(CompletionReply::Text(text)) => Message::assistant(text),
            Ok(CompletionReply::FunctionCall { name, arguments })
                if name == GENERATE_IMAGE_FUNCTION =>
            {
                SESSION_FUNCTION_DISPATCHES.click();
                let args: GenerateImageArgs = match serde_json::from_str(&arguments) {
                    Ok(args) => args,
                    Err(err) => {
                        tracing::error!("malformed {GENERATE_IMAGE_FUNCTION} arguments: {err}");
                        SESSION_TURN_FAILURES.click();
                        return Message::assistant(COMPLETION_APOLOGY);
                    }
                };
                match self.generate_image(&args.description).await {
                    Ok(url) => {
                        self.points += IMAGE_REWARD_POINTS;
                        SESSION_POINTS_AWARDED.click();
                        let text = format!(
                            "Here is your picture of {}! 🎨\n\nGreat job, {}! You earned {IMAGE_REWARD_POINTS} points. 🎉",
                            args.description,
                            profile.name(),
                        );
                        Message::assistant_with_image(text, url)
                    }
                    Err(err) => {
                        tracing::error!("image generation failed: {err}");
                        SESSION_TURN_FAILURES.click();
                        Message::assistant(IMAGE_APOLOGY)
                    }
                }
            }
            Ok(CompletionReply::FunctionCall { name, .. }) => {
                // Never dispatch a function we did not declare.
                tracing::warn!("completion requested undeclared function: {name}");
                SESSION_TURN_FAILURES.click();
                Message::assistant(COMPLETION_APOLOGY)
            }
            Err(err) => {
                tracing::error!("malformed completion response: {err}");
                SESSION_TURN_FAILURES.click();
                Message::assistant(COMPLETION_APOLOGY)
            }
        }
    }

    /// Builds the prompt: one system message parameterized by the profile,
    /// then the full history mapped speaker-for-role. Image references stay
    /// local; only text goes upstream.
    fn build_prompt(&self, profile: &Profile) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(ChatMessage::system(format!(
            "You are a friendly educational chatbot that helps children aged {MIN_AGE} to {MAX_AGE}. \
             Reply clearly and simply, in language appropriate for their age, and use emojis when it helps. \
             The child you are talking to is named {}, is {} years old, and loves {}. \
             If they ask for a picture or a drawing, you can call the '{GENERATE_IMAGE_FUNCTION}' function.",
            profile.name(),
            profile.age(),
            profile.topic(),
        )));
        for message in &self.history {
            messages.push(match message.speaker {
                Speaker::User => ChatMessage::user(message.text.clone()),
                Speaker::Assistant => ChatMessage::assistant(message.text.clone()),
            });
        }
        messages
    }

    async fn generate_image(&self, description: &str) -> Result<Url> {
        let params = ImageGenerationParams::new(self.config.image_model.clone(), description);
        let generation = self.images.create_image(params).await?;
        let url = generation
            .into_url()
            .ok_or_else(|| Error::serialization("image response contained no URL", None))?;
        tracing::info!("generated image: {url}");
        Ok(url)
    }
}

/// The single function declared on every completion request.
fn generate_image_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new(
        GENERATE_IMAGE_FUNCTION,
        "Generates an image from the provided description.",
        json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "Description of the image to generate."
                }
            },
            "required": ["description"]
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::types::{
        ChatCompletion, ChatRole, CompletionChoice, CompletionMessage, FunctionCall,
        GeneratedImage, ImageGeneration,
    };

    struct ScriptedChat {
        replies: Mutex<VecDeque<Result<ChatCompletion>>>,
        requests: Mutex<Vec<ChatCompletionParams>>,
    }

    impl ScriptedChat {
        fn new(replies: Vec<Result<ChatCompletion>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self::new(Vec::new())
        }
    }

    #[async_trait::async_trait]
    impl ChatService for ScriptedChat {
        async fn create_chat_completion(
            &self,
            params: ChatCompletionParams,
        ) -> Result<ChatCompletion> {
            self.requests.lock().unwrap().push(params);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected chat completion request")
        }
    }

    struct ScriptedImages {
        replies: Mutex<VecDeque<Result<ImageGeneration>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedImages {
        fn new(replies: Vec<Result<ImageGeneration>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self::new(Vec::new())
        }
    }

    #[async_trait::async_trait]
    impl ImageService for ScriptedImages {
        async fn create_image(&self, params: ImageGenerationParams) -> Result<ImageGeneration> {
            self.prompts.lock().unwrap().push(params.prompt);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected image generation request")
        }
    }

    fn text_completion(text: &str) -> ChatCompletion {
        ChatCompletion {
            id: "chatcmpl-test".to_string(),
            model: "gpt-4o-2024-08-06".to_string(),
            choices: vec![CompletionChoice {
                index: 0,
                message: CompletionMessage {
                    content: Some(text.to_string()),
                    function_call: None,
                },
                finish_reason: None,
            }],
        }
    }

    fn function_completion(name: &str, arguments: &str) -> ChatCompletion {
        ChatCompletion {
            id: "chatcmpl-test".to_string(),
            model: "gpt-4o-2024-08-06".to_string(),
            choices: vec![CompletionChoice {
                index: 0,
                message: CompletionMessage {
                    content: None,
                    function_call: Some(FunctionCall {
                        name: name.to_string(),
                        arguments: arguments.to_string(),
                    }),
                },
                finish_reason: None,
            }],
        }
    }

    fn image_success(url: &str) -> ImageGeneration {
        ImageGeneration {
            created: 0,
            data: vec![GeneratedImage {
                url: Some(url.parse().unwrap()),
                revised_prompt: None,
            }],
        }
    }

    fn profile() -> Profile {
        Profile::new("Sofia", 9, Topic::Science).unwrap()
    }

    fn session(
        chat: ScriptedChat,
        images: ScriptedImages,
    ) -> ChatSession<ScriptedChat, ScriptedImages> {
        let mut session = ChatSession::with_services(chat, images, ChatConfig::default());
        session.set_profile(profile());
        session
    }

    #[tokio::test]
    async fn message_before_intake_is_a_noop() {
        let mut session = ChatSession::with_services(
            ScriptedChat::empty(),
            ScriptedImages::empty(),
            ChatConfig::default(),
        );

        assert!(session.send_message("hello").await.is_none());
        assert_eq!(session.message_count(), 0);
    }

    #[tokio::test]
    async fn whitespace_only_input_is_a_noop() {
        let mut session = session(ScriptedChat::empty(), ScriptedImages::empty());

        assert!(session.send_message("   ").await.is_none());
        assert_eq!(session.message_count(), 0);
        assert!(session.chat.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn text_turn_appends_one_user_and_one_assistant_message() {
        let chat = ScriptedChat::new(vec![Ok(text_completion("Volcanoes erupt! 🌋"))]);
        let mut session = session(chat, ScriptedImages::empty());

        let reply = session.send_message("  How do volcanoes work?  ").await;
        assert_eq!(reply.unwrap().text, "Volcanoes erupt! 🌋");

        assert_eq!(session.message_count(), 2);
        assert_eq!(session.history()[0], Message::user("How do volcanoes work?"));
        assert_eq!(session.points(), 0);
    }

    #[tokio::test]
    async fn history_grows_by_two_per_turn() {
        let chat = ScriptedChat::new(vec![
            Ok(text_completion("one")),
            Ok(text_completion("two")),
            Ok(text_completion("three")),
        ]);
        let mut session = session(chat, ScriptedImages::empty());

        for (i, input) in ["a", "b", "c"].iter().enumerate() {
            session.send_message(input).await;
            assert_eq!(session.message_count(), 2 * (i + 1));
        }
    }

    #[tokio::test]
    async fn prompt_is_system_message_plus_history() {
        let chat = ScriptedChat::new(vec![
            Ok(text_completion("first")),
            Ok(text_completion("second")),
        ]);
        let mut session = session(chat, ScriptedImages::empty());

        session.send_message("hello").await;
        session.send_message("again").await;

        let requests = session.chat.requests.lock().unwrap();
        let prompt = &requests[1].messages;
        assert_eq!(prompt.len(), 4); // system + 3 history messages
        assert_eq!(prompt[0].role, ChatRole::System);
        assert!(prompt[0].content.contains("Sofia"));
        assert!(prompt[0].content.contains("science"));
        assert_eq!(prompt[1].role, ChatRole::User);
        assert_eq!(prompt[2].role, ChatRole::Assistant);
        assert_eq!(prompt[3].content, "again");
    }

    #[tokio::test]
    async fn function_call_generates_image_and_rewards_points() {
        let chat = ScriptedChat::new(vec![Ok(function_completion(
            GENERATE_IMAGE_FUNCTION,
            r#"{"description": "a red dragon"}"#,
        ))]);
        let images = ScriptedImages::new(vec![Ok(image_success(
            "https://images.example.com/dragon.png",
        ))]);
        let mut session = session(chat, images);

        let reply = session.send_message("draw me a dragon").await.unwrap();
        assert!(reply.text.contains("a red dragon"));
        assert!(reply.text.contains("10 points"));
        assert!(reply.image.is_some());

        assert_eq!(session.points(), IMAGE_REWARD_POINTS);
        assert_eq!(
            session.images.prompts.lock().unwrap().as_slice(),
            ["a red dragon"]
        );
    }

    #[tokio::test]
    async fn completion_error_appends_apology() {
        let chat = ScriptedChat::new(vec![Err(Error::rate_limit("quota exceeded", None))]);
        let mut session = session(chat, ScriptedImages::empty());

        let reply = session.send_message("hello").await.unwrap();
        assert_eq!(reply.text, COMPLETION_APOLOGY);
        assert!(reply.image.is_none());
        assert_eq!(session.points(), 0);
        assert_eq!(session.message_count(), 2);
    }

    #[tokio::test]
    async fn image_error_appends_image_apology_without_reward() {
        let chat = ScriptedChat::new(vec![Ok(function_completion(
            GENERATE_IMAGE_FUNCTION,
            r#"{"description": "a red dragon"}"#,
        ))]);
        let images = ScriptedImages::new(vec![Err(Error::service_unavailable("busy", None))]);
        let mut session = session(chat, images);

        let reply = session.send_message("draw me a dragon").await.unwrap();
        assert_eq!(reply.text, IMAGE_APOLOGY);
        assert!(reply.image.is_none());
        assert_eq!(session.points(), 0);
    }

    #[tokio::test]
    async fn image_response_without_url_appends_image_apology() {
        let chat = ScriptedChat::new(vec![Ok(function_completion(
            GENERATE_IMAGE_FUNCTION,
            r#"{"description": "a cat"}"#,
        ))]);
        let images = ScriptedImages::new(vec![Ok(ImageGeneration {
            created: 0,
            data: Vec::new(),
        })]);
        let mut session = session(chat, images);

        let reply = session.send_message("draw me a cat").await.unwrap();
        assert_eq!(reply.text, IMAGE_APOLOGY);
        assert_eq!(session.points(), 0);
    }

    #[tokio::test]
    async fn undeclared_function_degrades_to_apology() {
        let chat = ScriptedChat::new(vec![Ok(function_completion("send_email", "{}"))]);
        let mut session = session(chat, ScriptedImages::empty());

        let reply = session.send_message("hello").await.unwrap();
        assert_eq!(reply.text, COMPLETION_APOLOGY);
        assert_eq!(session.points(), 0);
        assert!(session.images.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_arguments_degrade_to_apology() {
        let chat = ScriptedChat::new(vec![Ok(function_completion(
            GENERATE_IMAGE_FUNCTION,
            "not json",
        ))]);
        let mut session = session(chat, ScriptedImages::empty());

        let reply = session.send_message("draw me a dog").await.unwrap();
        assert_eq!(reply.text, COMPLETION_APOLOGY);
        assert!(session.images.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_keeps_profile_and_points() {
        let chat = ScriptedChat::new(vec![Ok(function_completion(
            GENERATE_IMAGE_FUNCTION,
            r#"{"description": "a star"}"#,
        ))]);
        let images = ScriptedImages::new(vec![Ok(image_success(
            "https://images.example.com/star.png",
        ))]);
        let mut session = session(chat, images);

        session.send_message("draw a star").await;
        assert_eq!(session.points(), IMAGE_REWARD_POINTS);

        session.clear();
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.points(), IMAGE_REWARD_POINTS);
        assert!(session.profile().is_some());
    }

    #[tokio::test]
    async fn reading_state_never_mutates_it() {
        let chat = ScriptedChat::new(vec![Ok(text_completion("hi"))]);
        let mut session = session(chat, ScriptedImages::empty());
        session.send_message("hello").await;

        let before = session.stats();
        let _ = session.history();
        let _ = session.points();
        assert_eq!(session.stats(), before);
        assert_eq!(session.message_count(), 2);
    }
}
