//! Chat application module for the kids' tutoring assistant.
//!
//! This module provides the session layer on top of the maestro client
//! library. It supports:
//!
//! - Profile intake (name, age, favorite topic) gating the chat flow
//! - Turn processing with image function-call dispatch and reward points
//! - Slash commands for session control
//! - Configurable models and sampling parameters
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`profile`]: the intake profile and the fixed topic set
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: conversation state and the turn processor
//! - [`commands`]: slash command parsing and handling
//! - [`render`]: output rendering

mod commands;
mod config;
mod profile;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use profile::{DEFAULT_AGE, MAX_AGE, MIN_AGE, Profile, Topic};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{
    COMPLETION_APOLOGY, ChatSession, GENERATE_IMAGE_FUNCTION, IMAGE_APOLOGY, IMAGE_REWARD_POINTS,
    Message, SessionStats, Speaker,
};
