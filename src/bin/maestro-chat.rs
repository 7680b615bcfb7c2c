//! Interactive chat application for kids, backed by the OpenAI API.
//!
//! This binary collects a short profile (name, age, favorite topic) and
//! then runs a REPL chat loop. The model may answer in text or ask for an
//! image to be generated; successful images earn reward points.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! maestro-chat
//!
//! # Specify the chat and image models
//! maestro-chat --model gpt-4o-mini --image-model dall-e-2
//!
//! # Disable colors (useful for piping output)
//! maestro-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the chat model
//! - `/image_model <name>` - Change the image model
//! - `/transcript` - Re-print the whole conversation
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use maestro::Model;
use maestro::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, DEFAULT_AGE, MAX_AGE, MIN_AGE,
    PlainTextRenderer, Profile, Renderer, SessionStats, Topic, help_text, parse_command,
};
use maestro::client::OpenAi;

/// Main entry point for the maestro-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (args, _) = ChatArgs::from_command_line_relaxed("maestro-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = OpenAi::new(None)?;
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    println!("🎓 Maestro — a friendly chatbot for learning and exploring.\n");

    let Some(profile) = collect_profile(&mut rl)? else {
        println!("\nGoodbye!");
        return Ok(());
    };
    println!(
        "\nThanks, {}! Let's learn about {}. 🎉",
        profile.name(),
        profile.topic()
    );
    session.set_profile(profile);

    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            let model = model_name
                                .parse()
                                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
                            session.set_model(model);
                            renderer.print_info(&format!("Model changed to: {}", model_name));
                        }
                        ChatCommand::ImageModel(model_name) => {
                            let model = model_name
                                .parse()
                                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
                            session.set_image_model(model);
                            renderer
                                .print_info(&format!("Image model changed to: {}", model_name));
                        }
                        ChatCommand::Transcript => {
                            for message in session.history() {
                                renderer.print_message(message);
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session.stats());
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - process the turn
                if let Some(reply) = session.send_message(line).await {
                    renderer.print_message(reply);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Prompts for name, age, and favorite topic.
///
/// An empty name silently re-prompts; an empty age takes the default;
/// unparseable age or topic input re-prompts. Returns `None` on EOF.
fn collect_profile(rl: &mut DefaultEditor) -> Result<Option<Profile>, Box<dyn std::error::Error>> {
    println!("Hi! Tell me a little about yourself.");
    loop {
        let Some(name) = prompt_line(rl, "What's your name? ")? else {
            return Ok(None);
        };
        if name.trim().is_empty() {
            continue;
        }
        let Some(age) = prompt_age(rl)? else {
            return Ok(None);
        };
        let Some(topic) = prompt_topic(rl)? else {
            return Ok(None);
        };
        match Profile::new(name, age, topic) {
            Ok(profile) => return Ok(Some(profile)),
            Err(_) => continue,
        }
    }
}

fn prompt_line(
    rl: &mut DefaultEditor,
    prompt: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => return Ok(Some(line)),
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(Box::new(err)),
        }
    }
}

fn prompt_age(rl: &mut DefaultEditor) -> Result<Option<u8>, Box<dyn std::error::Error>> {
    let prompt = format!("How old are you? [{DEFAULT_AGE}] ");
    loop {
        let Some(line) = prompt_line(rl, &prompt)? else {
            return Ok(None);
        };
        match interpret_age(&line) {
            Some(age) => return Ok(Some(age)),
            None => println!("Please enter a number between {MIN_AGE} and {MAX_AGE}."),
        }
    }
}

fn prompt_topic(rl: &mut DefaultEditor) -> Result<Option<Topic>, Box<dyn std::error::Error>> {
    println!("What's your favorite topic to learn about?");
    for (i, topic) in Topic::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, topic);
    }
    loop {
        let Some(line) = prompt_line(rl, "Pick a number or a name: ")? else {
            return Ok(None);
        };
        match interpret_topic(&line) {
            Some(topic) => return Ok(Some(topic)),
            None => println!("Please pick one of the listed topics."),
        }
    }
}

/// Interprets one line of age input: empty takes the default, a number is
/// accepted as typed, anything else re-prompts.
fn interpret_age(line: &str) -> Option<u8> {
    let line = line.trim();
    if line.is_empty() {
        return Some(DEFAULT_AGE);
    }
    line.parse::<u8>().ok()
}

/// Interprets one line of topic input as a 1-based menu index or a topic
/// name; anything else re-prompts.
fn interpret_topic(line: &str) -> Option<Topic> {
    let line = line.trim();
    if let Ok(index) = line.parse::<usize>() {
        if (1..=Topic::ALL.len()).contains(&index) {
            return Some(Topic::ALL[index - 1]);
        }
    }
    line.parse::<Topic>().ok()
}

fn print_stats(stats: &SessionStats) {
    println!("    Session Statistics:");
    if let Some(name) = stats.name.as_deref() {
        println!("      Name: {}", name);
    }
    if let Some(age) = stats.age {
        println!("      Age: {}", age);
    }
    if let Some(topic) = stats.topic {
        println!("      Favorite topic: {}", topic);
    }
    println!("      Points: {} ⭐", stats.points);
    println!("      Messages: {}", stats.message_count);
    println!("      Model: {}", stats.model);
    println!("      Image model: {}", stats.image_model);
    println!("      Max tokens: {}", stats.max_tokens);
    println!("      Temperature: {:.2}", stats.temperature);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_age_takes_default() {
        assert_eq!(interpret_age(""), Some(DEFAULT_AGE));
        assert_eq!(interpret_age("   "), Some(DEFAULT_AGE));
    }

    #[test]
    fn numeric_age_accepted_as_typed() {
        assert_eq!(interpret_age("9"), Some(9));
        assert_eq!(interpret_age("  12 "), Some(12));
        // Out-of-range values are accepted here; Profile::new clamps them.
        assert_eq!(interpret_age("42"), Some(42));
    }

    #[test]
    fn unparseable_age_reprompts() {
        assert_eq!(interpret_age("nine"), None);
        assert_eq!(interpret_age("-3"), None);
        assert_eq!(interpret_age("7.5"), None);
    }

    #[test]
    fn topic_by_menu_index() {
        assert_eq!(interpret_topic("1"), Some(Topic::ALL[0]));
        assert_eq!(interpret_topic("5"), Some(Topic::ALL[4]));
        assert_eq!(interpret_topic("0"), None);
        assert_eq!(interpret_topic("6"), None);
    }

    #[test]
    fn topic_by_name_case_insensitive() {
        assert_eq!(interpret_topic("science"), Some(Topic::Science));
        assert_eq!(interpret_topic("  Art "), Some(Topic::Art));
        assert_eq!(interpret_topic("READING"), Some(Topic::Reading));
    }

    #[test]
    fn unparseable_topic_reprompts() {
        assert_eq!(interpret_topic("dinosaurs"), None);
        assert_eq!(interpret_topic(""), None);
    }
}
