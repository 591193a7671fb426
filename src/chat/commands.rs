//! Built-in command parsing for the chat shell.
//!
//! A handful of exact words control the shell instead of being sent to the
//! agent.  Everything else is a chat message.

/// A parsed shell command.
///
/// These commands are handled locally (or through a dedicated endpoint) and
/// are never sent to the agent as chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Leave the shell.
    Exit,

    /// Show the session's stored messages.
    History,

    /// Clear the session on the backend.
    Clear,
}

/// Classification of one line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellInput<'a> {
    /// Nothing but whitespace; prompt again.
    Empty,

    /// A built-in command.
    Command(ChatCommand),

    /// Text to send to the agent, already trimmed.
    Message(&'a str),
}

/// Parses user input for built-in commands.
///
/// Returns `Some(ChatCommand)` only when the trimmed input is exactly one of
/// the command words; matching is case-sensitive.
///
/// # Examples
///
/// ```
/// # use kimi_client::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("exit"), Some(ChatCommand::Exit));
/// assert_eq!(parse_command("  history "), Some(ChatCommand::History));
/// assert!(parse_command("clear the table").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    match input.trim() {
        "exit" => Some(ChatCommand::Exit),
        "history" => Some(ChatCommand::History),
        "clear" => Some(ChatCommand::Clear),
        _ => None,
    }
}

/// Classifies a raw input line.
pub fn classify_input(input: &str) -> ShellInput<'_> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ShellInput::Empty;
    }
    match parse_command(trimmed) {
        Some(command) => ShellInput::Command(command),
        None => ShellInput::Message(trimmed),
    }
}

/// Returns the one-line usage hint shown after startup.
pub fn help_text() -> &'static str {
    r#"Type "exit" to quit, "history" to view chat, "clear" to reset session."#
}
