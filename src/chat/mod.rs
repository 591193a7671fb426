//! Interactive shell for conversations with a Kimi agent backend.
//!
//! This module provides the line-oriented REPL built on top of the client
//! library. It supports:
//!
//! - Chat turns with web search enabled
//! - The built-in commands `exit`, `history` and `clear`
//! - An optional file upload when the session starts
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: Built-in command parsing
//! - [`input`]: Line sources (rustyline or scripted)
//! - [`render`]: Output formatting
//! - [`session`]: Startup, dispatch and the read loop

mod commands;
mod config;
mod input;
mod render;
mod session;

pub use commands::{ChatCommand, ShellInput, classify_input, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use input::{LineSource, ReadLine, ScriptedInput};
pub use render::{
    ELLIPSIS, HISTORY_PREVIEW_CHARS, MAX_SOURCES, PlainTextRenderer, Renderer,
    format_history_line, format_sources, history_preview,
};
pub use session::{ChatSession, EXIT_OK, EXIT_STARTUP_FAILED, Flow, PROMPT, run_shell};
