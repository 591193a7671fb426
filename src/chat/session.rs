//! Core chat shell.
//!
//! This module provides the `ChatSession` struct, which owns the backend
//! connection and the one session identifier of a run, and `run_shell`,
//! which drives it from a line source.
//!
//! The shell starts by checking the backend's health and allocating a
//! session.  If either fails the run ends with [`EXIT_STARTUP_FAILED`].
//! After that every failure is printed and the loop carries on.

use std::path::Path;

use crate::chat::commands::{ChatCommand, ShellInput, classify_input, help_text};
use crate::chat::input::{LineSource, ReadLine};
use crate::chat::render::Renderer;
use crate::client::AgentApi;
use crate::error::Result;
use crate::observability::{SHELL_CHAT_TURNS, SHELL_COMMANDS, SHELL_ERRORS};
use crate::types::ChatRequest;

/// Exit status after `exit` or end of input.
pub const EXIT_OK: u8 = 0;

/// Exit status when the backend could not be used at startup.
pub const EXIT_STARTUP_FAILED: u8 = 1;

/// Prompt shown before each line of input.
pub const PROMPT: &str = "You: ";

const FAREWELL: &str = "Bye!";
const CLEARED: &str = "Session cleared.";

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Leave the loop.
    Exit,
}

/// A running chat shell bound to one backend session.
///
/// The session identifier is fixed when the shell starts and is reused for
/// every later call, including after `clear`.
pub struct ChatSession<A: AgentApi> {
    api: A,
    session_id: String,
}

impl<A: AgentApi> ChatSession<A> {
    /// Checks the backend's health and allocates a session.
    ///
    /// Prints the ready banner and the session identifier on success.  On a
    /// failed health check the backend is reported unreachable; a failed
    /// session allocation is printed as an error.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever of the two calls failed.
    pub async fn start(api: A, base_url: &str, renderer: &mut dyn Renderer) -> Result<Self> {
        let health = match api.health().await {
            Ok(health) => health,
            Err(err) => {
                renderer.print_unreachable(base_url, &err.to_string());
                return Err(err);
            }
        };
        renderer.print_ready(&health);

        let session_id = match api.new_session().await {
            Ok(session_id) => session_id,
            Err(err) => {
                renderer.print_error(&err.to_string());
                return Err(err);
            }
        };
        renderer.print_session(&session_id, help_text());

        Ok(Self { api, session_id })
    }

    /// The identifier of this run's session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The backend this shell talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Uploads a file into the session and prints the backend's summary.
    ///
    /// Failures are printed, not returned.
    pub async fn upload(&mut self, path: &Path, renderer: &mut dyn Renderer) {
        match self.api.upload_file(&self.session_id, path).await {
            Ok(upload) => renderer.print_upload(&upload),
            Err(err) => {
                SHELL_ERRORS.click();
                renderer.print_error(&err.to_string());
            }
        }
    }

    /// Handles one line of input.
    ///
    /// Whitespace-only lines do nothing.  `exit` prints a farewell and
    /// returns [`Flow::Exit`]; every other line returns [`Flow::Continue`],
    /// with any backend error already printed.
    pub async fn handle_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> Flow {
        let result = match classify_input(line) {
            ShellInput::Empty => return Flow::Continue,
            ShellInput::Command(ChatCommand::Exit) => {
                SHELL_COMMANDS.click();
                renderer.print_info(FAREWELL);
                return Flow::Exit;
            }
            ShellInput::Command(ChatCommand::History) => {
                SHELL_COMMANDS.click();
                self.show_history(renderer).await
            }
            ShellInput::Command(ChatCommand::Clear) => {
                SHELL_COMMANDS.click();
                self.clear(renderer).await
            }
            ShellInput::Message(message) => {
                SHELL_CHAT_TURNS.click();
                self.send(message, renderer).await
            }
        };
        if let Err(err) = result {
            SHELL_ERRORS.click();
            renderer.print_error(&err.to_string());
        }
        Flow::Continue
    }

    async fn show_history(&self, renderer: &mut dyn Renderer) -> Result<()> {
        let history = self.api.get_history(&self.session_id).await?;
        renderer.print_history(&history);
        Ok(())
    }

    async fn clear(&self, renderer: &mut dyn Renderer) -> Result<()> {
        self.api.clear_session(&self.session_id).await?;
        renderer.print_info(CLEARED);
        Ok(())
    }

    async fn send(&self, message: &str, renderer: &mut dyn Renderer) -> Result<()> {
        let request = ChatRequest::new(self.session_id.clone(), message).with_use_search(true);
        let response = self.api.chat(request).await?;
        renderer.print_reply(&response);
        Ok(())
    }
}

/// Runs the whole shell: startup, optional upload, then the input loop.
///
/// Returns the process exit status: [`EXIT_STARTUP_FAILED`] if startup
/// failed, otherwise [`EXIT_OK`] once the user exits or input ends.
pub async fn run_shell<A: AgentApi>(
    api: A,
    base_url: &str,
    upload: Option<&Path>,
    input: &mut dyn LineSource,
    renderer: &mut dyn Renderer,
) -> u8 {
    let mut session = match ChatSession::start(api, base_url, renderer).await {
        Ok(session) => session,
        Err(_) => return EXIT_STARTUP_FAILED,
    };

    if let Some(path) = upload {
        session.upload(path, renderer).await;
    }

    loop {
        match input.read_line(PROMPT) {
            Ok(ReadLine::Line(line)) => {
                if session.handle_line(&line, renderer).await == Flow::Exit {
                    break;
                }
            }
            Ok(ReadLine::Interrupted) => {
                renderer.print_info("");
            }
            Ok(ReadLine::Eof) => {
                renderer.print_info(FAREWELL);
                break;
            }
            Err(err) => {
                renderer.print_error(&err.to_string());
                break;
            }
        }
    }

    EXIT_OK
}
