//! Interactive chat client for a Kimi agent backend.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the backend at $API_BASE_URL (default http://localhost:8000)
//! kimi-chat
//!
//! # Point at another backend
//! kimi-chat --base-url http://10.0.0.5:8000
//!
//! # Upload a document into the session before chatting
//! kimi-chat --upload report.pdf
//!
//! # Disable colors (useful for piping output)
//! kimi-chat --no-color
//! ```
//!
//! # Commands
//!
//! - `exit` - Leave the shell
//! - `history` - Show the session's messages
//! - `clear` - Clear the session on the backend
//!
//! Anything else is sent to the agent.

use std::process::ExitCode;

use arrrg::CommandLine;
use rustyline::DefaultEditor;

use kimi_client::KimiClient;
use kimi_client::chat::{
    ChatArgs, ChatConfig, EXIT_STARTUP_FAILED, PlainTextRenderer, Renderer, run_shell,
};

/// Main entry point for the kimi-chat application.
#[tokio::main]
async fn main() -> ExitCode {
    let (args, _) = ChatArgs::from_command_line_relaxed("kimi-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);

    let client = match KimiClient::new(Some(config.base_url.clone())) {
        Ok(client) => client,
        Err(err) => {
            renderer.print_unreachable(&config.base_url, &err.to_string());
            return ExitCode::from(EXIT_STARTUP_FAILED);
        }
    };
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            renderer.print_error(&format!("Input error: {}", err));
            return ExitCode::from(EXIT_STARTUP_FAILED);
        }
    };

    let code = run_shell(
        client,
        &config.base_url,
        config.upload.as_deref(),
        &mut rl,
        &mut renderer,
    )
    .await;
    ExitCode::from(code)
}
