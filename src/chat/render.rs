//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction so the shell can
//! print to a terminal or, in tests, to an in-memory buffer.  The plain text
//! renderer optionally colors errors and sources with ANSI escape codes.

use std::io::{self, Stderr, Stdout, Write};

use crate::types::{ChatResponse, HealthResponse, HistoryResponse, Message, UploadResponse};

/// Number of characters of each message shown by `history`.
pub const HISTORY_PREVIEW_CHARS: usize = 120;

/// Marker appended to every history preview.
pub const ELLIPSIS: &str = "...";

/// Number of sources printed after a reply.
pub const MAX_SOURCES: usize = 3;

const SOURCES_LABEL: &str = "Sources: ";
const SOURCES_INDENT: &str = "         ";

/// ANSI escape code for dim text (used for sources).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for cyan text (used for the assistant label).
const ANSI_CYAN: &str = "\x1b[36m";

/// The first [`HISTORY_PREVIEW_CHARS`] characters of `content` followed by
/// [`ELLIPSIS`].
///
/// The marker is appended even when nothing was cut off.
pub fn history_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(HISTORY_PREVIEW_CHARS).collect();
    preview.push_str(ELLIPSIS);
    preview
}

/// One line of `history` output.
pub fn format_history_line(message: &Message) -> String {
    format!("[{}] {}", message.role, history_preview(&message.content))
}

/// The sources block printed after a reply, or `None` if there are no sources.
///
/// At most [`MAX_SOURCES`] entries are shown, one per line, aligned under
/// the first.
pub fn format_sources(sources: &[String]) -> Option<String> {
    if sources.is_empty() {
        return None;
    }
    let shown: Vec<&str> = sources
        .iter()
        .take(MAX_SOURCES)
        .map(String::as_str)
        .collect();
    let separator = format!("\n{SOURCES_INDENT}");
    Some(format!("{SOURCES_LABEL}{}", shown.join(separator.as_str())))
}

/// Trait for rendering shell output.
pub trait Renderer: Send {
    /// Announce that the backend is healthy.
    fn print_ready(&mut self, health: &HealthResponse);

    /// Show the session identifier and the usage hint.
    fn print_session(&mut self, session_id: &str, hint: &str);

    /// Print an agent reply and its sources.
    fn print_reply(&mut self, response: &ChatResponse);

    /// Print a session's history.
    fn print_history(&mut self, history: &HistoryResponse);

    /// Print the result of a file upload.
    fn print_upload(&mut self, upload: &UploadResponse);

    /// Report that the backend could not be reached at startup.
    fn print_unreachable(&mut self, base_url: &str, error: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Regular output goes to one writer and errors to another; by default
/// these are stdout and stderr.  Write failures are ignored, as there is
/// nowhere left to report them.
pub struct PlainTextRenderer<O: Write + Send = Stdout, E: Write + Send = Stderr> {
    out: O,
    err: E,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writers(io::stdout(), io::stderr(), use_color)
    }
}

impl<O: Write + Send, E: Write + Send> PlainTextRenderer<O, E> {
    /// Creates a renderer over arbitrary writers.
    pub fn with_writers(out: O, err: E, use_color: bool) -> Self {
        Self {
            out,
            err,
            use_color,
        }
    }

    /// Returns the regular and error writers.
    pub fn get_ref(&self) -> (&O, &E) {
        (&self.out, &self.err)
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }
}

impl<O: Write + Send, E: Write + Send> Renderer for PlainTextRenderer<O, E> {
    fn print_ready(&mut self, health: &HealthResponse) {
        self.line("");
        self.line(&format!("Kimi Agent ready (model: {})", health.model));
        self.line("");
        self.flush();
    }

    fn print_session(&mut self, session_id: &str, hint: &str) {
        self.line(&format!("Session: {session_id}"));
        self.line(hint);
        self.line("");
        self.flush();
    }

    fn print_reply(&mut self, response: &ChatResponse) {
        if self.use_color {
            self.line(&format!("{ANSI_CYAN}Kimi:{ANSI_RESET} {}", response.reply));
        } else {
            self.line(&format!("Kimi: {}", response.reply));
        }
        if let Some(sources) = format_sources(response.sources()) {
            self.line("");
            if self.use_color {
                self.line(&format!("{ANSI_DIM}{sources}{ANSI_RESET}"));
            } else {
                self.line(&sources);
            }
        }
        self.line("");
        self.flush();
    }

    fn print_history(&mut self, history: &HistoryResponse) {
        self.line("");
        self.line(&format!("--- History ({} messages) ---", history.total));
        for message in &history.messages {
            self.line(&format_history_line(message));
        }
        self.line("---");
        self.line("");
        self.flush();
    }

    fn print_upload(&mut self, upload: &UploadResponse) {
        self.line(&format!("Uploaded {}: {}", upload.file_name, upload.message));
        self.line(&upload.summary);
        self.line("");
        self.flush();
    }

    fn print_unreachable(&mut self, base_url: &str, error: &str) {
        let _ = writeln!(self.err, "Cannot reach API at {base_url}");
        let _ = writeln!(self.err, "   {error}");
        let _ = writeln!(
            self.err,
            "   Make sure the backend is running: uvicorn main:app --reload"
        );
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        let _ = self.out.flush();
        if self.use_color {
            let _ = writeln!(self.err, "{ANSI_RED}Error:{ANSI_RESET} {error}");
        } else {
            let _ = writeln!(self.err, "Error: {error}");
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.line(info);
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn buffered() -> PlainTextRenderer<Vec<u8>, Vec<u8>> {
        PlainTextRenderer::with_writers(Vec::new(), Vec::new(), false)
    }

    fn stdout_of(renderer: &PlainTextRenderer<Vec<u8>, Vec<u8>>) -> String {
        String::from_utf8(renderer.get_ref().0.clone()).unwrap()
    }

    fn stderr_of(renderer: &PlainTextRenderer<Vec<u8>, Vec<u8>>) -> String {
        String::from_utf8(renderer.get_ref().1.clone()).unwrap()
    }

    fn sources(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://example.com/{i}")).collect()
    }

    #[test]
    fn renderer_with_color() {
        let renderer = PlainTextRenderer::with_color(true);
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn long_content_is_cut_at_120_chars() {
        let content = "x".repeat(200);
        let preview = history_preview(&content);
        assert_eq!(preview, format!("{}...", "x".repeat(120)));
    }

    #[test]
    fn short_content_still_gets_ellipsis() {
        assert_eq!(history_preview("hello"), "hello...");
        assert_eq!(history_preview(""), "...");
        let exact = "y".repeat(120);
        assert_eq!(history_preview(&exact), format!("{exact}..."));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let content = "é".repeat(130);
        let preview = history_preview(&content);
        assert_eq!(preview.chars().count(), 123);
        assert!(preview.starts_with(&"é".repeat(120)));
    }

    #[test]
    fn history_line_shows_role() {
        let message = Message::new(Role::Assistant, "hi there");
        assert_eq!(format_history_line(&message), "[assistant] hi there...");
    }

    #[test]
    fn no_sources_no_block() {
        assert_eq!(format_sources(&[]), None);
    }

    #[test]
    fn only_three_sources_shown() {
        let block = format_sources(&sources(5)).unwrap();
        assert_eq!(
            block,
            "Sources: https://example.com/1\n         https://example.com/2\n         https://example.com/3"
        );
        assert!(!block.contains("example.com/4"));
    }

    #[test]
    fn reply_without_sources() {
        let mut renderer = buffered();
        renderer.print_reply(&ChatResponse::new("sess-1", "hi there"));
        assert_eq!(stdout_of(&renderer), "Kimi: hi there\n\n");
    }

    #[test]
    fn reply_with_sources() {
        let mut renderer = buffered();
        renderer.print_reply(&ChatResponse::new("sess-1", "answer").with_sources(sources(2)));
        assert_eq!(
            stdout_of(&renderer),
            "Kimi: answer\n\nSources: https://example.com/1\n         https://example.com/2\n\n"
        );
    }

    #[test]
    fn history_block() {
        let mut renderer = buffered();
        renderer.print_history(&HistoryResponse {
            session_id: "sess-1".to_string(),
            messages: vec![
                Message::new(Role::User, "hello"),
                Message::new(Role::Assistant, "a".repeat(150)),
            ],
            total: 2,
        });
        let expected = format!(
            "\n--- History (2 messages) ---\n[user] hello...\n[assistant] {}...\n---\n\n",
            "a".repeat(120)
        );
        assert_eq!(stdout_of(&renderer), expected);
    }

    #[test]
    fn errors_go_to_error_writer() {
        let mut renderer = buffered();
        renderer.print_error("Session not found. (status 404)");
        assert_eq!(stdout_of(&renderer), "");
        assert_eq!(stderr_of(&renderer), "Error: Session not found. (status 404)\n");
    }

    #[test]
    fn unreachable_names_base_url() {
        let mut renderer = buffered();
        renderer.print_unreachable("http://localhost:8000", "Connection error: refused");
        let err = stderr_of(&renderer);
        assert!(err.starts_with("Cannot reach API at http://localhost:8000\n"));
        assert!(err.contains("uvicorn"));
    }

    #[test]
    fn colored_error_is_styled() {
        let mut renderer = PlainTextRenderer::with_writers(Vec::new(), Vec::new(), true);
        renderer.print_error("boom");
        let err = String::from_utf8(renderer.get_ref().1.clone()).unwrap();
        assert_eq!(err, format!("{ANSI_RED}Error:{ANSI_RESET} boom\n"));
    }
}
