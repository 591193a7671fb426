//! Line input for the chat shell.

use std::collections::VecDeque;
use std::io;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// The outcome of asking for one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    /// A line was entered.
    Line(String),

    /// Ctrl+C at the prompt.
    Interrupted,

    /// End of input (Ctrl+D or a closed stdin).
    Eof,
}

/// A blocking source of input lines.
pub trait LineSource {
    /// Show `prompt` and wait for the next line.
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadLine> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.add_history_entry(line.trim());
                }
                Ok(ReadLine::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(ReadlineError::Io(err)) => Err(Error::io("failed to read input", err)),
            Err(err) => Err(Error::io(
                format!("failed to read input: {err}"),
                io::Error::other(err.to_string()),
            )),
        }
    }
}

/// A fixed list of lines, followed by end of input.
///
/// Useful for driving the shell from a script or a test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates a source that yields `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The number of lines not yet read.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadLine> {
        Ok(match self.lines.pop_front() {
            Some(line) => ReadLine::Line(line),
            None => ReadLine::Eof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_in_order_then_eof() {
        let mut input = ScriptedInput::new(["hello", "exit"]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(
            input.read_line("You: ").unwrap(),
            ReadLine::Line("hello".to_string())
        );
        assert_eq!(
            input.read_line("You: ").unwrap(),
            ReadLine::Line("exit".to_string())
        );
        assert_eq!(input.read_line("You: ").unwrap(), ReadLine::Eof);
        assert_eq!(input.read_line("You: ").unwrap(), ReadLine::Eof);
    }
}
