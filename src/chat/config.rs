//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration the shell runs with.

use std::env;
use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::client::{API_BASE_URL_ENV, resolve_base_url};

/// Command-line arguments for the kimi-chat tool.
///
/// All of them are optional; started without arguments the shell talks to
/// `$API_BASE_URL` (or `http://localhost:8000`) with colors enabled.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend origin, overriding `API_BASE_URL`.
    #[arrrg(
        optional,
        "Backend base URL (default: $API_BASE_URL or http://localhost:8000)",
        "URL"
    )]
    pub base_url: Option<String>,

    /// File to upload into the new session before the prompt appears.
    #[arrrg(optional, "Upload a file into the session at startup", "PATH")]
    pub upload: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat shell.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// The backend origin the client is constructed with.
    pub base_url: String,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// A file to upload right after the session is created.
    pub upload: Option<PathBuf>,
}

impl ChatConfig {
    /// Resolves arguments against a value read from `API_BASE_URL`.
    ///
    /// `--base-url` wins over the environment, which wins over the default.
    pub fn from_args(args: ChatArgs, env_base_url: Option<String>) -> Self {
        ChatConfig {
            base_url: resolve_base_url(args.base_url, env_base_url),
            use_color: !args.no_color,
            upload: args.upload.map(PathBuf::from),
        }
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        Self::from_args(args, env::var(API_BASE_URL_ENV).ok())
    }
}
