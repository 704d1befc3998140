//! Parsing of input lines into client commands.
//!
//! This module contains pure functions without side effects, making them easy to test.

use crate::error::ClientError;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text message
    Text(String),
    /// `/image <url> [caption]`
    Image { url: String, caption: String },
    /// `/name <new name>`
    Rename(String),
    /// `/quit`
    Quit,
}

impl Command {
    /// Parse a trimmed, non-empty input line.
    ///
    /// Lines that do not start with `/` are sent verbatim as text. Unknown
    /// slash commands and missing arguments are reported as errors.
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Text(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "image" => {
                let (url, caption) = match args.split_once(char::is_whitespace) {
                    Some((url, caption)) => (url, caption.trim()),
                    None => (args, ""),
                };
                if url.is_empty() {
                    return Err(ClientError::InvalidCommand(
                        "usage: /image <url> [caption]".to_string(),
                    ));
                }
                Ok(Command::Image {
                    url: url.to_string(),
                    caption: caption.to_string(),
                })
            }
            "name" => {
                if args.is_empty() {
                    return Err(ClientError::InvalidCommand(
                        "usage: /name <new name>".to_string(),
                    ));
                }
                Ok(Command::Rename(args.to_string()))
            }
            "quit" => Ok(Command::Quit),
            other => Err(ClientError::InvalidCommand(format!(
                "unknown command '/{}'",
                other
            ))),
        }
    }
}
