//! Command parsing for the interactive lookup session

use crate::error::{LookupError, Result};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Suggest symbols for a free-text query
    Search { query: String },
    /// Show the profile of a symbol
    Quote { symbol: String },
    /// Select a suggestion from the last list (1-based)
    Pick { index: usize },
    /// Show help
    Help,
    /// Exit the session
    Exit,
}

impl Command {
    /// Parse a command from user input
    ///
    /// Input without a leading `/` is a search query.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(LookupError::CommandError("Empty input".to_string()));
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Search {
                query: input.to_string(),
            });
        };

        let parts: Vec<&str> = rest.split_whitespace().collect();
        if parts.is_empty() {
            return Err(LookupError::CommandError("Empty command".to_string()));
        }

        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "search" | "s" => {
                if args.is_empty() {
                    return Err(LookupError::CommandError(
                        "Missing query for search command".to_string(),
                    ));
                }
                Ok(Command::Search {
                    query: args.join(" "),
                })
            }
            "quote" | "q" => {
                let symbol = args.first().ok_or_else(|| {
                    LookupError::CommandError("Missing symbol for quote command".to_string())
                })?;
                Ok(Command::Quote {
                    symbol: symbol.to_uppercase(),
                })
            }
            "pick" | "p" => {
                let raw = args.first().ok_or_else(|| {
                    LookupError::CommandError("Missing number for pick command".to_string())
                })?;
                match raw.parse::<usize>() {
                    Ok(index) if index >= 1 => Ok(Command::Pick { index }),
                    _ => Err(LookupError::CommandError(format!(
                        "Invalid suggestion number: {raw}"
                    ))),
                }
            }
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" => Ok(Command::Exit),
            _ => Err(LookupError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"
Stock Lookup Commands
=====================

  <text>             Suggest symbols matching the text
  /search <text>     Same as typing the text
  /pick <n>          Show the profile of suggestion n
  /quote <symbol>    Show the profile of a symbol
  /help              Show help
  /exit              Exit

Command Aliases:
  /s = /search   /p = /pick   /q = /quote   /h = /help   /quit = /exit
"#
    }
}
