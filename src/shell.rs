//! Inspection Shell
//!
//! Line-oriented commands used by the `pokecache` binary to poke at a live
//! cache. Parsing and execution are kept here so they can be tested without
//! a terminal.

use serde_json::json;

use crate::cache::TtlCache;
use crate::error::ShellError;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  add <key> <value...>  store the rest of the line under <key>
  get <key>             print the value stored under <key>
  len                   print the number of entries
  stats                 print cache statistics as JSON
  help                  show this message
  exit                  stop the sweep task and quit";

// == Command ==
/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { key: String, value: String },
    Get { key: String },
    Len,
    Stats,
    Help,
    Exit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines. Command names are case-insensitive;
    /// keys and values are taken verbatim.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let (name, rest) = split_word(line);
        if name.is_empty() {
            return Ok(None);
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "add" => {
                let (key, value) = split_word(rest);
                if key.is_empty() || value.is_empty() {
                    return Err(ShellError::Usage("add <key> <value...>"));
                }
                Command::Add {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "get" => {
                let (key, _) = split_word(rest);
                if key.is_empty() {
                    return Err(ShellError::Usage("get <key>"));
                }
                Command::Get {
                    key: key.to_string(),
                }
            }
            "len" => Command::Len,
            "stats" => Command::Stats,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(ShellError::UnknownCommand(name.to_string())),
        };

        Ok(Some(command))
    }
}

/// Splits off the first whitespace-delimited word, returning it and the
/// trimmed remainder.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

// == Outcome ==
/// What the shell should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and read the next line
    Print(String),
    /// Leave the shell
    Exit,
}

/// Runs a command against the cache.
pub fn execute(cache: &TtlCache, command: Command) -> Outcome {
    match command {
        Command::Add { key, value } => {
            cache.add(key, value);
            Outcome::Print("OK".to_string())
        }
        Command::Get { key } => match cache.get(&key) {
            Some(value) => Outcome::Print(String::from_utf8_lossy(&value).into_owned()),
            None => Outcome::Print("(not found)".to_string()),
        },
        Command::Len => Outcome::Print(cache.len().to_string()),
        Command::Stats => {
            let stats = cache.stats();
            let report = json!({
                "ttl_ms": u64::try_from(cache.ttl().as_millis()).unwrap_or(u64::MAX),
                "state": cache.state(),
                "hit_rate": stats.hit_rate(),
                "stats": stats,
            });
            Outcome::Print(format!("{:#}", report))
        }
        Command::Help => Outcome::Print(HELP.to_string()),
        Command::Exit => Outcome::Exit,
    }
}
