//! Parsing of interactive input lines.

use showcase_core::UiEvent;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  nav <section>            dashboard | api-explorer | demo | docs
  tab <tab>                users | api-tester | code (demo only)
  back | forward           walk the navigation history
  <METHOD> <path> [body]   simulate a request, e.g. GET /api/users/1
  add <name> <email>       create a user
  rename <id> <name>       rename a user
  rm <id>                  delete a user
  users                    print every user record
  help                     show this text
  quit                     leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Users,
    Help,
    Quit,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a user id: {0}")]
    BadId(String),

    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
}

/// Parse one line of input.
///
/// Anything that is not a keyword but looks like `WORD /path` is treated as
/// a request, so unsupported methods still reach the backend and come back
/// as 405.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "" => Ok(Command::Blank),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "users" => Ok(Command::Users),
        "back" => Ok(Command::Event(UiEvent::HistoryBack)),
        "forward" => Ok(Command::Event(UiEvent::HistoryForward)),
        "nav" => single_arg(rest, "nav <section>")
            .map(|name| Command::Event(UiEvent::NavigateSection(name.to_string()))),
        "tab" => single_arg(rest, "tab <tab>")
            .map(|name| Command::Event(UiEvent::NavigateTab(name.to_string()))),
        "add" => {
            // Names may contain spaces; the email is the last word.
            let (name, email) = rest
                .rsplit_once(char::is_whitespace)
                .ok_or(CommandError::Usage("add <name> <email>"))?;
            Ok(Command::Event(UiEvent::CreateUser {
                name: name.trim().to_string(),
                email: email.to_string(),
            }))
        }
        "rename" => {
            let (id, name) = rest
                .split_once(char::is_whitespace)
                .ok_or(CommandError::Usage("rename <id> <name>"))?;
            Ok(Command::Event(UiEvent::RenameUser {
                id: parse_id(id)?,
                name: name.trim().to_string(),
            }))
        }
        "rm" => {
            let id = single_arg(rest, "rm <id>")?;
            Ok(Command::Event(UiEvent::DeleteUser { id: parse_id(id)? }))
        }
        method if is_request(method, rest) => {
            let (path, body) = match rest.split_once(char::is_whitespace) {
                Some((path, body)) => (path, Some(body.trim().to_string())),
                None => (rest, None),
            };
            Ok(Command::Event(UiEvent::Request {
                method: method.to_string(),
                path: path.to_string(),
                body,
            }))
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn single_arg<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(CommandError::Usage(usage));
    }
    Ok(rest)
}

fn parse_id(raw: &str) -> Result<u64, CommandError> {
    raw.parse().map_err(|_| CommandError::BadId(raw.to_string()))
}

fn is_request(method: &str, rest: &str) -> bool {
    method.chars().all(|c| c.is_ascii_alphabetic()) && rest.starts_with('/')
}
