//! Line input parsing.
//!
//! Every line read from the terminal becomes a [`UserInput`]: a question, a
//! fully-argumented [`Command`], or a usage error to show the user.

pub mod slash_command;

pub use slash_command::SlashCommand;

/// A slash command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Sessions,
    Switch(String),
    Delete(String),
    Docs,
    Doc(String),
    Ingest {
        path: String,
        title: String,
        category: Option<String>,
    },
    Upload {
        path: String,
        title: String,
        category: Option<String>,
    },
    /// `path` of `-` keeps the content; a missing or blank title or
    /// category keeps the stored one.
    Edit {
        id: String,
        path: String,
        title: Option<String>,
        category: Option<String>,
    },
    RemoveDoc(String),
    Help,
    Quit,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Blank line
    Empty,
    /// A question for the assistant, trimmed
    Question(String),
    /// A slash command
    Command(Command),
    /// A malformed command; the text explains why
    Invalid(String),
}

/// Split command arguments on whitespace, keeping `"double quoted"` runs
/// together.
///
/// An unterminated quote runs to the end of the line.
pub fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        args.push(current);
    }
    args
}

fn usage_error(cmd: SlashCommand) -> UserInput {
    UserInput::Invalid(format!("Usage: {} {}", cmd.name(), cmd.usage()))
}

/// Parse one line of user input.
///
/// # Examples
///
/// ```
/// use ragchat::input::{parse_input, Command, UserInput};
///
/// assert_eq!(parse_input("  hello "), UserInput::Question("hello".to_string()));
/// assert_eq!(parse_input("/new"), UserInput::Command(Command::New));
/// ```
pub fn parse_input(line: &str) -> UserInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return UserInput::Empty;
    }
    if !trimmed.starts_with('/') {
        return UserInput::Question(trimmed.to_string());
    }

    let mut args = split_args(trimmed);
    let name = args.remove(0);
    let Some(cmd) = SlashCommand::parse(&name) else {
        return UserInput::Invalid(format!("Unknown command {}. Type /help.", name));
    };

    let command = match (cmd, args.as_slice()) {
        (SlashCommand::New, []) => Command::New,
        (SlashCommand::Sessions, []) => Command::Sessions,
        (SlashCommand::Switch, [id]) => Command::Switch(id.clone()),
        (SlashCommand::Delete, [id]) => Command::Delete(id.clone()),
        (SlashCommand::Docs, []) => Command::Docs,
        (SlashCommand::Doc, [id]) => Command::Doc(id.clone()),
        (SlashCommand::Ingest, [path, title]) => Command::Ingest {
            path: path.clone(),
            title: title.clone(),
            category: None,
        },
        (SlashCommand::Ingest, [path, title, category]) => Command::Ingest {
            path: path.clone(),
            title: title.clone(),
            category: Some(category.clone()),
        },
        (SlashCommand::Upload, [path, title]) => Command::Upload {
            path: path.clone(),
            title: title.clone(),
            category: None,
        },
        (SlashCommand::Upload, [path, title, category]) => Command::Upload {
            path: path.clone(),
            title: title.clone(),
            category: Some(category.clone()),
        },
        (SlashCommand::Edit, [id, path, rest @ ..]) if rest.len() <= 2 => Command::Edit {
            id: id.clone(),
            path: path.clone(),
            title: rest.first().cloned(),
            category: rest.get(1).cloned(),
        },
        (SlashCommand::RemoveDoc, [id]) => Command::RemoveDoc(id.clone()),
        (SlashCommand::Help, _) => Command::Help,
        (SlashCommand::Quit, _) => Command::Quit,
        (cmd, _) => return usage_error(cmd),
    };

    UserInput::Command(command)
}
