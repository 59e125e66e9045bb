//! Line commands accepted by the interactive shell.

use std::str::FromStr;

use crate::models::{Category, Choice, Level, ParseLabelError, ResourceType};

/// One parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Replace the free-text query (bare text, possibly empty)
    Query(String),
    /// `:category <name|all>`
    Category(Choice<Category>),
    /// `:type <name|all>`
    Kind(Choice<ResourceType>),
    /// `:level <name|all>`
    Level(Choice<Level>),
    /// `:year <year|all>`
    Year(Choice<String>),
    /// `:books <query>`
    Books(String),
    /// `:live on|off`
    Live(bool),
    /// `:reset`
    Reset,
    /// `:show`
    Show,
    /// `:categories`
    Categories,
    /// `:suggest`
    Suggest,
    /// `:help`
    Help,
    /// `:quit`
    Quit,
}

/// Errors produced while parsing a shell line
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command ':{0}' (type :help for a list)")]
    Unknown(String),

    #[error("':{0}' needs a value")]
    MissingArgument(&'static str),

    #[error("Expected 'on' or 'off', got '{0}'")]
    InvalidToggle(String),

    #[error("Year must be a four-digit number or 'all', got '{0}'")]
    InvalidYear(String),

    #[error(transparent)]
    Label(#[from] ParseLabelError),
}

/// Help text listing every shell command
pub const HELP_TEXT: &str = "\
<text>                 filter titles and tags by text (empty line clears it)
:category <name|all>   restrict to one category
:type <name|all>       restrict to one file type
:level <name|all>      restrict to one level
:year <year|all>       restrict to one year
:books <query>         search the remote book catalog
:live on|off           look up books for every query line
:suggest               show tag suggestions for the current query
:categories            list categories with resource counts
:show                  show the current filters
:reset                 clear every filter
:help                  show this help
:quit                  leave the shell";

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(ShellCommand::Query(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "category" | "cat" | "c" => {
                let arg = required("category", arg)?;
                Ok(ShellCommand::Category(arg.parse()?))
            }
            "type" | "t" => {
                let arg = required("type", arg)?;
                Ok(ShellCommand::Kind(arg.parse()?))
            }
            "level" | "l" => {
                let arg = required("level", arg)?;
                Ok(ShellCommand::Level(arg.parse()?))
            }
            "year" | "y" => {
                let arg = required("year", arg)?;
                parse_year(arg).map(ShellCommand::Year)
            }
            "books" | "b" => {
                let arg = required("books", arg)?;
                Ok(ShellCommand::Books(arg.to_string()))
            }
            "live" => match arg.to_lowercase().as_str() {
                "on" | "true" | "yes" => Ok(ShellCommand::Live(true)),
                "off" | "false" | "no" => Ok(ShellCommand::Live(false)),
                "" => Err(CommandError::MissingArgument("live")),
                other => Err(CommandError::InvalidToggle(other.to_string())),
            },
            "reset" | "r" => Ok(ShellCommand::Reset),
            "show" | "s" => Ok(ShellCommand::Show),
            "categories" | "ls" => Ok(ShellCommand::Categories),
            "suggest" => Ok(ShellCommand::Suggest),
            "help" | "h" | "?" => Ok(ShellCommand::Help),
            "quit" | "q" | "exit" => Ok(ShellCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn required<'a>(name: &'static str, arg: &'a str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(arg)
    }
}

fn parse_year(arg: &str) -> Result<Choice<String>, CommandError> {
    let choice: Choice<String> = arg.parse().unwrap_or(Choice::All);
    match &choice {
        Choice::Only(year) if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) => {
            Err(CommandError::InvalidYear(year.clone()))
        }
        _ => Ok(choice),
    }
}
