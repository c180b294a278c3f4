//! Command definitions
//!
//! Represents requests sent to the store. The verb is always explicit: a
//! value can only travel with `Set`, so a GET or DELETE never turns into a
//! SET because a value happened to be supplied.

use bytes::Bytes;

/// Command verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Get,
    Set,
    Delete,
    Usage,
    Quit,
}

impl CommandType {
    /// Wire spelling of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Get => "GET",
            CommandType::Set => "SET",
            CommandType::Delete => "DELETE",
            CommandType::Usage => "USAGE",
            CommandType::Quit => "QUIT",
        }
    }

    /// Parse a verb, case-insensitively
    pub fn parse(verb: &str) -> Option<Self> {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => Some(CommandType::Get),
            "SET" => Some(CommandType::Set),
            "DELETE" => Some(CommandType::Delete),
            "USAGE" => Some(CommandType::Usage),
            "QUIT" => Some(CommandType::Quit),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a value by key
    Get { key: String },

    /// Store a value under a key
    Set { key: String, value: Bytes },

    /// Remove a key
    Delete { key: String },

    /// Ask for the number of bytes currently held
    Usage,

    /// Close the connection
    Quit,
}

impl Command {
    pub fn get(key: impl Into<String>) -> Self {
        Command::Get { key: key.into() }
    }

    pub fn set(key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Command::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Command::Delete { key: key.into() }
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Set { .. } => CommandType::Set,
            Command::Delete { .. } => CommandType::Delete,
            Command::Usage => CommandType::Usage,
            Command::Quit => CommandType::Quit,
        }
    }

    /// The key, for keyed commands
    pub fn key(&self) -> Option<&str> {
        match self {
            Command::Get { key } | Command::Set { key, .. } | Command::Delete { key } => Some(key),
            Command::Usage | Command::Quit => None,
        }
    }

    /// Whether the store answers this command with a response line
    pub fn expects_response(&self) -> bool {
        !matches!(self, Command::Quit)
    }
}
