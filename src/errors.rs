//! Error types shared across the crate.
//!
//! None of these ever reach a caller of
//! [`ExtensionPolicy::is_permitted`](crate::policy::ExtensionPolicy::is_permitted);
//! list loading and watcher setup log them and degrade instead.

use std::fmt::{Display, Formatter};

/// Shared crate result type.
pub type Result<T> = std::result::Result<T, GateError>;

/// Error enumeration covering all failure modes of the gate.
#[derive(Debug)]
pub enum GateError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// File watcher creation or subscription failure.
    Watch(String),
    /// List content could not be parsed.
    Parse(String),
}

impl Display for GateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Watch(msg) => write!(f, "watch: {msg}"),
            Self::Parse(msg) => write!(f, "parse: {msg}"),
        }
    }
}

impl std::error::Error for GateError {}

impl From<toml::de::Error> for GateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<notify::Error> for GateError {
    fn from(err: notify::Error) -> Self {
        Self::Watch(err.to_string())
    }
}
