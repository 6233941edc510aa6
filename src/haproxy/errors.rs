//! Error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Error encountered while performing IO.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sockets path exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The sockets directory contains no Unix sockets.
    #[error("no HAProxy sockets found in {}", .0.display())]
    NoSockets(PathBuf),

    /// HAProxy rejected the command.
    #[error("HAProxy rejected the command: {0}")]
    UnknownCommand(String),

    /// Failure parsing response from HAProxy.
    #[error("failed to parse HAProxy response: {0}")]
    ParseFailure(String),
}
