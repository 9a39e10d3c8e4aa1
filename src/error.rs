//! Error types for the GXT compiler.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The result type used throughout gxtmaker.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for compiler operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred on an already opened stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source file could not be opened or read.
    #[error("unable to read file '{}'", path.display())]
    FileUnreadable {
        /// Path of the source file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The destination file could not be opened for writing.
    #[error("unable to write file '{}'", path.display())]
    FileUnwritable {
        /// Path of the destination file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A key name reached the maximum key length.
    #[error("gxt key exceeds maximum length")]
    KeyTooLong {
        /// 1-based source line of the offending byte.
        row: u32,
        /// 1-based source column of the offending byte.
        column: u32,
    },

    /// A compiled table failed validation while being decoded.
    #[error("data corruption: {0}")]
    Corruption(String),

    /// An invalid argument or option was provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Broad classification of an [`Error`], used to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the source or writing the output failed.
    Io,
    /// The source text is structurally invalid.
    Compilation,
    /// A compiled table could not be decoded.
    Format,
    /// The caller supplied bad arguments.
    Usage,
}

/// Process exit status of the command line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Compilation succeeded.
    Success = 0,
    /// No input file or otherwise bad command line.
    ArgumentError = 1,
    /// Input unreadable or output unwritable.
    IoError = 2,
    /// The source failed to compile.
    CompilationError = 3,
}

impl ExitStatus {
    /// Returns the numeric process exit code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

impl Error {
    /// Creates a new corruption error.
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::FileUnreadable { .. } | Error::FileUnwritable { .. } => {
                ErrorKind::Io
            }
            Error::KeyTooLong { .. } => ErrorKind::Compilation,
            Error::Corruption(_) => ErrorKind::Format,
            Error::InvalidArgument(_) => ErrorKind::Usage,
        }
    }

    /// Returns the source position attached to this error, if any.
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            Error::KeyTooLong { row, column } => Some((*row, *column)),
            _ => None,
        }
    }

    /// Returns the exit status the command line tool reports for this error.
    pub fn exit_status(&self) -> ExitStatus {
        match self.kind() {
            ErrorKind::Io | ErrorKind::Format => ExitStatus::IoError,
            ErrorKind::Compilation => ExitStatus::CompilationError,
            ErrorKind::Usage => ExitStatus::ArgumentError,
        }
    }
}
