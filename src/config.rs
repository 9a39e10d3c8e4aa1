//! Configuration options for the GXT compiler.

use std::path::PathBuf;

/// Default number of bytes read from the source per I/O operation.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default destination of the compiled table.
pub const DEFAULT_OUTPUT_PATH: &str = "a.gxt";

/// Configuration options for a compile invocation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Number of bytes read from the source per chunk.
    /// Default: 1024
    pub chunk_size: usize,

    /// Commit the last key/value pair at end of input even though no
    /// following `[` closed it.
    /// Default: true
    pub flush_pending_on_eof: bool,

    /// Log a warning for every `]` outside a key and `}` outside a comment.
    /// They are ignored either way.
    /// Default: false
    pub warn_unmatched_delimiters: bool,

    /// Where the compiled table is written.
    /// Default: "a.gxt"
    pub output_path: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            flush_pending_on_eof: true,
            warn_unmatched_delimiters: false,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size used when reading the source.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets whether the final pending pair is committed at end of input.
    pub fn flush_pending_on_eof(mut self, value: bool) -> Self {
        self.flush_pending_on_eof = value;
        self
    }

    /// Enables or disables warnings for unmatched `]` and `}`.
    pub fn warn_unmatched_delimiters(mut self, value: bool) -> Self {
        self.warn_unmatched_delimiters = value;
        self
    }

    /// Sets the output path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.chunk_size == 0 {
            return Err(crate::Error::invalid_argument("chunk_size must be > 0"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(crate::Error::invalid_argument("output_path must not be empty"));
        }
        Ok(())
    }
}
