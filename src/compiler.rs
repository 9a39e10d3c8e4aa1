//! Compile session.
//!
//! A [`Compiler`] reads the source in fixed-size chunks and drives a
//! [`Lexer`] into a [`TableBuilder`]. Session state is created per call and
//! dropped when the call returns, so one compiler can be reused.

use crate::config::Options;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::table::{GxtTable, TableBuilder};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Statistics gathered while compiling one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Keys closed by `]` in the source.
    pub keys_read: usize,
    /// Key/value pairs committed to the table.
    pub records: usize,
    /// Chunks read from the source.
    pub chunks: usize,
    /// Bytes read from the source.
    pub bytes_read: u64,
    /// TKEY payload size.
    pub tkey_size: usize,
    /// TDAT payload size.
    pub tdat_size: usize,
}

/// The result of a successful compile.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The compiled table.
    pub table: GxtTable,
    /// What the compile saw.
    pub summary: CompileSummary,
}

/// Compiles GXT source text into a [`GxtTable`].
#[derive(Debug, Clone)]
pub struct Compiler {
    options: Options,
}

impl Compiler {
    /// Create a compiler, validating `options`.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Compile the file at `path`.
    pub fn compile_file<P: AsRef<Path>>(&self, path: P) -> Result<Compilation> {
        let path = path.as_ref();
        let unreadable = |source: io::Error| Error::FileUnreadable { path: path.to_path_buf(), source };

        let file = File::open(path).map_err(unreadable)?;
        log::info!("Reading {} in chunks of {} bytes", path.display(), self.options.chunk_size);

        self.compile_reader(file).map_err(|e| match e {
            Error::Io(source) => unreadable(source),
            other => other,
        })
    }

    /// Compile everything `reader` yields.
    pub fn compile_reader<R: Read>(&self, mut reader: R) -> Result<Compilation> {
        let mut lexer = Lexer::new().with_unmatched_warnings(self.options.warn_unmatched_delimiters);
        let mut builder = TableBuilder::new();
        let mut buf = vec![0u8; self.options.chunk_size];
        let mut summary = CompileSummary::default();

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            summary.chunks += 1;
            summary.bytes_read += n as u64;
            lexer.feed(&buf[..n], &mut builder)?;
        }

        let end = lexer.finish();
        if end.key_unclosed {
            log::warn!("Key opened but never closed before end of input at {}", end.position);
        }
        if end.comment_unterminated {
            log::warn!("Comment not terminated before end of input at {}", end.position);
        }

        let commit_last = end.value_pending && self.options.flush_pending_on_eof;
        let table = builder.finish(commit_last)?;

        summary.keys_read = lexer.num_keys();
        summary.records = table.len();
        summary.tkey_size = table.tkey_size();
        summary.tdat_size = table.tdat_size();

        log::info!("Read {} keys in {} chunks", summary.keys_read, summary.chunks);

        Ok(Compilation { table, summary })
    }
}
