//! # gxtmaker - A GXT Text Table Compiler
//!
//! gxtmaker translates human-editable, bracket-delimited source text into the
//! binary GXT lookup table used by game runtimes to resolve short keys to
//! localized strings.
//!
//! ## Architecture
//!
//! The compiler is a single pass over the source:
//!
//! - **Lexer**: Classifies each byte as key, value or comment, chunk by chunk
//! - **Table Builder**: Collects key records and NUL-terminated values
//! - **Writer**: Emits the TKEY and TDAT blocks with their headers
//! - **Reader**: Decodes compiled tables for lookups and verification
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gxtmaker::{compile, Options};
//!
//! # fn main() -> Result<(), gxtmaker::Error> {
//! let options = Options::default().output_path("american.gxt");
//! let summary = compile("american.txt", &options)?;
//! println!("Compiled {} keys", summary.records);
//! # Ok(())
//! # }
//! ```
//!
//! Compiling in memory:
//!
//! ```rust
//! use gxtmaker::{compile_bytes, Options};
//!
//! let table = compile_bytes(b"[A]Hello{comment}World[B]Bye", &Options::default()).unwrap();
//! assert_eq!(table.get(b"A"), Some(&b"HelloWorld"[..]));
//! assert_eq!(table.tdat_size(), 15);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod compiler;
pub mod config;
pub mod error;
pub mod hexdump;
pub mod lexer;
pub mod reader;
pub mod table;
pub mod writer;

// Re-exports
pub use compiler::{Compilation, CompileSummary, Compiler};
pub use config::Options;
pub use error::{Error, ErrorKind, ExitStatus, Result};
pub use reader::GxtReader;
pub use table::{GxtTable, KeyRecord};
pub use writer::GxtWriter;

use std::path::Path;

/// Compile the source file at `src` and write the table to `options.output_path`.
///
/// The whole source is compiled before the output file is touched, so a
/// failed compile leaves no output behind.
pub fn compile<P: AsRef<Path>>(src: P, options: &Options) -> Result<CompileSummary> {
    let compiler = Compiler::new(options.clone())?;
    let Compilation { table, summary } = compiler.compile_file(src)?;

    let mut writer = GxtWriter::create(&options.output_path)?;
    writer.write(&table)?;
    let size = writer.finish()?;

    log::info!(
        "Wrote {} records ({} bytes) to {}",
        summary.records,
        size,
        options.output_path.display()
    );

    Ok(summary)
}

/// Compile in-memory source text into a table.
pub fn compile_bytes(src: &[u8], options: &Options) -> Result<GxtTable> {
    let compiler = Compiler::new(options.clone())?;
    Ok(compiler.compile_reader(src)?.table)
}
