//! Binary GXT writer.
//!
//! ## File Format
//!
//! ```text
//! [TKEY header: "TKEY", size: u32]
//! [TKEY payload: { name[8], offset: u32 } * N]
//! [TDAT header: "TDAT", size: u32]
//! [TDAT payload: N NUL-terminated strings]
//! ```
//!
//! All integers are little-endian. Blocks always appear in this order.

pub mod header;

pub use header::{BlockHeader, BLOCK_HEADER_SIZE, TDAT_SIGNATURE, TKEY_SIGNATURE};

use crate::error::{Error, Result};
use crate::table::GxtTable;
use bytes::{BufMut, Bytes, BytesMut};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Encode `table` into the complete file image.
pub fn encode_table(table: &GxtTable) -> Result<Bytes> {
    let tkey = BlockHeader::for_payload(TKEY_SIGNATURE, table.tkey_size())?;
    let tdat = BlockHeader::for_payload(TDAT_SIGNATURE, table.tdat_size())?;

    let mut buf = BytesMut::with_capacity(
        2 * BLOCK_HEADER_SIZE + tkey.size as usize + tdat.size as usize,
    );

    tkey.encode_to(&mut buf);
    for key in table.keys() {
        key.encode_to(&mut buf);
    }

    tdat.encode_to(&mut buf);
    for value in table.values() {
        buf.put_slice(value);
        buf.put_u8(0);
    }

    Ok(buf.freeze())
}

/// Write `table` to `writer`. Returns the number of bytes written.
pub fn write_table<W: Write>(table: &GxtTable, writer: &mut W) -> Result<u64> {
    let encoded = encode_table(table)?;
    writer.write_all(&encoded)?;
    Ok(encoded.len() as u64)
}

/// GxtWriter writes a compiled table to a file.
///
/// Usage:
/// ```no_run
/// use gxtmaker::writer::GxtWriter;
/// # use gxtmaker::table::GxtTable;
/// # let table = GxtTable::default();
///
/// let mut writer = GxtWriter::create("a.gxt").unwrap();
/// writer.write(&table).unwrap();
/// writer.finish().unwrap();
/// ```
pub struct GxtWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl GxtWriter {
    /// Create or truncate the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .map_err(|source| Error::FileUnwritable { path: path.clone(), source })?;

        Ok(Self { path, writer: BufWriter::new(file), bytes_written: 0 })
    }

    /// Write both blocks of `table`.
    pub fn write(&mut self, table: &GxtTable) -> Result<()> {
        let written = write_table(table, &mut self.writer).map_err(|e| self.unwritable(e))?;
        self.bytes_written += written;
        Ok(())
    }

    /// Flush buffered bytes and close the file. Returns the total size written.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush().map_err(|e| self.unwritable(Error::Io(e)))?;
        Ok(self.bytes_written)
    }

    fn unwritable(&self, err: Error) -> Error {
        match err {
            Error::Io(source) => Error::FileUnwritable { path: self.path.clone(), source },
            other => other,
        }
    }
}
