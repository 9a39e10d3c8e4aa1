//! GXT file reader.
//!
//! Decodes the TKEY/TDAT layout produced by [`crate::writer`] back into a
//! [`GxtTable`], validating block signatures, sizes and value offsets.

use crate::error::{Error, Result};
use crate::table::{GxtTable, KeyRecord, KEY_RECORD_SIZE};
use crate::writer::{BlockHeader, BLOCK_HEADER_SIZE, TDAT_SIGNATURE, TKEY_SIGNATURE};
use bytes::Bytes;
use std::path::Path;

/// GxtReader provides lookup access to a compiled GXT file.
///
/// Usage:
/// ```no_run
/// use gxtmaker::reader::GxtReader;
///
/// let reader = GxtReader::open("a.gxt").unwrap();
/// if let Some(text) = reader.get(b"MAIN1") {
///     println!("{}", String::from_utf8_lossy(text));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GxtReader {
    table: GxtTable,
}

impl GxtReader {
    /// Open and decode a GXT file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|source| Error::FileUnreadable { path: path.to_path_buf(), source })?;
        Self::parse(&data)
    }

    /// Decode a GXT file image
    pub fn parse(data: &[u8]) -> Result<Self> {
        let tkey = BlockHeader::decode_expecting(data, TKEY_SIGNATURE)?;
        let tkey_size = tkey.size as usize;
        if tkey_size % KEY_RECORD_SIZE != 0 {
            return Err(Error::corruption(format!(
                "TKEY size {} is not a multiple of {}",
                tkey_size, KEY_RECORD_SIZE
            )));
        }

        let tkey_payload = data
            .get(BLOCK_HEADER_SIZE..BLOCK_HEADER_SIZE + tkey_size)
            .ok_or_else(|| Error::corruption("TKEY block truncated"))?;

        let rest = &data[BLOCK_HEADER_SIZE + tkey_size..];
        let tdat = BlockHeader::decode_expecting(rest, TDAT_SIGNATURE)?;
        let tdat_size = tdat.size as usize;
        let tdat_payload = rest
            .get(BLOCK_HEADER_SIZE..BLOCK_HEADER_SIZE + tdat_size)
            .ok_or_else(|| Error::corruption("TDAT block truncated"))?;

        if rest.len() > BLOCK_HEADER_SIZE + tdat_size {
            return Err(Error::corruption("trailing bytes after TDAT block"));
        }

        let keys = tkey_payload
            .chunks_exact(KEY_RECORD_SIZE)
            .map(KeyRecord::decode)
            .collect::<Result<Vec<_>>>()?;

        let tdat_bytes = Bytes::copy_from_slice(tdat_payload);
        let mut values = Vec::with_capacity(keys.len());
        for key in &keys {
            let start = key.offset() as usize;
            if start >= tdat_size {
                return Err(Error::corruption(format!(
                    "key '{}' points past the TDAT block (offset {})",
                    key,
                    key.offset()
                )));
            }
            let len = tdat_payload[start..]
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| Error::corruption(format!("value of key '{}' is not NUL terminated", key)))?;
            values.push(tdat_bytes.slice(start..start + len));
        }

        Ok(Self { table: GxtTable::from_parts(keys, values) })
    }

    /// Look up the value of the first key named `name`
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.table.get(name)
    }

    /// The decoded table
    pub fn table(&self) -> &GxtTable {
        &self.table
    }

    /// Consume the reader, returning the decoded table
    pub fn into_table(self) -> GxtTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::encode_table;
    use crate::{compile_bytes, Options};

    #[test]
    fn test_parse_compiled_table() {
        let table = compile_bytes(b"[A]Hello{comment}World[B]Bye", &Options::default()).unwrap();
        let encoded = encode_table(&table).unwrap();

        let reader = GxtReader::parse(&encoded).unwrap();
        assert_eq!(reader.table(), &table);
        assert_eq!(reader.get(b"A"), Some(&b"HelloWorld"[..]));
        assert_eq!(reader.get(b"B"), Some(&b"Bye"[..]));
    }

    #[test]
    fn test_parse_rejects_truncated_file() {
        let table = compile_bytes(b"[A]Hello[B]Bye", &Options::default()).unwrap();
        let encoded = encode_table(&table).unwrap();

        for len in [0, 4, 12, encoded.len() - 1] {
            assert!(GxtReader::parse(&encoded[..len]).is_err(), "len {}", len);
        }
    }

    #[test]
    fn test_parse_rejects_bad_offset() {
        let mut data = Vec::new();
        BlockHeader::new(TKEY_SIGNATURE, 12).encode_to(&mut data);
        KeyRecord::with_name(b"A", 9).unwrap().encode_to(&mut data);
        BlockHeader::new(TDAT_SIGNATURE, 2).encode_to(&mut data);
        data.extend_from_slice(b"x\0");

        assert!(matches!(GxtReader::parse(&data), Err(Error::Corruption(_))));
    }

    #[test]
    fn test_parse_rejects_unaligned_tkey() {
        let mut data = Vec::new();
        BlockHeader::new(TKEY_SIGNATURE, 5).encode_to(&mut data);
        data.extend_from_slice(&[0; 5]);
        BlockHeader::new(TDAT_SIGNATURE, 0).encode_to(&mut data);

        assert!(GxtReader::parse(&data).is_err());
    }
}
