//! Fixed-size key records of the TKEY block.

use crate::error::{Error, Result};
use bytes::{Buf, BufMut};
use std::fmt;

/// Size of the NUL-padded name field.
pub const KEY_NAME_SIZE: usize = 8;

/// Encoded size of one record: name field plus a u32 offset.
pub const KEY_RECORD_SIZE: usize = KEY_NAME_SIZE + 4;

/// One TKEY entry: a key name and the TDAT offset of its value.
///
/// Format:
/// ```text
/// [name: 8 bytes, NUL padded]
/// [offset: u32 little-endian]
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyRecord {
    name: [u8; KEY_NAME_SIZE],
    len: usize,
    offset: u32,
}

impl KeyRecord {
    /// Create an empty record pointing at `offset` in the TDAT block.
    pub fn new(offset: u32) -> Self {
        Self { name: [0; KEY_NAME_SIZE], len: 0, offset }
    }

    /// Create a record with the given name.
    ///
    /// The name must be strictly shorter than [`KEY_NAME_SIZE`] and contain no NUL.
    pub fn with_name(name: &[u8], offset: u32) -> Result<Self> {
        let mut record = Self::new(offset);
        for &byte in name {
            if byte == 0 {
                return Err(Error::invalid_argument("key name must not contain NUL"));
            }
            if !record.push_name_byte(byte) {
                return Err(Error::invalid_argument(format!(
                    "key name must be shorter than {} bytes",
                    KEY_NAME_SIZE
                )));
            }
        }
        Ok(record)
    }

    /// Append a byte to the name. Returns false once the name is full,
    /// leaving room for at least one NUL pad byte.
    pub fn push_name_byte(&mut self, byte: u8) -> bool {
        if self.len + 1 >= KEY_NAME_SIZE {
            return false;
        }
        self.name[self.len] = byte;
        self.len += 1;
        true
    }

    /// The key name without padding.
    pub fn name(&self) -> &[u8] {
        &self.name[..self.len]
    }

    /// Offset of the value in the TDAT block.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Encode the record into `buf` (12 bytes).
    pub fn encode_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.name);
        buf.put_u32_le(self.offset);
    }

    /// Decode a record from the first 12 bytes of `data`.
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        if data.len() < KEY_RECORD_SIZE {
            return Err(Error::corruption("key record too short"));
        }

        let mut name = [0u8; KEY_NAME_SIZE];
        data.copy_to_slice(&mut name);
        let offset = data.get_u32_le();

        let len = name.iter().position(|&b| b == 0).unwrap_or(KEY_NAME_SIZE);
        if name[len..].iter().any(|&b| b != 0) {
            return Err(Error::corruption("key name is not NUL padded"));
        }

        Ok(Self { name, len, offset })
    }
}

impl fmt::Debug for KeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRecord")
            .field("name", &String::from_utf8_lossy(self.name()))
            .field("offset", &self.offset)
            .finish()
    }
}

impl fmt::Display for KeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.name()))
    }
}
