//! Block header implementation.
//!
//! Every block of a GXT file starts with an 8-byte header naming the block
//! and giving the size of the payload that follows.

use crate::error::{Error, Result};
use bytes::{Buf, BufMut};

/// Header size in bytes (fixed)
pub const BLOCK_HEADER_SIZE: usize = 8;

/// Signature of the key block
pub const TKEY_SIGNATURE: [u8; 4] = *b"TKEY";

/// Signature of the value block
pub const TDAT_SIGNATURE: [u8; 4] = *b"TDAT";

/// BlockHeader precedes the payload of a TKEY or TDAT block.
///
/// Format:
/// ```text
/// [signature: 4 bytes ASCII]
/// [size: u32 little-endian]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Four ASCII bytes naming the block
    pub signature: [u8; 4],
    /// Payload size in bytes
    pub size: u32,
}

impl BlockHeader {
    /// Create a new BlockHeader
    pub fn new(signature: [u8; 4], size: u32) -> Self {
        Self { signature, size }
    }

    /// Create a header for a payload of `size` bytes, checking that it fits the size field.
    pub fn for_payload(signature: [u8; 4], size: usize) -> Result<Self> {
        let size = u32::try_from(size).map_err(|_| {
            Error::invalid_argument(format!(
                "{} block of {} bytes exceeds the 4 GiB size field",
                String::from_utf8_lossy(&signature),
                size
            ))
        })?;
        Ok(Self::new(signature, size))
    }

    /// Encode the header into `buf` (8 bytes)
    pub fn encode_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(&self.signature);
        buf.put_u32_le(self.size);
    }

    /// Decode a header from the first 8 bytes of `data`
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        if data.len() < BLOCK_HEADER_SIZE {
            return Err(Error::corruption("block header too short"));
        }

        let mut signature = [0u8; 4];
        data.copy_to_slice(&mut signature);
        let size = data.get_u32_le();

        Ok(Self { signature, size })
    }

    /// Decode a header and verify its signature
    pub fn decode_expecting(data: &[u8], signature: [u8; 4]) -> Result<Self> {
        let header = Self::decode(data)?;
        if header.signature != signature {
            return Err(Error::corruption(format!(
                "invalid block signature: expected {:?}, got {:?}",
                String::from_utf8_lossy(&signature),
                String::from_utf8_lossy(&header.signature)
            )));
        }
        Ok(header)
    }
}
