//! In-memory GXT table.
//!
//! A table is two parallel sequences in source order:
//!
//! - **TKEY**: fixed-size [`KeyRecord`]s, each naming a key and pointing at
//!   the start of its value in TDAT
//! - **TDAT**: the values, each stored NUL-terminated and concatenated
//!
//! Record `i` always points at value `i`, and its offset equals the sum of
//! `len + 1` over all values before it.

pub mod builder;
pub mod record;

pub use builder::TableBuilder;
pub use record::{KeyRecord, KEY_NAME_SIZE, KEY_RECORD_SIZE};

use bytes::Bytes;

/// A compiled key table and its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GxtTable {
    keys: Vec<KeyRecord>,
    values: Vec<Bytes>,
}

impl GxtTable {
    /// Assemble a table from matching key and value sequences.
    pub(crate) fn from_parts(keys: Vec<KeyRecord>, values: Vec<Bytes>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key records in source order.
    pub fn keys(&self) -> &[KeyRecord] {
        &self.keys
    }

    /// The values in source order, without NUL terminators.
    pub fn values(&self) -> &[Bytes] {
        &self.values
    }

    /// Look up the value of the first key named `name`.
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.iter().find(|(key, _)| key.name() == name).map(|(_, value)| value)
    }

    /// Iterate over key/value pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyRecord, &[u8])> {
        self.keys.iter().zip(self.values.iter().map(|v| &v[..]))
    }

    /// Payload size of the TKEY block in bytes.
    pub fn tkey_size(&self) -> usize {
        self.keys.len() * KEY_RECORD_SIZE
    }

    /// Payload size of the TDAT block in bytes, NUL terminators included.
    pub fn tdat_size(&self) -> usize {
        self.values.iter().map(|v| v.len() + 1).sum()
    }
}
