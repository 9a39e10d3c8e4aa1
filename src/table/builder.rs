//! Table builder implementation.
//!
//! Turns lexer events into the ordered key and value sequences of a
//! [`GxtTable`], assigning every key the TDAT offset of its value.

use crate::error::{Error, Result};
use crate::lexer::{Event, EventSink, Position};
use crate::table::record::KeyRecord;
use crate::table::GxtTable;
use bytes::{BufMut, Bytes, BytesMut};

/// TableBuilder accumulates keys and values as the source is lexed.
///
/// Usage:
/// ```
/// use gxtmaker::lexer::Lexer;
/// use gxtmaker::table::TableBuilder;
///
/// let mut lexer = Lexer::new();
/// let mut builder = TableBuilder::new();
/// lexer.feed(b"[A]Hello[B]Bye", &mut builder).unwrap();
///
/// let table = builder.finish(lexer.finish().value_pending).unwrap();
/// assert_eq!(table.get(b"B"), Some(&b"Bye"[..]));
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    keys: Vec<KeyRecord>,
    values: Vec<Bytes>,
    /// Key opened most recently and not yet committed.
    current: Option<KeyRecord>,
    /// Bytes of the value being read.
    pending: BytesMut,
    /// Offset in the TDAT block of the next committed value.
    offset: u32,
}

impl TableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building the table.
    ///
    /// When `commit_last` is set, the key opened last is committed together
    /// with the value read since; otherwise that pair is discarded.
    pub fn finish(mut self, commit_last: bool) -> Result<GxtTable> {
        if commit_last {
            self.finish_value()?;
        } else if let Some(record) = self.current.take() {
            if self.pending.is_empty() {
                log::warn!("Key '{}' has no value; dropped", record);
            } else {
                log::warn!("Value of key '{}' not terminated by a following key; dropped", record);
            }
        }

        Ok(GxtTable::from_parts(self.keys, self.values))
    }

    fn open_key(&mut self) {
        if let Some(record) = self.current.replace(KeyRecord::new(self.offset)) {
            log::warn!("Key '{}' has no value; dropped", record);
        }
        self.pending.clear();
    }

    fn push_key_byte(&mut self, byte: u8, position: Position) -> Result<()> {
        let record = self
            .current
            .as_mut()
            .ok_or_else(|| Error::invalid_argument("key byte outside of a key"))?;

        if !record.push_name_byte(byte) {
            return Err(Error::KeyTooLong { row: position.row, column: position.column });
        }
        Ok(())
    }

    /// Commit the pending value under the current key.
    fn finish_value(&mut self) -> Result<()> {
        let Some(record) = self.current.take() else {
            if !self.pending.is_empty() {
                log::warn!("Value without a key; dropped");
                self.pending.clear();
            }
            return Ok(());
        };

        let value = self.pending.split().freeze();
        let advance = u32::try_from(value.len() + 1)
            .ok()
            .and_then(|n| self.offset.checked_add(n))
            .ok_or_else(|| Error::invalid_argument("TDAT block exceeds 4 GiB"))?;

        log::debug!("Key '{}' -> {} bytes at offset {}", record, value.len(), record.offset());

        self.keys.push(record);
        self.values.push(value);
        self.offset = advance;
        Ok(())
    }
}

impl EventSink for TableBuilder {
    fn on_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::FinishValue => self.finish_value(),
            Event::OpenKey => {
                self.open_key();
                Ok(())
            }
            Event::KeyByte(byte, position) => self.push_key_byte(byte, position),
            Event::CloseKey => Ok(()),
            Event::ValueByte(byte) => {
                self.pending.put_u8(byte);
                Ok(())
            }
        }
    }
}
