//! Events emitted by the lexer and the sink that consumes them.

use crate::error::Result;
use std::fmt;

/// A 1-based location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1.
    pub row: u32,
    /// Column number, starting at 1 and reset on every line feed.
    pub column: u32,
}

impl Position {
    /// Create a new Position
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Move past `byte`. A line feed starts a new row.
    pub(crate) fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.row += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { row: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A side effect produced while classifying one source byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The value read since the last closed key is complete.
    FinishValue,
    /// A `[` started a new key.
    OpenKey,
    /// A byte belonging to the current key name, and where it was read.
    KeyByte(u8, Position),
    /// A `]` closed the current key; its value follows.
    CloseKey,
    /// A byte belonging to the current value.
    ValueByte(u8),
}

/// Receiver of lexer events.
///
/// The table builder is the production sink; tests record events into a `Vec`.
pub trait EventSink {
    /// Handle one event. An error aborts the compile.
    fn on_event(&mut self, event: Event) -> Result<()>;
}

impl EventSink for Vec<Event> {
    fn on_event(&mut self, event: Event) -> Result<()> {
        self.push(event);
        Ok(())
    }
}
