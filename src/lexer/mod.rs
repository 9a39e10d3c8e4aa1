//! Streaming lexer for GXT source text.
//!
//! The lexer classifies every source byte according to its current mode
//! and forwards the resulting [`Event`]s to an [`EventSink`]. All state lives
//! in the [`Lexer`] value, so a key name or value may span any number of
//! chunks passed to [`Lexer::feed`].
//!
//! ## Source Format
//!
//! ```text
//! [KEY]value text {comment} more value text
//! [NEXT]another value
//! ```
//!
//! - `[` opens a key, `]` closes it
//! - `{` opens a comment, `}` closes it; comments are stripped
//! - leading spaces and tabs of a value are dropped
//! - `\n` only advances the row, `\r` and NUL are discarded

pub mod event;

pub use event::{Event, EventSink, Position};

use crate::error::{Error, Result};

/// Opens a key.
pub const START_OF_KEY: u8 = b'[';
/// Closes a key.
pub const END_OF_KEY: u8 = b']';
/// Opens a comment.
pub const START_OF_COMMENT: u8 = b'{';
/// Closes a comment.
pub const END_OF_COMMENT: u8 = b'}';

/// Key names must stay strictly shorter than this many bytes.
pub const MAX_KEY_LEN: usize = 8;

/// What the lexer is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Before the first key.
    Idle,
    /// Between `[` and `]`.
    ReadingKey,
    /// After `]`, up to the next `[`.
    ReadingValue,
    /// Between `{` and `}`.
    ReadingComment,
}

/// State reported once the whole source has been fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput {
    /// A value was read after the last closed key and was never finished.
    pub value_pending: bool,
    /// A `[` was never matched by `]`.
    pub key_unclosed: bool,
    /// A `{` was never matched by `}`.
    pub comment_unterminated: bool,
    /// Position just past the last byte.
    pub position: Position,
}

/// Byte-at-a-time state machine over GXT source text.
#[derive(Debug, Clone)]
pub struct Lexer {
    position: Position,
    mode: Mode,
    /// Mode to return to when the current comment ends.
    resume_mode: Mode,
    key_open: bool,
    value_encountered: bool,
    key_chars_read: usize,
    num_keys: usize,
    warn_unmatched: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Create a lexer positioned at row 1, column 1, before the first key.
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            mode: Mode::Idle,
            resume_mode: Mode::Idle,
            key_open: false,
            value_encountered: false,
            key_chars_read: 0,
            num_keys: 0,
            warn_unmatched: false,
        }
    }

    /// Log a warning for every `]` or `}` that has nothing to close.
    pub fn with_unmatched_warnings(mut self, enabled: bool) -> Self {
        self.warn_unmatched = enabled;
        self
    }

    /// Classify every byte of `chunk`, forwarding events to `sink`.
    ///
    /// Stops at the first error; the lexer must not be fed again afterwards.
    pub fn feed<S: EventSink>(&mut self, chunk: &[u8], sink: &mut S) -> Result<()> {
        for &byte in chunk {
            self.step(byte, sink)?;
            self.position.advance(byte);
        }
        Ok(())
    }

    /// Report the state left behind by the last fed byte.
    pub fn finish(&self) -> EndOfInput {
        let value_mode = match self.mode {
            Mode::ReadingComment => self.resume_mode,
            mode => mode,
        };

        EndOfInput {
            value_pending: value_mode == Mode::ReadingValue && self.value_encountered,
            key_unclosed: self.key_open,
            comment_unterminated: self.mode == Mode::ReadingComment,
            position: self.position,
        }
    }

    /// Number of keys closed by `]` so far.
    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    fn step<S: EventSink>(&mut self, byte: u8, sink: &mut S) -> Result<()> {
        // Control bytes first, then mode-specific handling. NUL would
        // terminate a key name or value early in the written table.
        match byte {
            b'\n' | b'\r' | 0 => return Ok(()),
            START_OF_KEY if self.mode != Mode::ReadingComment => {
                return self.start_key(sink);
            }
            START_OF_COMMENT if self.mode != Mode::ReadingComment => {
                self.resume_mode = self.mode;
                self.mode = Mode::ReadingComment;
                return Ok(());
            }
            _ => {}
        }

        match self.mode {
            Mode::Idle => {
                if byte == END_OF_KEY || byte == END_OF_COMMENT {
                    self.unmatched(byte);
                }
                Ok(())
            }
            Mode::ReadingKey => self.key_byte(byte, sink),
            Mode::ReadingValue => self.value_byte(byte, sink),
            Mode::ReadingComment => {
                if byte == END_OF_COMMENT {
                    self.mode = self.resume_mode;
                }
                Ok(())
            }
        }
    }

    fn start_key<S: EventSink>(&mut self, sink: &mut S) -> Result<()> {
        if self.value_encountered {
            sink.on_event(Event::FinishValue)?;
            self.value_encountered = false;
        }

        sink.on_event(Event::OpenKey)?;
        self.mode = Mode::ReadingKey;
        self.key_open = true;
        self.key_chars_read = 0;
        Ok(())
    }

    fn key_byte<S: EventSink>(&mut self, byte: u8, sink: &mut S) -> Result<()> {
        if byte == END_OF_KEY {
            self.mode = Mode::ReadingValue;
            self.key_open = false;
            self.value_encountered = false;
            self.num_keys += 1;
            return sink.on_event(Event::CloseKey);
        }

        self.key_chars_read += 1;
        if self.key_chars_read >= MAX_KEY_LEN {
            return Err(Error::KeyTooLong { row: self.position.row, column: self.position.column });
        }

        sink.on_event(Event::KeyByte(byte, self.position))
    }

    fn value_byte<S: EventSink>(&mut self, byte: u8, sink: &mut S) -> Result<()> {
        if byte == END_OF_KEY || byte == END_OF_COMMENT {
            self.unmatched(byte);
            return Ok(());
        }

        if !self.value_encountered && !is_whitespace(byte) {
            self.value_encountered = true;
        }

        if self.value_encountered {
            sink.on_event(Event::ValueByte(byte))?;
        }
        Ok(())
    }

    fn unmatched(&self, byte: u8) {
        if self.warn_unmatched {
            log::warn!("Unmatched '{}' at {} ignored", byte as char, self.position);
        }
    }
}

fn is_whitespace(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}
